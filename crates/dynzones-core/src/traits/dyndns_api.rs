// # Dynamic DNS API Trait
//
// Defines the interface to the Dynamic Zones REST API.
//
// ## Implementations
//
// - HTTP: `dynzones-client` crate (`HttpDynDnsApi`)
// - Tests: in-memory mocks in `tests/common`
//
// ## Usage
//
// ```rust,ignore
// use dynzones_core::DynDnsApi;
//
// async fn show(api: &dyn DynDnsApi) -> dynzones_core::Result<()> {
//     for zone in api.list_zones().await?.zones {
//         println!("{}", zone.name);
//     }
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::models::{
    ApiToken, RecordRequest, RecordsResponse, ServerConfig, TsigKey, ZoneDetail, ZonesResponse,
};

/// Trait for Dynamic Zones API implementations
///
/// Implementations perform exactly one request per call and never retry;
/// retrying is left to the caller. Record names are passed through as given:
/// normalization happens in [`crate::service::RecordService`].
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait DynDnsApi: Send + Sync {
    /// Fetch the name server settings (`config.json`)
    async fn server_config(&self) -> Result<ServerConfig, crate::Error>;

    /// List the zones visible to the caller
    async fn list_zones(&self) -> Result<ZonesResponse, crate::Error>;

    /// Fetch zone details including TSIG keys
    async fn get_zone(&self, zone: &str) -> Result<ZoneDetail, crate::Error>;

    /// Activate (create) a zone the policy allows
    async fn activate_zone(&self, zone: &str) -> Result<(), crate::Error>;

    /// Delete a zone
    async fn delete_zone(&self, zone: &str) -> Result<(), crate::Error>;

    /// List the records of a zone; names come back fully qualified
    async fn list_records(&self, zone: &str, key: &TsigKey)
    -> Result<RecordsResponse, crate::Error>;

    /// Create or replace a record
    async fn create_record(&self, request: &RecordRequest) -> Result<(), crate::Error>;

    /// Delete a record
    async fn delete_record(&self, request: &RecordRequest) -> Result<(), crate::Error>;

    /// List the caller's API tokens
    async fn list_tokens(&self) -> Result<Vec<ApiToken>, crate::Error>;

    /// Create an API token
    async fn create_token(&self, read_only: bool) -> Result<ApiToken, crate::Error>;

    /// Delete an API token
    async fn delete_token(&self, id: &str) -> Result<(), crate::Error>;
}
