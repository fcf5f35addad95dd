//! Record management for a single zone
//!
//! Outbound names go through [`normalize_record_name`] (inside
//! [`RecordRequest::new`]), inbound names through [`strip_zone`], so callers
//! only ever see and enter relative names.

use crate::commands::generate_nsupdate;
use crate::error::{Error, Result};
use crate::models::{DnsRecord, RecordRequest, TsigKey};
use crate::record_name::strip_zone;
use crate::traits::DynDnsApi;

/// Record workflows on top of a [`DynDnsApi`]
pub struct RecordService {
    api: Box<dyn DynDnsApi>,
}

impl RecordService {
    /// Create a service using the given API
    pub fn new(api: Box<dyn DynDnsApi>) -> Self {
        Self { api }
    }

    /// The underlying API
    pub fn api(&self) -> &dyn DynDnsApi {
        self.api.as_ref()
    }

    /// List the records of `zone` with names relative to the zone
    pub async fn list(&self, zone: &str, key: &TsigKey) -> Result<Vec<DnsRecord>> {
        let response = self.api.list_records(zone, key).await?;
        tracing::debug!(zone, count = response.records.len(), "Listed records");

        Ok(response
            .records
            .into_iter()
            .map(|record| DnsRecord {
                name: strip_zone(&record.name, zone),
                ..record
            })
            .collect())
    }

    /// Create or replace a record
    pub async fn upsert(&self, zone: &str, key: &TsigKey, record: &DnsRecord) -> Result<()> {
        let request = self.prepare(zone, key, record)?;
        tracing::debug!(zone, name = %request.name, record_type = %request.record_type, "Upserting record");
        self.api.create_record(&request).await
    }

    /// Delete a record
    pub async fn delete(&self, zone: &str, key: &TsigKey, record: &DnsRecord) -> Result<()> {
        let request = self.prepare(zone, key, record)?;
        tracing::debug!(zone, name = %request.name, record_type = %request.record_type, "Deleting record");
        self.api.delete_record(&request).await
    }

    /// Render the nsupdate script for `record` using the server's published settings
    pub async fn nsupdate(&self, zone: &str, key: &TsigKey, record: &DnsRecord) -> Result<String> {
        let server = self.api.server_config().await?;
        Ok(generate_nsupdate(record, zone, key, &server))
    }

    fn prepare(&self, zone: &str, key: &TsigKey, record: &DnsRecord) -> Result<RecordRequest> {
        if !record.is_editable() {
            tracing::warn!(zone, record_type = %record.record_type, "Rejected change of read-only record type");
            return Err(Error::invalid_input(format!(
                "record type {} cannot be changed (editable: A, AAAA)",
                record.record_type
            )));
        }

        let request = RecordRequest::new(record, zone, key);
        if request.name.is_empty() {
            return Err(Error::invalid_input("record name cannot be empty (use '@' for the zone apex)"));
        }

        Ok(request)
    }
}

impl std::fmt::Debug for RecordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordService").finish_non_exhaustive()
    }
}
