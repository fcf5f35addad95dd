//! HTTP implementation of [`DynDnsApi`]
//!
//! ## API Reference
//!
//! - Name server settings: GET `config.json`
//! - Zones: GET `v1/zones`, GET/POST/DELETE `v1/zones/:zone`
//! - Records: GET `v1/dns/records?zone=...` (TSIG key in `X-DNS-Key*` headers),
//!   POST `v1/dns/records/create`, POST `v1/dns/records/delete`
//! - Tokens: GET/POST `v1/tokens`, DELETE `v1/tokens/:id`

use async_trait::async_trait;
use dynzones_core::models::{
    ApiToken, CreateTokenRequest, CreateTokenResponse, RecordRequest, RecordsResponse,
    ServerConfig, TokensResponse, TsigKey, ZoneDetail, ZonesResponse,
};
use dynzones_core::{AppConfig, DynDnsApi, Result, Session};
use reqwest::Method;
use std::time::Duration;
use url::Url;

use crate::http::{ApiClient, DEFAULT_HTTP_TIMEOUT};

/// Header carrying the TSIG key name on record listing
pub const KEY_NAME_HEADER: &str = "X-DNS-Key-Name";
/// Header carrying the TSIG algorithm on record listing
pub const KEY_ALGORITHM_HEADER: &str = "X-DNS-Key-Algorithm";
/// Header carrying the TSIG secret on record listing
pub const KEY_HEADER: &str = "X-DNS-Key";

/// Dynamic Zones API over HTTP
///
/// The Debug implementation does not expose the session token.
#[derive(Debug, Clone)]
pub struct HttpDynDnsApi {
    http: ApiClient,
}

impl HttpDynDnsApi {
    /// Create a client for the API at `base_url` (must end with '/')
    pub fn new(base_url: Url, session: Session) -> Result<Self> {
        Self::with_timeout(base_url, session, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: Url, session: Session, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: ApiClient::new(base_url, session, timeout)?,
        })
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &AppConfig, session: Session) -> Result<Self> {
        Self::with_timeout(
            config.api_base_url.clone(),
            session,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Base URL of the API
    pub fn base_url(&self) -> &Url {
        self.http.base_url()
    }
}

#[async_trait]
impl DynDnsApi for HttpDynDnsApi {
    async fn server_config(&self) -> Result<ServerConfig> {
        let request = self.http.request(Method::GET, "config.json").await?;
        self.http.send_json(request, "server config").await
    }

    async fn list_zones(&self) -> Result<ZonesResponse> {
        let request = self.http.request(Method::GET, "v1/zones").await?;
        self.http.send_json(request, "zone list").await
    }

    async fn get_zone(&self, zone: &str) -> Result<ZoneDetail> {
        let request = self
            .http
            .request(Method::GET, &format!("v1/zones/{zone}"))
            .await?;
        self.http.send_json(request, &format!("zone {zone}")).await
    }

    async fn activate_zone(&self, zone: &str) -> Result<()> {
        let request = self
            .http
            .request(Method::POST, &format!("v1/zones/{zone}"))
            .await?;
        self.http.send(request, &format!("activate zone {zone}")).await?;
        tracing::info!(zone, "Zone activated");
        Ok(())
    }

    async fn delete_zone(&self, zone: &str) -> Result<()> {
        let request = self
            .http
            .request(Method::DELETE, &format!("v1/zones/{zone}"))
            .await?;
        self.http.send(request, &format!("delete zone {zone}")).await?;
        tracing::info!(zone, "Zone deleted");
        Ok(())
    }

    async fn list_records(&self, zone: &str, key: &TsigKey) -> Result<RecordsResponse> {
        let request = self
            .http
            .request(Method::GET, "v1/dns/records")
            .await?
            .query(&[("zone", zone)])
            .header(KEY_NAME_HEADER, &key.keyname)
            .header(KEY_ALGORITHM_HEADER, &key.algorithm)
            .header(KEY_HEADER, &key.key);
        self.http
            .send_json(request, &format!("records of zone {zone}"))
            .await
    }

    async fn create_record(&self, request: &RecordRequest) -> Result<()> {
        let builder = self
            .http
            .request(Method::POST, "v1/dns/records/create")
            .await?
            .json(request);
        self.http
            .send(builder, &format!("create record {} in {}", request.name, request.zone))
            .await?;
        Ok(())
    }

    async fn delete_record(&self, request: &RecordRequest) -> Result<()> {
        let builder = self
            .http
            .request(Method::POST, "v1/dns/records/delete")
            .await?
            .json(request);
        self.http
            .send(builder, &format!("delete record {} in {}", request.name, request.zone))
            .await?;
        Ok(())
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>> {
        let request = self.http.request(Method::GET, "v1/tokens").await?;
        let response: TokensResponse = self.http.send_json(request, "token list").await?;
        Ok(response.tokens)
    }

    async fn create_token(&self, read_only: bool) -> Result<ApiToken> {
        let request = self
            .http
            .request(Method::POST, "v1/tokens")
            .await?
            .json(&CreateTokenRequest { read_only });
        let response: CreateTokenResponse = self.http.send_json(request, "create token").await?;
        tracing::info!(id = %response.token.id, read_only, "API token created");
        Ok(response.token)
    }

    async fn delete_token(&self, id: &str) -> Result<()> {
        let request = self
            .http
            .request(Method::DELETE, &format!("v1/tokens/{id}"))
            .await?;
        self.http.send(request, &format!("token {id}")).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynzones_core::models::DnsRecord;
    use dynzones_core::{Error, RecordService, SessionUser};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key() -> TsigKey {
        TsigKey {
            keyname: "alice-key".to_string(),
            algorithm: "hmac-sha256".to_string(),
            key: "c2VjcmV0".to_string(),
        }
    }

    async fn create_test_api(mock_server: &MockServer) -> HttpDynDnsApi {
        let base = Url::parse(&format!("{}/", mock_server.uri())).unwrap();
        let session = Session::with_user(SessionUser::new("test-token"));
        HttpDynDnsApi::new(base, session).unwrap()
    }

    #[tokio::test]
    async fn test_list_records_sends_key_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/dns/records"))
            .and(query_param("zone", "alice.users.example.com"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("x-dns-key-name", "alice-key"))
            .and(header("x-dns-key-algorithm", "hmac-sha256"))
            .and(header("x-dns-key", "c2VjcmV0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [
                    { "name": "www.alice.users.example.com.", "type": "A", "ttl": 60, "value": "192.0.2.1" }
                ]
            })))
            .mount(&mock_server)
            .await;

        let api = create_test_api(&mock_server).await;
        let response = api
            .list_records("alice.users.example.com", &key())
            .await
            .unwrap();

        assert_eq!(response.records.len(), 1);
        assert_eq!(response.records[0].name, "www.alice.users.example.com.");
    }

    #[tokio::test]
    async fn test_record_service_posts_normalized_name() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/dns/records/create"))
            .and(body_json(json!({
                "name": "@",
                "type": "A",
                "ttl": 300,
                "value": "192.0.2.9",
                "zone": "alice.users.example.com",
                "key_name": "alice-key",
                "key_algorithm": "hmac-sha256",
                "key": "c2VjcmV0"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = RecordService::new(Box::new(create_test_api(&mock_server).await));
        service
            .upsert(
                "alice.users.example.com",
                &key(),
                &DnsRecord::new("alice.users.example.com.", "A", 300, "192.0.2.9"),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_zone_detail_and_activation() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/zones/alice.users.example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "zoneData": {
                    "zone": "alice.users.example.com",
                    "zone_keys": [{ "keyname": "alice-key", "algorithm": "hmac-sha256", "key": "c2VjcmV0" }]
                }
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/zones/bob.users.example.com"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = create_test_api(&mock_server).await;

        let detail = api.get_zone("alice.users.example.com").await.unwrap();
        assert_eq!(detail.primary_key(), Some(&key()));

        api.activate_zone("bob.users.example.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_tokens() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/tokens"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tokens": [
                    { "id": "1", "token_string": "rw", "read_only": false },
                    { "id": "2", "token_string": "ro", "read_only": true, "expires_at": "2027-01-01T00:00:00Z" }
                ]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/tokens"))
            .and(body_json(json!({ "read_only": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": { "id": "3", "token_string": "new", "read_only": true }
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/v1/tokens/3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = create_test_api(&mock_server).await;

        let tokens = api.list_tokens().await.unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(
            dynzones_core::models::preferred_token(&tokens).map(|t| t.token_string.as_str()),
            Some("ro")
        );

        let created = api.create_token(true).await.unwrap();
        assert_eq!(created.id, "3");

        api.delete_token("3").await.unwrap();
    }

    #[tokio::test]
    async fn test_server_config() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/config.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "dns_server_address": "192.0.2.53",
                "dns_server_port": 53
            })))
            .mount(&mock_server)
            .await;

        let api = create_test_api(&mock_server).await;
        let config = api.server_config().await.unwrap();
        assert_eq!(config.dns_server_address, "192.0.2.53");
        assert_eq!(config.dns_server_port, 53);
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/zones"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/zones/missing.example.com"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/v1/zones/busy.example.com"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
            .mount(&mock_server)
            .await;

        let api = create_test_api(&mock_server).await;

        assert!(matches!(api.list_zones().await, Err(Error::Authentication(_))));
        assert!(matches!(
            api.get_zone("missing.example.com").await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            api.delete_zone("busy.example.com").await,
            Err(Error::Api { status: 500, message }) if message.contains("backend down")
        ));
    }

    #[tokio::test]
    async fn test_malformed_response_is_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/zones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&mock_server)
            .await;

        let api = create_test_api(&mock_server).await;
        assert!(matches!(api.list_zones().await, Err(Error::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_anonymous_session_sends_no_authorization() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/zones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "zones": [] })))
            .mount(&mock_server)
            .await;

        let session = Session::new();
        let base = Url::parse(&format!("{}/", mock_server.uri())).unwrap();
        let api = HttpDynDnsApi::new(base, session.clone()).unwrap();

        api.list_zones().await.unwrap();
        session.login(SessionUser::new("later-token")).await;
        api.list_zones().await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].headers.get("authorization").is_none());
        assert_eq!(
            requests[1].headers.get("authorization").unwrap(),
            "Bearer later-token"
        );
    }
}
