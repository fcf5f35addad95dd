//! Test doubles shared by the contract tests
//!
//! The mocks record every request they receive. Clones share state, so a
//! test can hand one clone to a service and inspect another.

#![allow(dead_code)]

use async_trait::async_trait;
use dynzones_core::error::{Error, Result};
use dynzones_core::models::{
    ApiToken, DnsRecord, RecordRequest, RecordsResponse, RuleDraft, RulesResponse, ServerConfig,
    TsigKey, ZoneData, ZoneDetail, ZoneSummary, ZonesResponse,
};
use dynzones_core::traits::{DynDnsApi, PolicyApi};
use std::sync::{Arc, Mutex};

/// A TSIG key for tests
pub fn test_key() -> TsigKey {
    TsigKey {
        keyname: "test-key".to_string(),
        algorithm: "hmac-sha256".to_string(),
        key: "c2VjcmV0".to_string(),
    }
}

/// In-memory stand-in for the zone API
#[derive(Clone, Default)]
pub struct MockDynDnsApi {
    /// Records returned by `list_records`, names fully qualified
    records: Arc<Mutex<Vec<DnsRecord>>>,
    /// Bodies received by `create_record`
    created: Arc<Mutex<Vec<RecordRequest>>>,
    /// Bodies received by `delete_record`
    deleted: Arc<Mutex<Vec<RecordRequest>>>,
}

impl MockDynDnsApi {
    /// Create a mock listing the given records
    pub fn with_records(records: Vec<DnsRecord>) -> Self {
        let mock = Self::default();
        *mock.records.lock().unwrap() = records;
        mock
    }

    /// Requests received by `create_record`
    pub fn created(&self) -> Vec<RecordRequest> {
        self.created.lock().unwrap().clone()
    }

    /// Requests received by `delete_record`
    pub fn deleted(&self) -> Vec<RecordRequest> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl DynDnsApi for MockDynDnsApi {
    async fn server_config(&self) -> Result<ServerConfig> {
        Ok(ServerConfig {
            dns_server_address: "192.0.2.53".to_string(),
            dns_server_port: 53,
        })
    }

    async fn list_zones(&self) -> Result<ZonesResponse> {
        Ok(ZonesResponse {
            zones: vec![ZoneSummary {
                name: "alice.users.example.com".to_string(),
                exists: true,
                already_taken_by_someone_else: false,
            }],
        })
    }

    async fn get_zone(&self, zone: &str) -> Result<ZoneDetail> {
        Ok(ZoneDetail {
            zone_data: ZoneData {
                zone: zone.to_string(),
                zone_keys: vec![test_key()],
            },
            external_dns_values_yaml: None,
            external_dns_secret_yaml: None,
        })
    }

    async fn activate_zone(&self, _zone: &str) -> Result<()> {
        Ok(())
    }

    async fn delete_zone(&self, zone: &str) -> Result<()> {
        Err(Error::not_found(zone))
    }

    async fn list_records(&self, _zone: &str, _key: &TsigKey) -> Result<RecordsResponse> {
        Ok(RecordsResponse {
            records: self.records.lock().unwrap().clone(),
        })
    }

    async fn create_record(&self, request: &RecordRequest) -> Result<()> {
        self.created.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn delete_record(&self, request: &RecordRequest) -> Result<()> {
        self.deleted.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>> {
        Ok(Vec::new())
    }

    async fn create_token(&self, read_only: bool) -> Result<ApiToken> {
        Ok(ApiToken {
            id: "1".to_string(),
            token_string: "tok".to_string(),
            read_only,
            expires_at: None,
        })
    }

    async fn delete_token(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}

/// Policy call as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyCall {
    Create(RuleDraft),
    Update(String, RuleDraft),
    Delete(String),
}

/// In-memory stand-in for the policy API
#[derive(Clone, Default)]
pub struct MockPolicyApi {
    calls: Arc<Mutex<Vec<PolicyCall>>>,
}

impl MockPolicyApi {
    /// Calls received so far
    pub fn calls(&self) -> Vec<PolicyCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PolicyApi for MockPolicyApi {
    async fn list_rules(&self) -> Result<RulesResponse> {
        Ok(RulesResponse {
            rules: Vec::new(),
            edit_allowed: true,
        })
    }

    async fn create_rule(&self, draft: &RuleDraft) -> Result<()> {
        self.calls.lock().unwrap().push(PolicyCall::Create(draft.clone()));
        Ok(())
    }

    async fn update_rule(&self, id: &str, draft: &RuleDraft) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(PolicyCall::Update(id.to_string(), draft.clone()));
        Ok(())
    }

    async fn delete_rule(&self, id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(PolicyCall::Delete(id.to_string()));
        Ok(())
    }
}
