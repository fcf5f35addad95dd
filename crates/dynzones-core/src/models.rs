//! Typed request and response structures of the remote API
//!
//! Required fields are plain fields and fail deserialization when absent;
//! optional ones are `Option` or carry a serde default. Shape errors
//! therefore surface at the client boundary instead of at each call site.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::record_name::normalize_record_name;
use crate::validation::{check_dns_name, check_user_filter, check_zone_pattern};

/// Record types that may be created, edited or deleted through the API
pub const EDITABLE_RECORD_TYPES: [&str; 2] = ["A", "AAAA"];

/// TSIG key authorizing dynamic updates of one zone
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsigKey {
    /// Key name
    pub keyname: String,
    /// HMAC algorithm (e.g. "hmac-sha256")
    pub algorithm: String,
    /// Base64 secret
    pub key: String,
}

// Custom Debug implementation that hides the secret
impl std::fmt::Debug for TsigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsigKey")
            .field("keyname", &self.keyname)
            .field("algorithm", &self.algorithm)
            .field("key", &"<REDACTED>")
            .finish()
    }
}

/// Name server settings published by the service as `config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address of the authoritative name server accepting updates
    pub dns_server_address: String,
    /// Port of the name server
    pub dns_server_port: u16,
}

impl ServerConfig {
    /// Load a server config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Zone entry of the zone list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSummary {
    /// Zone name
    pub name: String,
    /// Whether the caller already activated this zone
    #[serde(default)]
    pub exists: bool,
    /// Whether another user owns this zone
    #[serde(default)]
    pub already_taken_by_someone_else: bool,
}

/// What the caller can do with a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneStatus {
    /// Owned by someone else
    Taken,
    /// Activated by the caller
    Active,
    /// Allowed by policy but not yet activated
    Available,
}

impl ZoneSummary {
    /// Derive the zone status. Ownership by someone else wins over `exists`.
    pub fn status(&self) -> ZoneStatus {
        if self.already_taken_by_someone_else {
            ZoneStatus::Taken
        } else if self.exists {
            ZoneStatus::Active
        } else {
            ZoneStatus::Available
        }
    }
}

/// Response of `GET v1/zones`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonesResponse {
    /// Zones the caller may see
    pub zones: Vec<ZoneSummary>,
}

/// Zone name plus its update keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneData {
    /// Zone name
    pub zone: String,
    /// TSIG keys for this zone
    #[serde(default)]
    pub zone_keys: Vec<TsigKey>,
}

/// Response of `GET v1/zones/{zone}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneDetail {
    /// Zone and keys
    #[serde(rename = "zoneData")]
    pub zone_data: ZoneData,
    /// Ready-made external-dns Helm values
    #[serde(rename = "externalDnsValuesYaml", default)]
    pub external_dns_values_yaml: Option<String>,
    /// Ready-made external-dns Kubernetes secret
    #[serde(rename = "externalDnsSecretYaml", default)]
    pub external_dns_secret_yaml: Option<String>,
}

impl ZoneDetail {
    /// The key used for record management (the first one)
    pub fn primary_key(&self) -> Option<&TsigKey> {
        self.zone_data.zone_keys.first()
    }
}

/// DNS resource record as listed by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Record name (fully qualified from the API, relative after stripping)
    pub name: String,
    /// Record type ("A", "AAAA", "TXT", ...)
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time to live in seconds
    pub ttl: u32,
    /// Record data
    pub value: String,
}

impl DnsRecord {
    /// Create a record
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        ttl: u32,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            ttl,
            value: value.into(),
        }
    }

    /// Whether this record may be changed through the API
    pub fn is_editable(&self) -> bool {
        EDITABLE_RECORD_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&self.record_type))
    }
}

/// Response of `GET v1/dns/records`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsResponse {
    /// Records of the zone
    pub records: Vec<DnsRecord>,
}

/// Body of `POST v1/dns/records/create` and `POST v1/dns/records/delete`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRequest {
    /// Normalized relative name
    pub name: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time to live in seconds
    pub ttl: u32,
    /// Record data
    pub value: String,
    /// Zone the record belongs to
    pub zone: String,
    /// TSIG key name
    pub key_name: String,
    /// TSIG algorithm
    pub key_algorithm: String,
    /// TSIG secret
    pub key: String,
}

impl RecordRequest {
    /// Build a request body, normalizing the record name for the API
    pub fn new(record: &DnsRecord, zone: &str, key: &TsigKey) -> Self {
        Self {
            name: normalize_record_name(&record.name, zone),
            record_type: record.record_type.clone(),
            ttl: record.ttl,
            value: record.value.clone(),
            zone: zone.to_string(),
            key_name: key.keyname.clone(),
            key_algorithm: key.algorithm.clone(),
            key: key.key.clone(),
        }
    }
}

impl std::fmt::Debug for RecordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordRequest")
            .field("name", &self.name)
            .field("record_type", &self.record_type)
            .field("ttl", &self.ttl)
            .field("value", &self.value)
            .field("zone", &self.zone)
            .field("key_name", &self.key_name)
            .field("key_algorithm", &self.key_algorithm)
            .field("key", &"<REDACTED>")
            .finish()
    }
}

/// API token for non-interactive access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiToken {
    /// Token ID
    pub id: String,
    /// Bearer token value
    pub token_string: String,
    /// Read-only tokens cannot modify zones
    #[serde(default)]
    pub read_only: bool,
    /// Expiry as reported by the API
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Pick the token to embed in generated commands: the first read-only one,
/// else the first one.
pub fn preferred_token(tokens: &[ApiToken]) -> Option<&ApiToken> {
    tokens
        .iter()
        .find(|t| t.read_only)
        .or_else(|| tokens.first())
}

/// Response of `GET v1/tokens`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokensResponse {
    /// Tokens of the caller
    #[serde(default)]
    pub tokens: Vec<ApiToken>,
}

/// Body of `POST v1/tokens`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTokenRequest {
    /// Create a read-only token
    pub read_only: bool,
}

/// Response of `POST v1/tokens`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTokenResponse {
    /// The created token
    pub token: ApiToken,
}

/// Access policy rule: which users may create which zones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Rule ID
    pub id: String,
    /// Zone pattern, may contain `%u`
    pub zone_pattern: String,
    /// SOA name of the parent zone
    pub zone_soa: String,
    /// Users the rule applies to
    pub target_user_filter: String,
    /// Free text
    #[serde(default)]
    pub description: Option<String>,
}

impl PolicyRule {
    /// Case-insensitive substring match over the searchable fields.
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.zone_pattern.to_lowercase().contains(needle)
            || self.target_user_filter.to_lowercase().contains(needle)
            || self.zone_soa.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// Rules whose pattern, user filter, SOA or description contains `search`
/// (case-insensitive). An empty search matches every rule.
pub fn filter_rules<'a>(rules: &'a [PolicyRule], search: &str) -> Vec<&'a PolicyRule> {
    let needle = search.to_lowercase();
    rules.iter().filter(|r| r.matches(&needle)).collect()
}

/// Response of `GET v1/policies/rules`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesResponse {
    /// Active rules
    pub rules: Vec<PolicyRule>,
    /// Whether the caller may create, edit and delete rules
    #[serde(default)]
    pub edit_allowed: bool,
}

/// Body of `POST v1/policies/rules` and `PUT v1/policies/rules/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDraft {
    /// Zone pattern, may contain `%u`
    pub zone_pattern: String,
    /// SOA name of the parent zone
    pub zone_soa: String,
    /// Users the rule applies to
    pub target_user_filter: String,
    /// Free text, omitted when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RuleDraft {
    /// Create a draft
    pub fn new(
        zone_pattern: impl Into<String>,
        zone_soa: impl Into<String>,
        target_user_filter: impl Into<String>,
    ) -> Self {
        Self {
            zone_pattern: zone_pattern.into(),
            zone_soa: zone_soa.into(),
            target_user_filter: target_user_filter.into(),
            description: None,
        }
    }

    /// Set the description; an empty string clears it
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.is_empty()).then_some(description);
        self
    }

    /// Check all three fields before submission
    pub fn validate(&self) -> Result<()> {
        check_zone_pattern(&self.zone_pattern)
            .map_err(|e| Error::invalid_input(format!("zone pattern: {e}")))?;
        check_dns_name(&self.zone_soa)
            .map_err(|e| Error::invalid_input(format!("zone SOA: {e}")))?;
        check_user_filter(&self.target_user_filter)
            .map_err(|e| Error::invalid_input(format!("user filter: {e}")))?;
        Ok(())
    }
}

impl From<&PolicyRule> for RuleDraft {
    fn from(rule: &PolicyRule) -> Self {
        Self {
            zone_pattern: rule.zone_pattern.clone(),
            zone_soa: rule.zone_soa.clone(),
            target_user_filter: rule.target_user_filter.clone(),
            description: rule.description.clone(),
        }
    }
}
