//! Shell snippets shown to users for copy-paste
//!
//! Nothing here validates its inputs; callers pass already checked values.

use url::Url;

use crate::error::Result;
use crate::models::{DnsRecord, ServerConfig, TsigKey};

/// Adds the external-dns Helm repository (needed once per machine)
pub const HELM_REPO_ADD_COMMAND: &str =
    "helm repo add external-dns https://kubernetes-sigs.github.io/external-dns/; helm repo update";

/// Token placeholder used when the caller has no API token yet
pub const TOKEN_PLACEHOLDER: &str = "insert_your_token";

/// Render an `nsupdate` script that replaces one record, followed by a `dig`
/// command to verify the result.
///
/// ```
/// use dynzones_core::commands::generate_nsupdate;
/// use dynzones_core::models::{DnsRecord, ServerConfig, TsigKey};
///
/// let record = DnsRecord::new("www", "A", 60, "127.1.2.3");
/// let key = TsigKey { keyname: "k".into(), algorithm: "hmac-sha256".into(), key: "secret".into() };
/// let server = ServerConfig { dns_server_address: "1.2.3.4".into(), dns_server_port: 53 };
///
/// let script = generate_nsupdate(&record, "example.com", &key, &server);
/// assert!(script.ends_with("dig @1.2.3.4 -p 53 www.example.com. A +short"));
/// ```
pub fn generate_nsupdate(
    record: &DnsRecord,
    zone: &str,
    key: &TsigKey,
    server: &ServerConfig,
) -> String {
    let fqdn = format!("{}.{}.", record.name, zone);
    let address = &server.dns_server_address;
    let port = server.dns_server_port;

    [
        "# Create/Update record in DNS".to_string(),
        format!(
            "nsupdate -y \"{}:{}:{}\" <<EOF",
            key.algorithm, key.keyname, key.key
        ),
        format!("server {address} {port}"),
        format!("zone {zone}"),
        format!(
            "update delete {fqdn} IN {} {}",
            record.record_type, record.value
        ),
        format!(
            "update add {fqdn} {} IN {} {}",
            record.ttl, record.record_type, record.value
        ),
        "send".to_string(),
        "EOF".to_string(),
        String::new(),
        "# Verify".to_string(),
        format!("dig @{address} -p {port} {fqdn} {} +short", record.record_type),
    ]
    .join("\n")
}

/// URL prefix of the external-dns artifacts of a zone; append `values.yaml`
/// or another part name.
pub fn external_dns_values_url(base_url: &Url, zone: &str) -> Result<Url> {
    Ok(base_url.join(&format!("v1/zones/{zone}?format=external-dns&part="))?)
}

/// One-liner that downloads the Helm values of a zone and installs external-dns
pub fn external_dns_helm_command(base_url: &Url, zone: &str, token: Option<&str>) -> Result<String> {
    let url = external_dns_values_url(base_url, zone)?;
    let token = token.unwrap_or(TOKEN_PLACEHOLDER);

    Ok(format!(
        "curl -H 'Authorization: Bearer {token}' '{url}values.yaml' | helm upgrade --install external-dns external-dns/external-dns -n external-dns -f -"
    ))
}

/// Endpoint listing the zones of the token owner
pub fn zones_endpoint(base_url: &Url) -> Result<Url> {
    Ok(base_url.join("/v1/zones/")?)
}

/// curl command calling `endpoint` with a bearer token
pub fn curl_command(endpoint: &Url, token: &str) -> String {
    format!("curl -H \"Authorization: Bearer {token}\" {endpoint}")
}
