// # Dynamic Zones HTTP Client
//
// reqwest-based implementations of the `dynzones-core` API traits.
//
// - `HttpDynDnsApi`: zones, records, tokens and `config.json`
// - `HttpPolicyApi`: policy rules of the self-service API
//
// ## Behavior
//
// - One HTTP request per call, no retries, no caching
// - 30 second timeout unless configured otherwise
// - Bearer token taken from the shared `Session` on every request
// - Status codes mapped to `dynzones_core::Error` (401/403, 404, 429, other)
//
// ## Security
//
// - Access tokens and TSIG secrets never appear in logs or Debug output

mod http;

pub mod dyndns;
pub mod policy;

pub use dyndns::HttpDynDnsApi;
pub use http::DEFAULT_HTTP_TIMEOUT;
pub use policy::HttpPolicyApi;
