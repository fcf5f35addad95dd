// # dynzones-core
//
// Core library for the Dynamic Zones DNS self-service client.
//
// ## Architecture Overview
//
// - **validation**: syntax gates for zone patterns, SOA names and user filters
// - **record_name**: record name conversion between display and API form
// - **commands**: nsupdate, external-dns and curl snippets for copy-paste
// - **models**: typed request/response structures of the REST API
// - **session**: explicit authentication context with login/refresh/logout
// - **DynDnsApi / PolicyApi**: traits for the remote API
// - **RecordService / PolicyService**: workflows tying the pieces together
//
// ## Design Principles
//
// 1. **Pure core**: validation, name conversion and command generation do no I/O
// 2. **Typed boundary**: API responses are checked when decoded, not at each use
// 3. **Explicit context**: configuration and session are passed, never global
// 4. **Library-First**: the CLI is a thin layer over this crate

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod record_name;
pub mod service;
pub mod session;
pub mod traits;
pub mod validation;

// Re-export core types for convenience
pub use commands::generate_nsupdate;
pub use config::{AppConfig, OidcConfig};
pub use error::{Error, NameError, Result};
pub use record_name::{normalize_record_name, strip_zone};
pub use service::{PolicyService, RecordService};
pub use session::{Session, SessionUser};
pub use traits::{DynDnsApi, PolicyApi};
pub use validation::{is_valid_dns_name, is_valid_user_filter, is_valid_zone_pattern};
