//! Core traits for the Dynamic Zones client
//!
//! These are the seams to the remote REST API:
//!
//! - [`DynDnsApi`]: zones, records, tokens and name server settings
//! - [`PolicyApi`]: access policy rules of the self-service API

pub mod dyndns_api;
pub mod policy_api;

pub use dyndns_api::DynDnsApi;
pub use policy_api::PolicyApi;
