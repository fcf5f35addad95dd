//! Workflows combining the API traits with validation and name conversion
//!
//! - [`RecordService`]: record listing and editing for one zone key
//! - [`PolicyService`]: policy rule management

pub mod policy;
pub mod records;

pub use policy::PolicyService;
pub use records::RecordService;
