// # Policy API Trait
//
// Access policy rules decide which users may create which zones. They are
// served by the self-service API, which may live on a different base URL
// than the zone API.

use async_trait::async_trait;

use crate::models::{RuleDraft, RulesResponse};

/// Trait for policy rule API implementations
///
/// Drafts are submitted as given; [`crate::service::PolicyService`] validates
/// them first.
#[async_trait]
pub trait PolicyApi: Send + Sync {
    /// List all rules and whether the caller may edit them
    async fn list_rules(&self) -> Result<RulesResponse, crate::Error>;

    /// Create a rule
    async fn create_rule(&self, draft: &RuleDraft) -> Result<(), crate::Error>;

    /// Replace the rule with the given ID
    async fn update_rule(&self, id: &str, draft: &RuleDraft) -> Result<(), crate::Error>;

    /// Delete the rule with the given ID
    async fn delete_rule(&self, id: &str) -> Result<(), crate::Error>;
}
