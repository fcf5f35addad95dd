//! Policy rule management
//!
//! Drafts are validated locally before they reach the API. Listing and
//! deleting pass straight through.

use crate::error::Result;
use crate::models::{RuleDraft, RulesResponse};
use crate::traits::PolicyApi;

/// Policy workflows on top of a [`PolicyApi`]
pub struct PolicyService {
    api: Box<dyn PolicyApi>,
}

impl PolicyService {
    /// Create a service using the given API
    pub fn new(api: Box<dyn PolicyApi>) -> Self {
        Self { api }
    }

    /// List rules and the caller's edit permission
    pub async fn list(&self) -> Result<RulesResponse> {
        self.api.list_rules().await
    }

    /// Create a rule (`id` is `None`) or replace an existing one
    pub async fn save(&self, id: Option<&str>, draft: &RuleDraft) -> Result<()> {
        if let Err(e) = draft.validate() {
            tracing::warn!(error = %e, "Rejected policy rule before submission");
            return Err(e);
        }

        match id {
            Some(id) => {
                tracing::info!(id, zone_pattern = %draft.zone_pattern, "Updating policy rule");
                self.api.update_rule(id, draft).await
            }
            None => {
                tracing::info!(zone_pattern = %draft.zone_pattern, "Creating policy rule");
                self.api.create_rule(draft).await
            }
        }
    }

    /// Delete a rule
    pub async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!(id, "Deleting policy rule");
        self.api.delete_rule(id).await
    }
}

impl std::fmt::Debug for PolicyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyService").finish_non_exhaustive()
    }
}
