//! "My Properties" listing.

use std::sync::Arc;

use stayhub_domain::PropertySummary;
use tracing::{info, warn};

use crate::draft_store::{DraftKey, DraftStore};
use crate::gateway::PropertyGateway;
use crate::CoreError;

pub struct ListingService {
    properties: Arc<dyn PropertyGateway>,
    drafts: Arc<dyn DraftStore>,
    draft_prefix: String,
}

impl ListingService {
    pub fn new(
        properties: Arc<dyn PropertyGateway>,
        drafts: Arc<dyn DraftStore>,
        draft_prefix: impl Into<String>,
    ) -> Self {
        Self {
            properties,
            drafts,
            draft_prefix: draft_prefix.into(),
        }
    }

    pub async fn list(&self) -> Result<Vec<PropertySummary>, CoreError> {
        let mut properties = self.properties.list_my_properties().await?;
        properties.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(properties)
    }

    /// Deletes the property remotely, then drops any local edit draft for it.
    pub async fn delete(&self, property_id: &str) -> Result<(), CoreError> {
        self.properties.delete_property(property_id).await?;
        let key = DraftKey::existing(&self.draft_prefix, property_id);
        if let Err(err) = self.drafts.remove(&key) {
            warn!(key = %key, error = %err, "failed to remove local draft of deleted property");
        }
        info!(property_id, "property deleted");
        Ok(())
    }
}
