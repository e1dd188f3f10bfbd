//! Submission of a wizard session to the backend.
//!
//! The parent property is written first, then its documents, then every
//! inventory item (update when it already has a backend id, create
//! otherwise). Items that were persisted before but are no longer part of the
//! session are deleted last. Progress is recorded as each call succeeds so a
//! failed run can be resumed without creating duplicates.

use std::collections::BTreeSet;

use stayhub_domain::{InventoryItem, PropertyDraft};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::gateway::PropertyGateway;
use crate::CoreError;

/// Everything the reconciler needs to know about one submission.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionPlan<'a> {
    pub draft: &'a PropertyDraft,
    pub room_types: &'a [InventoryItem],
    pub persisted_parent_id: Option<&'a str>,
    /// Backend ids of inventory items that existed when editing started.
    pub previously_persisted: &'a BTreeSet<String>,
}

/// Calls that have already succeeded in the current submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionProgress {
    pub parent_id: Option<String>,
    pub parent_created: bool,
    pub documents_synced: bool,
    /// Local id to new backend id for every created item.
    pub created: Vec<(Uuid, String)>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub property_id: String,
    pub parent_created: bool,
    pub created: Vec<(Uuid, String)>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
}

pub struct Reconciler<'a> {
    gateway: &'a dyn PropertyGateway,
}

impl<'a> Reconciler<'a> {
    pub fn new(gateway: &'a dyn PropertyGateway) -> Self {
        Self { gateway }
    }

    /// Runs the submission sequence, stopping at the first failure.
    ///
    /// On error `progress` still describes every call that succeeded. Nothing
    /// is rolled back.
    #[instrument(skip_all, fields(parent = ?plan.persisted_parent_id, items = plan.room_types.len()))]
    pub async fn submit(
        &self,
        plan: &SubmissionPlan<'_>,
        progress: &mut SubmissionProgress,
    ) -> Result<SubmissionOutcome, CoreError> {
        let property_id = match plan.persisted_parent_id {
            Some(id) => {
                self.gateway.update_property(id, plan.draft).await?;
                debug!(property_id = id, "updated property");
                id.to_string()
            }
            None => {
                let id = self.gateway.create_property(plan.draft).await?;
                progress.parent_created = true;
                debug!(property_id = %id, "created property");
                id
            }
        };
        progress.parent_id = Some(property_id.clone());

        self.gateway
            .upsert_documents(&property_id, &plan.draft.base.documents)
            .await?;
        progress.documents_synced = true;

        for item in plan.room_types {
            match item.backend_id.as_deref() {
                Some(room_type_id) => {
                    self.gateway
                        .update_room_type(&property_id, room_type_id, item)
                        .await?;
                    progress.updated.push(room_type_id.to_string());
                }
                None => {
                    let room_type_id = self.gateway.create_room_type(&property_id, item).await?;
                    progress.created.push((item.local_id, room_type_id));
                }
            }
        }

        for stale in stale_room_types(plan.previously_persisted, plan.room_types) {
            self.gateway.delete_room_type(&property_id, &stale).await?;
            progress.deleted.push(stale);
        }

        info!(
            property_id = %property_id,
            created = progress.created.len(),
            updated = progress.updated.len(),
            deleted = progress.deleted.len(),
            "submission reconciled"
        );
        Ok(SubmissionOutcome {
            property_id,
            parent_created: progress.parent_created,
            created: progress.created.clone(),
            updated: progress.updated.clone(),
            deleted: progress.deleted.clone(),
        })
    }
}

/// Previously persisted ids that no current item references, in sorted order.
pub fn stale_room_types(
    previously_persisted: &BTreeSet<String>,
    room_types: &[InventoryItem],
) -> Vec<String> {
    let referenced: BTreeSet<&str> = room_types
        .iter()
        .filter_map(|item| item.backend_id.as_deref())
        .collect();
    previously_persisted
        .iter()
        .filter(|id| !referenced.contains(id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_items_are_stale() {
        let before: BTreeSet<String> = ["rt_a", "rt_b", "rt_c"].map(String::from).into();
        let items = vec![
            InventoryItem::new("A", 1000.0).with_backend_id("rt_a"),
            InventoryItem::new("C", 3000.0).with_backend_id("rt_c"),
            InventoryItem::new("D", 4000.0),
        ];
        assert_eq!(stale_room_types(&before, &items), vec!["rt_b".to_string()]);
    }

    #[test]
    fn nothing_is_stale_for_new_properties() {
        let items = vec![InventoryItem::new("Dorm", 600.0)];
        assert!(stale_room_types(&BTreeSet::new(), &items).is_empty());
    }
}
