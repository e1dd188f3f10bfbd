//! Wizard session state and the image slots it owns.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::PropertyCategory;
use crate::draft::PropertyDraft;
use crate::inventory::InventoryItem;

/// Full state of one onboarding wizard run.
///
/// The serialized field names match the stored draft layout
/// `{step, propertyForm, roomTypes, createdProperty, persistedRoomTypes}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSession {
    /// 1-based step index.
    #[serde(rename = "step")]
    pub current_step: usize,
    #[serde(rename = "propertyForm")]
    pub property_draft: PropertyDraft,
    #[serde(rename = "roomTypes", default)]
    pub room_types: Vec<InventoryItem>,
    #[serde(rename = "createdProperty", default)]
    pub persisted_parent_id: Option<String>,
    /// Backend ids of every inventory record known to exist remotely. Ids
    /// missing from `room_types` at submission are deleted.
    #[serde(rename = "persistedRoomTypes", default)]
    pub persisted_room_ids: BTreeSet<String>,
}

impl WizardSession {
    pub fn new(category: PropertyCategory) -> Self {
        Self {
            current_step: 1,
            property_draft: PropertyDraft::new(category),
            room_types: Vec::new(),
            persisted_parent_id: None,
            persisted_room_ids: BTreeSet::new(),
        }
    }

    pub fn category(&self) -> PropertyCategory {
        self.property_draft.category()
    }

    pub fn room_type(&self, local_id: Uuid) -> Option<&InventoryItem> {
        self.room_types.iter().find(|item| item.local_id == local_id)
    }

    pub fn room_type_mut(&mut self, local_id: Uuid) -> Option<&mut InventoryItem> {
        self.room_types
            .iter_mut()
            .find(|item| item.local_id == local_id)
    }
}

/// Where an uploaded image URL is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Cover,
    Gallery,
    RoomType(Uuid),
}
