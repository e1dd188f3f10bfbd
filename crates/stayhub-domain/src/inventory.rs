//! Room, bed and unit types offered by a property.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, NamedEntity};

/// One bookable inventory type. `backend_id` is only present once the item
/// has been persisted remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub local_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub max_adults: u32,
    #[serde(default)]
    pub max_children: u32,
    #[serde(default = "InventoryItem::default_units")]
    pub total_units: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: BTreeSet<String>,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            backend_id: None,
            name: name.into(),
            max_adults: 2,
            max_children: 0,
            total_units: Self::default_units(),
            price,
            images: Vec::new(),
            amenities: BTreeSet::new(),
        }
    }

    pub fn with_backend_id(mut self, id: impl Into<String>) -> Self {
        self.backend_id = Some(id.into());
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.backend_id.is_some()
    }

    fn default_units() -> u32 {
        1
    }
}

impl NamedEntity for InventoryItem {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for InventoryItem {
    fn display_label(&self) -> String {
        let id = self
            .backend_id
            .clone()
            .unwrap_or_else(|| "unsaved".to_string());
        format!(
            "{} x{} @ {:.2} ({} photos) [{}]",
            self.name,
            self.total_units,
            self.price,
            self.images.len(),
            id
        )
    }
}
