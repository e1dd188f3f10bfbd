//! Shapes returned by the marketplace REST backend.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::PropertyCategory;
use crate::common::{Displayable, GeoPoint};
use crate::draft::PropertyDraft;
use crate::inventory::InventoryItem;
use crate::session::WizardSession;

/// A persisted property as returned by `GET /properties/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub draft: PropertyDraft,
    #[serde(default)]
    pub room_types: Vec<RoomTypeRecord>,
    #[serde(default)]
    pub status: Option<String>,
}

impl PropertyRecord {
    /// Builds an edit-mode wizard session hydrated from this record.
    pub fn into_session(self) -> WizardSession {
        let persisted_room_ids = self.room_types.iter().map(|room| room.id.clone()).collect();
        WizardSession {
            current_step: 1,
            property_draft: self.draft,
            room_types: self
                .room_types
                .into_iter()
                .map(RoomTypeRecord::into_item)
                .collect(),
            persisted_parent_id: Some(self.id),
            persisted_room_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub max_adults: u32,
    #[serde(default)]
    pub max_children: u32,
    #[serde(default)]
    pub total_units: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: BTreeSet<String>,
}

impl RoomTypeRecord {
    pub fn into_item(self) -> InventoryItem {
        InventoryItem {
            local_id: Uuid::new_v4(),
            backend_id: Some(self.id),
            name: self.name,
            max_adults: self.max_adults,
            max_children: self.max_children,
            total_units: self.total_units.max(1),
            price: self.price,
            images: self.images,
            amenities: self.amenities,
        }
    }
}

/// Row of the "My Properties" listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(alias = "propertyType")]
    pub category: PropertyCategory,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl Displayable for PropertySummary {
    fn display_label(&self) -> String {
        let mut label = format!("{} [{}]", self.name, self.category);
        if let Some(city) = self.city.as_deref().filter(|c| !c.is_empty()) {
            label.push_str(" - ");
            label.push_str(city);
        }
        if let Some(status) = self.status.as_deref() {
            label.push_str(&format!(" ({status})"));
        }
        label
    }
}

/// Autocomplete suggestion from `GET /places/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePrediction {
    #[serde(default)]
    pub place_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub location: GeoPoint,
}

/// Travel metrics from `GET /distance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceInfo {
    pub distance_meters: u64,
    pub duration_seconds: u64,
}

impl DistanceInfo {
    pub fn distance_km(&self) -> f64 {
        self.distance_meters as f64 / 1000.0
    }

    /// Duration rounded up to whole minutes.
    pub fn travel_minutes(&self) -> u32 {
        self.duration_seconds.div_ceil(60) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_hydrates_edit_session() {
        let json = serde_json::json!({
            "_id": "prop_42",
            "name": "Sea Breeze",
            "shortDescription": "Beachfront rooms",
            "details": { "type": "hotel", "starRating": 3 },
            "roomTypes": [
                { "_id": "rt_1", "name": "Standard", "price": 2500.0, "totalUnits": 0 }
            ]
        });
        let record: PropertyRecord = serde_json::from_value(json).unwrap();
        let session = record.into_session();

        assert_eq!(session.persisted_parent_id.as_deref(), Some("prop_42"));
        assert_eq!(session.category(), PropertyCategory::Hotel);
        assert_eq!(session.property_draft.base.name, "Sea Breeze");
        assert_eq!(session.room_types.len(), 1);
        assert_eq!(session.room_types[0].backend_id.as_deref(), Some("rt_1"));
        assert_eq!(session.room_types[0].total_units, 1);
        assert!(session.persisted_room_ids.contains("rt_1"));
    }

    #[test]
    fn distance_conversions() {
        let info = DistanceInfo {
            distance_meters: 2450,
            duration_seconds: 61,
        };
        assert!((info.distance_km() - 2.45).abs() < f64::EPSILON);
        assert_eq!(info.travel_minutes(), 2);
    }
}
