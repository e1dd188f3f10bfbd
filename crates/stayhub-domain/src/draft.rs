//! The in-progress property record edited by the onboarding wizard.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::category::{CategoryDetails, PropertyCategory};
use crate::common::{Address, Displayable, GeoPoint, NamedEntity};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Policies {
    /// Check-in time as `HH:MM` (24-hour).
    pub check_in_time: Option<String>,
    /// Check-out time as `HH:MM` (24-hour).
    pub check_out_time: Option<String>,
    pub cancellation_policy: Option<String>,
    pub house_rules: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub otp_verified: bool,
}

/// An uploaded supporting document (ownership proof, licence, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub file_url: String,
}

impl Document {
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        file_url: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            file_url: file_url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPlace {
    pub name: String,
    pub location: GeoPoint,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub travel_minutes: Option<u32>,
}

impl NamedEntity for NearbyPlace {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for NearbyPlace {
    fn display_label(&self) -> String {
        match (self.distance_km, self.travel_minutes) {
            (Some(km), Some(minutes)) => format!("{} ({km:.1} km, {minutes} min)", self.name),
            (Some(km), None) => format!("{} ({km:.1} km)", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Fields shared by every property category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftBase {
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub address: Address,
    pub location: Option<GeoPoint>,
    pub amenities: BTreeSet<String>,
    pub policies: Policies,
    pub nearby_places: Vec<NearbyPlace>,
    pub documents: Vec<Document>,
    pub cover_image: Option<String>,
    pub gallery: Vec<String>,
    pub contact: Contact,
}

/// A property draft: the common base plus category-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    #[serde(flatten)]
    pub base: DraftBase,
    pub details: CategoryDetails,
}

impl PropertyDraft {
    pub fn new(category: PropertyCategory) -> Self {
        Self {
            base: DraftBase::default(),
            details: CategoryDetails::empty(category),
        }
    }

    pub fn category(&self) -> PropertyCategory {
        self.details.category()
    }
}

impl NamedEntity for PropertyDraft {
    fn name(&self) -> &str {
        &self.base.name
    }
}

impl Displayable for PropertyDraft {
    fn display_label(&self) -> String {
        let name = if self.base.name.trim().is_empty() {
            "(untitled)"
        } else {
            self.base.name.trim()
        };
        format!("{} [{}]", name, self.category())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::VillaDetails;

    #[test]
    fn draft_json_flattens_base_fields() {
        let mut draft = PropertyDraft::new(PropertyCategory::Villa);
        draft.base.name = "Casa Azul".into();
        draft.base.amenities.insert("pool".into());
        draft.details = CategoryDetails::Villa(VillaDetails {
            bedrooms: 3,
            bathrooms: 2,
            max_guests: 6,
        });

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["name"], "Casa Azul");
        assert_eq!(json["details"]["type"], "villa");
        assert_eq!(json["details"]["maxGuests"], 6);

        let back: PropertyDraft = serde_json::from_value(json).unwrap();
        assert_eq!(back, draft);
    }

    #[test]
    fn document_uses_type_key() {
        let doc = Document::new("ownership", "deed.pdf", "https://cdn/deed.pdf");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "ownership");
        assert_eq!(json["fileUrl"], "https://cdn/deed.pdf");
    }

    #[test]
    fn display_label_handles_untitled_drafts() {
        let draft = PropertyDraft::new(PropertyCategory::Pg);
        assert_eq!(draft.display_label(), "(untitled) [PG]");
    }
}
