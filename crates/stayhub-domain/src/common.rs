//! Shared traits and location primitives used across drafts and remote records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` when both components are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Postal address as collected by the location step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
}

impl Address {
    /// Merges non-empty fields from `other`, keeping existing values otherwise.
    pub fn merge_from(&mut self, other: &Address) {
        fn take(target: &mut String, source: &str) {
            if !source.trim().is_empty() {
                *target = source.trim().to_string();
            }
        }
        take(&mut self.line1, &other.line1);
        take(&mut self.line2, &other.line2);
        take(&mut self.city, &other.city);
        take(&mut self.state, &other.state);
        take(&mut self.pincode, &other.pincode);
        take(&mut self.country, &other.country);
    }

    pub fn one_line(&self) -> String {
        [
            self.line1.as_str(),
            self.line2.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.pincode.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_existing_values_for_blank_fields() {
        let mut address = Address {
            line1: "12 Beach Road".into(),
            city: "Goa".into(),
            ..Address::default()
        };
        let lookup = Address {
            city: "Panaji".into(),
            state: "Goa".into(),
            ..Address::default()
        };
        address.merge_from(&lookup);
        assert_eq!(address.line1, "12 Beach Road");
        assert_eq!(address.city, "Panaji");
        assert_eq!(address.state, "Goa");
        assert_eq!(address.one_line(), "12 Beach Road, Panaji, Goa");
    }

    #[test]
    fn geo_point_bounds() {
        assert!(GeoPoint::new(15.49, 73.82).is_valid());
        assert!(!GeoPoint::new(120.0, 0.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }
}
