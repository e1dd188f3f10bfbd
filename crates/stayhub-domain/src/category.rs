//! Property categories and their category-specific configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Enumerates the kinds of property a partner can list.
pub enum PropertyCategory {
    Hotel,
    Resort,
    Villa,
    Hostel,
    Pg,
    Homestay,
}

impl PropertyCategory {
    pub const ALL: [PropertyCategory; 6] = [
        PropertyCategory::Hotel,
        PropertyCategory::Resort,
        PropertyCategory::Villa,
        PropertyCategory::Hostel,
        PropertyCategory::Pg,
        PropertyCategory::Homestay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyCategory::Hotel => "hotel",
            PropertyCategory::Resort => "resort",
            PropertyCategory::Villa => "villa",
            PropertyCategory::Hostel => "hostel",
            PropertyCategory::Pg => "pg",
            PropertyCategory::Homestay => "homestay",
        }
    }

    /// Noun used in messages about this category's inventory items.
    pub fn inventory_noun(self) -> &'static str {
        match self {
            PropertyCategory::Hotel | PropertyCategory::Resort | PropertyCategory::Homestay => {
                "room type"
            }
            PropertyCategory::Villa => "unit",
            PropertyCategory::Hostel => "dorm",
            PropertyCategory::Pg => "sharing option",
        }
    }

    /// Minimum number of photos each inventory item must carry.
    pub fn min_inventory_images(self) -> usize {
        match self {
            PropertyCategory::Villa => 4,
            PropertyCategory::Hotel | PropertyCategory::Resort => 3,
            PropertyCategory::Hostel | PropertyCategory::Pg | PropertyCategory::Homestay => 2,
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PropertyCategory::Hotel => "Hotel",
            PropertyCategory::Resort => "Resort",
            PropertyCategory::Villa => "Villa",
            PropertyCategory::Hostel => "Hostel",
            PropertyCategory::Pg => "PG",
            PropertyCategory::Homestay => "Homestay",
        };
        f.write_str(label)
    }
}

impl FromStr for PropertyCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hotel" => Ok(PropertyCategory::Hotel),
            "resort" => Ok(PropertyCategory::Resort),
            "villa" => Ok(PropertyCategory::Villa),
            "hostel" => Ok(PropertyCategory::Hostel),
            "pg" | "paying_guest" | "paying-guest" => Ok(PropertyCategory::Pg),
            "homestay" | "home_stay" => Ok(PropertyCategory::Homestay),
            other => Err(format!("unknown property category `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Who a shared-accommodation property admits.
pub enum GenderPolicy {
    Male,
    Female,
    Mixed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelDetails {
    pub star_rating: Option<u8>,
    pub total_floors: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResortDetails {
    pub resort_type: String,
    pub area_acres: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VillaDetails {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub max_guests: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostelDetails {
    pub gender_policy: Option<GenderPolicy>,
    pub total_beds: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PgDetails {
    pub gender_policy: Option<GenderPolicy>,
    pub meals_included: bool,
    pub notice_period_days: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomestayDetails {
    pub host_name: String,
    pub host_lives_onsite: bool,
}

/// Category-specific configuration; the variant fixes the draft's category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CategoryDetails {
    Hotel(HotelDetails),
    Resort(ResortDetails),
    Villa(VillaDetails),
    Hostel(HostelDetails),
    Pg(PgDetails),
    Homestay(HomestayDetails),
}

impl CategoryDetails {
    /// Empty configuration for `category`.
    pub fn empty(category: PropertyCategory) -> Self {
        match category {
            PropertyCategory::Hotel => CategoryDetails::Hotel(HotelDetails::default()),
            PropertyCategory::Resort => CategoryDetails::Resort(ResortDetails::default()),
            PropertyCategory::Villa => CategoryDetails::Villa(VillaDetails::default()),
            PropertyCategory::Hostel => CategoryDetails::Hostel(HostelDetails::default()),
            PropertyCategory::Pg => CategoryDetails::Pg(PgDetails::default()),
            PropertyCategory::Homestay => CategoryDetails::Homestay(HomestayDetails::default()),
        }
    }

    pub fn category(&self) -> PropertyCategory {
        match self {
            CategoryDetails::Hotel(_) => PropertyCategory::Hotel,
            CategoryDetails::Resort(_) => PropertyCategory::Resort,
            CategoryDetails::Villa(_) => PropertyCategory::Villa,
            CategoryDetails::Hostel(_) => PropertyCategory::Hostel,
            CategoryDetails::Pg(_) => PropertyCategory::Pg,
            CategoryDetails::Homestay(_) => PropertyCategory::Homestay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_aliases() {
        assert_eq!("PG".parse::<PropertyCategory>(), Ok(PropertyCategory::Pg));
        assert_eq!(
            " home_stay ".parse::<PropertyCategory>(),
            Ok(PropertyCategory::Homestay)
        );
        assert!("castle".parse::<PropertyCategory>().is_err());
    }

    #[test]
    fn details_serialize_with_type_tag() {
        let details = CategoryDetails::Hotel(HotelDetails {
            star_rating: Some(4),
            total_floors: None,
        });
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["type"], "hotel");
        assert_eq!(json["starRating"], 4);

        let back: CategoryDetails = serde_json::from_value(json).unwrap();
        assert_eq!(back, details);
        assert_eq!(back.category(), PropertyCategory::Hotel);
    }

    #[test]
    fn empty_details_match_requested_category() {
        for category in PropertyCategory::ALL {
            assert_eq!(CategoryDetails::empty(category).category(), category);
        }
    }
}
