//! Request bodies and response unwrapping.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use stayhub_domain::{Document, InventoryItem, PropertyDraft};

use crate::GatewayError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PropertyPayload<'a> {
    pub property_type: &'static str,
    #[serde(flatten)]
    pub draft: &'a PropertyDraft,
}

impl<'a> PropertyPayload<'a> {
    pub fn new(draft: &'a PropertyDraft) -> Self {
        Self {
            property_type: draft.category().as_str(),
            draft,
        }
    }
}

/// Inventory body; local identifiers never leave the device.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoomTypePayload<'a> {
    pub name: &'a str,
    pub max_adults: u32,
    pub max_children: u32,
    pub total_units: u32,
    pub price: f64,
    pub images: &'a [String],
    pub amenities: &'a BTreeSet<String>,
}

impl<'a> From<&'a InventoryItem> for RoomTypePayload<'a> {
    fn from(item: &'a InventoryItem) -> Self {
        Self {
            name: &item.name,
            max_adults: item.max_adults,
            max_children: item.max_children,
            total_units: item.total_units,
            price: item.price,
            images: &item.images,
            amenities: &item.amenities,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DocumentsPayload<'a> {
    pub documents: &'a [Document],
}

/// Strips the `{ "data": ... }` envelope some endpoints use.
pub(crate) fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Finds the identifier of a created resource in the common response shapes.
pub(crate) fn extract_id(value: &Value, nested: &[&str]) -> Result<String, GatewayError> {
    let direct = |v: &Value| {
        ["_id", "id"]
            .iter()
            .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
    };
    if let Some(id) = direct(value) {
        return Ok(id);
    }
    nested
        .iter()
        .chain(["data"].iter())
        .find_map(|key| value.get(key).and_then(direct))
        .ok_or_else(|| GatewayError::Decode(format!("response has no id: {value}")))
}

/// Pulls a human message out of an error body.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let field = |v: &Value, key: &str| {
        v.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    field(&value, "message")
        .or_else(|| field(&value, "error"))
        .or_else(|| value.get("error").and_then(|e| field(e, "message")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stayhub_domain::PropertyCategory;

    #[test]
    fn ids_found_at_top_level_or_nested() {
        assert_eq!(extract_id(&json!({"_id": "p1"}), &[]).unwrap(), "p1");
        assert_eq!(
            extract_id(&json!({"property": {"id": "p2"}}), &["property"]).unwrap(),
            "p2"
        );
        assert_eq!(extract_id(&json!({"data": {"_id": "p3"}}), &[]).unwrap(), "p3");
        assert!(extract_id(&json!({"ok": true}), &["property"]).is_err());
    }

    #[test]
    fn error_messages_prefer_message_then_error() {
        assert_eq!(
            extract_error_message(r#"{"message":"Name taken","error":"Conflict"}"#).as_deref(),
            Some("Name taken")
        );
        assert_eq!(
            extract_error_message(r#"{"error":"Unauthorized"}"#).as_deref(),
            Some("Unauthorized")
        );
        assert_eq!(
            extract_error_message(r#"{"error":{"message":"Bad token"}}"#).as_deref(),
            Some("Bad token")
        );
        assert_eq!(extract_error_message("<html>502</html>"), None);
    }

    #[test]
    fn property_payload_carries_category() {
        let mut draft = PropertyDraft::new(PropertyCategory::Pg);
        draft.base.name = "Sunrise PG".into();
        let value = serde_json::to_value(PropertyPayload::new(&draft)).unwrap();
        assert_eq!(value["propertyType"], "pg");
        assert_eq!(value["name"], "Sunrise PG");
        assert_eq!(value["details"]["type"], "pg");
    }

    #[test]
    fn room_type_payload_omits_local_id() {
        let item = InventoryItem::new("Dorm bed", 650.0).with_backend_id("rt_1");
        let value = serde_json::to_value(RoomTypePayload::from(&item)).unwrap();
        assert!(value.get("localId").is_none());
        assert!(value.get("backendId").is_none());
        assert_eq!(value["totalUnits"], 1);
    }
}
