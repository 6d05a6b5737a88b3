use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordId;

/// Property row as exchanged with the record store.
///
/// Every field is optional: the store returns sparse rows and omits fields
/// it was not asked for. Enum-valued columns stay raw strings here and are
/// validated when the row is converted to a [`super::Property`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoredProperty {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_footage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<String>,
    /// Comma-joined amenity tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Columns requested on every read
pub const PROPERTY_FIELDS: [&str; 13] = [
    "Name",
    "title",
    "price",
    "property_type",
    "bedrooms",
    "bathrooms",
    "square_footage",
    "address",
    "description",
    "listing_type",
    "amenities",
    "image",
    "created_at",
];

pub fn property_fields() -> Vec<String> {
    PROPERTY_FIELDS.iter().map(|field| field.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sparse_row_deserializes() {
        let row: StoredProperty = serde_json::from_value(json!({
            "Id": 7,
            "Name": "Cottage",
            "price": null,
            "amenities": "Garden,Fireplace"
        }))
        .unwrap();

        assert_eq!(row.id, Some(7));
        assert_eq!(row.name.as_deref(), Some("Cottage"));
        assert_eq!(row.price, None);
        assert_eq!(row.title, None);
        assert_eq!(row.amenities.as_deref(), Some("Garden,Fireplace"));
    }

    #[test]
    fn test_absent_id_is_not_serialized() {
        let row = StoredProperty {
            title: Some("Loft".to_string()),
            ..StoredProperty::default()
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, json!({ "title": "Loft" }));
    }
}
