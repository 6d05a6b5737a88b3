use serde::{Deserialize, Serialize};

use super::{ListingType, Property, PropertyType};

/// Listing form input used to create or update a property.
///
/// Numeric fields hold the raw text the user typed; they are parsed when
/// the draft is converted to storage form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub title: String,
    pub price: String,
    pub property_type: PropertyType,
    pub bedrooms: String,
    pub bathrooms: String,
    pub square_footage: String,
    pub address: String,
    pub description: String,
    pub listing_type: ListingType,
    pub amenities: Vec<String>,
    pub image: Option<String>,
}

impl Default for PropertyDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            price: String::new(),
            property_type: PropertyType::House,
            bedrooms: String::new(),
            bathrooms: String::new(),
            square_footage: String::new(),
            address: String::new(),
            description: String::new(),
            listing_type: ListingType::Sale,
            amenities: Vec::new(),
            image: None,
        }
    }
}

impl PropertyDraft {
    /// Adds the amenity if missing, removes it otherwise
    pub fn toggle_amenity(&mut self, amenity: &str) {
        if let Some(pos) = self.amenities.iter().position(|a| a == amenity) {
            self.amenities.remove(pos);
        } else {
            self.amenities.push(amenity.to_string());
        }
    }
}

impl From<&Property> for PropertyDraft {
    fn from(property: &Property) -> Self {
        Self {
            title: property.title.clone(),
            price: property.price.map(|p| p.to_string()).unwrap_or_default(),
            property_type: property.property_type,
            bedrooms: property.bedrooms.to_string(),
            bathrooms: property.bathrooms.to_string(),
            square_footage: property.square_footage.to_string(),
            address: property.address.clone(),
            description: property.description.clone().unwrap_or_default(),
            listing_type: property.listing_type,
            amenities: property.amenities.clone(),
            image: Some(property.image.clone()),
        }
    }
}
