pub mod draft;
pub mod record;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ListingError;

pub use draft::PropertyDraft;
pub use record::{property_fields, StoredProperty, PROPERTY_FIELDS};

/// Identity assigned by the record store
pub type RecordId = u64;

/// Image shown for listings that were submitted without one
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1560518883-ce09059eeffa?w=400";

/// Upper bound of the default price filter
pub const DEFAULT_MAX_PRICE: u64 = 1_000_000;

/// Kind of building being listed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Condo,
    Townhouse,
    Villa,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::House,
        PropertyType::Apartment,
        PropertyType::Condo,
        PropertyType::Townhouse,
        PropertyType::Villa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Apartment => "apartment",
            PropertyType::Condo => "condo",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Villa => "villa",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ListingError::validation(format!("unknown property type '{}'", s)))
    }
}

/// Whether the listing is offered for sale or for rent
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    #[default]
    Sale,
    Rent,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Sale => "sale",
            ListingType::Rent => "rent",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingType {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(ListingType::Sale),
            "rent" => Ok(ListingType::Rent),
            other => Err(ListingError::validation(format!(
                "unknown listing type '{}'",
                other
            ))),
        }
    }
}

/// Canonical property listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: RecordId,
    pub title: String,
    /// Sale price, or monthly rent for rentals. Absent if the store has none.
    pub price: Option<u64>,
    pub property_type: PropertyType,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub square_footage: u32,
    pub address: String,
    pub description: Option<String>,
    pub listing_type: ListingType,
    pub amenities: Vec<String>,
    pub image: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Property {
    /// Form input pre-filled from this listing, used to build an update
    pub fn to_draft(&self) -> PropertyDraft {
        PropertyDraft::from(self)
    }

    /// Price as shown on a listing card, e.g. `$3,200/mo`
    pub fn price_label(&self) -> String {
        let Some(price) = self.price else {
            return "Price on request".to_string();
        };

        let digits = price.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        match self.listing_type {
            ListingType::Sale => format!("${}", grouped),
            ListingType::Rent => format!("${}/mo", grouped),
        }
    }
}

/// Inclusive price bounds of a search
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

impl PriceRange {
    pub fn contains(&self, price: u64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Search criteria entered by the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Case-insensitive substring of the address. Empty means any location.
    pub location: String,
    pub price_range: PriceRange,
    pub property_type: Option<PropertyType>,
    /// Minimum number of bedrooms
    pub bedrooms: Option<u32>,
    /// Minimum number of bathrooms
    pub bathrooms: Option<u32>,
    pub listing_type: ListingType,
}

impl SearchFilters {
    pub fn new(listing_type: ListingType) -> Self {
        Self {
            listing_type,
            ..Self::default()
        }
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn price_range(mut self, min: u64, max: u64) -> Self {
        self.price_range = PriceRange { min, max };
        self
    }

    pub fn property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    /// Minimum bedrooms from text input. Non-numeric input clears the constraint.
    pub fn bedrooms_input(mut self, input: &str) -> Self {
        self.bedrooms = parse_count(input);
        self
    }

    /// Minimum bathrooms from text input. Non-numeric input clears the constraint.
    pub fn bathrooms_input(mut self, input: &str) -> Self {
        self.bathrooms = parse_count(input);
        self
    }
}

/// Reads the leading decimal digits of a form input, ignoring surrounding
/// whitespace and anything after the digits ("3 beds" is 3). Returns `None`
/// when the input does not start with a digit or the value overflows.
pub fn parse_leading_int(input: &str) -> Option<u64> {
    let trimmed = input.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }
    unsigned[..end].parse().ok()
}

/// Count-valued form input (bedrooms, bathrooms, square footage)
pub fn parse_count(input: &str) -> Option<u32> {
    parse_leading_int(input).and_then(|value| u32::try_from(value).ok())
}
