//! Conversion between stored property rows and canonical listings.
//!
//! Amenities are stored as one comma-joined string, so a tag that itself
//! contains a comma comes back split in two. Tags are trimmed and empty
//! tags dropped on write, so `" Gym"` is read back as `"Gym"`.

use crate::error::{ListingError, Result};
use crate::models::{
    parse_count, parse_leading_int, ListingType, Property, PropertyDraft, PropertyType, RecordId,
    StoredProperty, PLACEHOLDER_IMAGE,
};

/// Builds a canonical listing from a stored row.
///
/// Fails when the row has no `Id` or carries an unknown property or listing
/// type. A missing price stays missing; missing counts become 0.
pub fn to_canonical(row: StoredProperty) -> Result<Property> {
    let id = row
        .id
        .ok_or_else(|| ListingError::validation("record is missing its Id"))?;

    let property_type = row
        .property_type
        .as_deref()
        .ok_or_else(|| ListingError::validation(format!("record {} has no property_type", id)))?
        .parse::<PropertyType>()?;
    let listing_type = row
        .listing_type
        .as_deref()
        .ok_or_else(|| ListingError::validation(format!("record {} has no listing_type", id)))?
        .parse::<ListingType>()?;

    let title = row
        .title
        .filter(|title| !title.is_empty())
        .or(row.name)
        .unwrap_or_default();

    Ok(Property {
        id,
        title,
        price: row.price,
        property_type,
        bedrooms: row.bedrooms.unwrap_or(0),
        bathrooms: row.bathrooms.unwrap_or(0),
        square_footage: row.square_footage.unwrap_or(0),
        address: row.address.unwrap_or_default(),
        description: row.description.filter(|d| !d.is_empty()),
        listing_type,
        amenities: split_amenities(row.amenities.as_deref()),
        image: row
            .image
            .filter(|image| !image.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        created_at: row.created_at,
    })
}

/// Builds the row written by a create (`id` is `None`) or an update.
///
/// The price must parse to a non-negative integer; unparseable counts are
/// written as 0. `created_at` is left for the caller to stamp.
pub fn to_storage(draft: &PropertyDraft, id: Option<RecordId>) -> Result<StoredProperty> {
    let price = parse_leading_int(&draft.price).ok_or_else(|| {
        ListingError::validation(format!("price '{}' is not a valid amount", draft.price))
    })?;

    Ok(StoredProperty {
        id,
        name: Some(draft.title.clone()),
        title: Some(draft.title.clone()),
        price: Some(price),
        property_type: Some(draft.property_type.to_string()),
        bedrooms: Some(parse_count(&draft.bedrooms).unwrap_or(0)),
        bathrooms: Some(parse_count(&draft.bathrooms).unwrap_or(0)),
        square_footage: Some(parse_count(&draft.square_footage).unwrap_or(0)),
        address: Some(draft.address.clone()),
        description: Some(draft.description.clone()),
        listing_type: Some(draft.listing_type.to_string()),
        amenities: Some(join_amenities(&draft.amenities)),
        image: Some(
            draft
                .image
                .clone()
                .filter(|image| !image.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        ),
        created_at: None,
    })
}

/// Rejects drafts missing a title, address or price
pub fn validate_required(draft: &PropertyDraft) -> Result<()> {
    let missing = [
        ("title", draft.title.trim().is_empty()),
        ("address", draft.address.trim().is_empty()),
        ("price", draft.price.trim().is_empty()),
    ]
    .into_iter()
    .filter_map(|(field, empty)| empty.then_some(field))
    .collect::<Vec<_>>();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ListingError::validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Full stored row for an existing listing, identity and timestamp included
pub fn to_stored_row(property: &Property) -> StoredProperty {
    StoredProperty {
        id: Some(property.id),
        name: Some(property.title.clone()),
        title: Some(property.title.clone()),
        price: property.price,
        property_type: Some(property.property_type.to_string()),
        bedrooms: Some(property.bedrooms),
        bathrooms: Some(property.bathrooms),
        square_footage: Some(property.square_footage),
        address: Some(property.address.clone()),
        description: Some(property.description.clone().unwrap_or_default()),
        listing_type: Some(property.listing_type.to_string()),
        amenities: Some(join_amenities(&property.amenities)),
        image: Some(property.image.clone()),
        created_at: property.created_at,
    }
}

fn split_amenities(raw: Option<&str>) -> Vec<String> {
    raw.map(|joined| {
        joined
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

fn join_amenities(amenities: &[String]) -> String {
    amenities
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
