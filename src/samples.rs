use crate::models::{ListingType, Property, PropertyType};

/// Amenity tags offered by the listing form
pub const AMENITIES: [&str; 10] = [
    "Gym",
    "Pool",
    "Parking",
    "Garden",
    "Balcony",
    "Garage",
    "Rooftop",
    "Concierge",
    "Spa",
    "Fireplace",
];

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|tag| tag.to_string()).collect()
}

/// Built-in listings used for offline browsing
pub fn sample_properties() -> Vec<Property> {
    vec![
        Property {
            id: 1,
            title: "Modern Downtown Loft".to_string(),
            price: Some(850_000),
            property_type: PropertyType::Apartment,
            bedrooms: 2,
            bathrooms: 2,
            square_footage: 1200,
            address: "123 Urban St, Downtown".to_string(),
            description: None,
            listing_type: ListingType::Sale,
            amenities: tags(&["Gym", "Parking", "Balcony"]),
            image: "https://images.unsplash.com/photo-1545324418-cc1a3fa10c00?w=400".to_string(),
            created_at: None,
        },
        Property {
            id: 2,
            title: "Suburban Family Home".to_string(),
            price: Some(3_200),
            property_type: PropertyType::House,
            bedrooms: 4,
            bathrooms: 3,
            square_footage: 2500,
            address: "456 Maple Ave, Suburbia".to_string(),
            description: None,
            listing_type: ListingType::Rent,
            amenities: tags(&["Garden", "Garage", "Pool"]),
            image: "https://images.unsplash.com/photo-1568605114967-8130f3a36994?w=400".to_string(),
            created_at: None,
        },
        Property {
            id: 3,
            title: "Luxury Penthouse Suite".to_string(),
            price: Some(2_500_000),
            property_type: PropertyType::Apartment,
            bedrooms: 3,
            bathrooms: 3,
            square_footage: 1800,
            address: "789 Sky Tower, Uptown".to_string(),
            description: None,
            listing_type: ListingType::Sale,
            amenities: tags(&["Rooftop", "Concierge", "Gym", "Spa"]),
            image: "https://images.unsplash.com/photo-1582268611958-ebfd161ef9cf?w=400".to_string(),
            created_at: None,
        },
    ]
}
