use crate::models::{Property, SearchFilters};
use crate::store::types::{Operator, WhereClause};

/// Whether a listing satisfies every criterion of the search
pub fn matches(property: &Property, filters: &SearchFilters) -> bool {
    let location = filters.location.trim();
    let matches_location = location.is_empty()
        || property
            .address
            .to_lowercase()
            .contains(&location.to_lowercase());

    let matches_price = property
        .price
        .is_some_and(|price| filters.price_range.contains(price));

    let matches_type = filters
        .property_type
        .map_or(true, |kind| property.property_type == kind);

    let matches_bedrooms = filters
        .bedrooms
        .map_or(true, |min| property.bedrooms >= min);

    let matches_bathrooms = filters
        .bathrooms
        .map_or(true, |min| property.bathrooms >= min);

    let matches_listing_type = property.listing_type == filters.listing_type;

    matches_location
        && matches_price
        && matches_type
        && matches_bedrooms
        && matches_bathrooms
        && matches_listing_type
}

/// Listings from `properties` that satisfy the search, in their original order
pub fn filter_local<'a>(properties: &'a [Property], filters: &SearchFilters) -> Vec<&'a Property> {
    properties
        .iter()
        .filter(|property| matches(property, filters))
        .collect()
}

/// Translates the search into store-side where clauses
pub fn where_clauses(filters: &SearchFilters) -> Vec<WhereClause> {
    let mut clauses = Vec::new();

    let location = filters.location.trim();
    if !location.is_empty() {
        clauses.push(WhereClause::new("address", Operator::Contains, location));
    }

    if let Some(kind) = filters.property_type {
        clauses.push(WhereClause::new(
            "property_type",
            Operator::ExactMatch,
            kind.as_str(),
        ));
    }

    clauses.push(WhereClause::new(
        "listing_type",
        Operator::ExactMatch,
        filters.listing_type.as_str(),
    ));

    if filters.price_range.min > 0 {
        clauses.push(WhereClause::new(
            "price",
            Operator::GreaterThanOrEqualTo,
            filters.price_range.min,
        ));
    }
    clauses.push(WhereClause::new(
        "price",
        Operator::LessThanOrEqualTo,
        filters.price_range.max,
    ));

    if let Some(min) = filters.bedrooms {
        clauses.push(WhereClause::new("bedrooms", Operator::GreaterThanOrEqualTo, min));
    }
    if let Some(min) = filters.bathrooms {
        clauses.push(WhereClause::new("bathrooms", Operator::GreaterThanOrEqualTo, min));
    }

    clauses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListingType, PropertyType};
    use crate::samples::sample_properties;

    fn family_home() -> Property {
        sample_properties().remove(1)
    }

    /// Filters that the family home satisfies on every rule
    fn passing_filters() -> SearchFilters {
        SearchFilters::new(ListingType::Rent)
            .location("maple")
            .price_range(3000, 4000)
            .property_type(PropertyType::House)
            .bedrooms_input("4")
            .bathrooms_input("3")
    }

    #[test]
    fn test_all_rules_pass() {
        assert!(matches(&family_home(), &passing_filters()));
    }

    #[test]
    fn test_each_rule_can_flip_result() {
        let home = family_home();
        let base = passing_filters();

        let mutations: Vec<(&str, SearchFilters)> = vec![
            ("location", base.clone().location("Oak")),
            ("price min", base.clone().price_range(3201, 4000)),
            ("price max", base.clone().price_range(0, 3199)),
            ("type", base.clone().property_type(PropertyType::Villa)),
            ("bedrooms", base.clone().bedrooms_input("5")),
            ("bathrooms", base.clone().bathrooms_input("4")),
            (
                "listing type",
                SearchFilters {
                    listing_type: ListingType::Sale,
                    ..base.clone()
                },
            ),
        ];

        for (rule, filters) in mutations {
            assert!(!matches(&home, &filters), "rule '{}' did not reject", rule);
        }
    }

    #[test]
    fn test_location_is_case_insensitive() {
        let filters = SearchFilters::new(ListingType::Rent).location("MAPLE AVE");
        assert!(matches(&family_home(), &filters));
    }

    #[test]
    fn test_blank_location_is_no_constraint() {
        let filters = SearchFilters::new(ListingType::Rent).location("   ");
        assert!(matches(&family_home(), &filters));
    }

    #[test]
    fn test_price_max_is_inclusive() {
        let home = family_home();
        assert!(matches(&home, &SearchFilters::new(ListingType::Rent).price_range(0, 3200)));

        let mut pricier = home.clone();
        pricier.price = Some(3201);
        assert!(!matches(&pricier, &SearchFilters::new(ListingType::Rent).price_range(0, 3200)));
    }

    #[test]
    fn test_missing_price_never_matches() {
        let mut home = family_home();
        home.price = None;
        assert!(!matches(&home, &SearchFilters::new(ListingType::Rent)));
    }

    #[test]
    fn test_bedrooms_minimum() {
        let filters = SearchFilters::new(ListingType::Rent).bedrooms_input("3");
        let mut home = family_home();

        home.bedrooms = 3;
        assert!(matches(&home, &filters));
        home.bedrooms = 5;
        assert!(matches(&home, &filters));
        home.bedrooms = 2;
        assert!(!matches(&home, &filters));
    }

    #[test]
    fn test_non_numeric_bedrooms_ignored() {
        let mut home = family_home();
        home.bedrooms = 0;
        let filters = SearchFilters::new(ListingType::Rent).bedrooms_input("any");
        assert!(matches(&home, &filters));
    }

    #[test]
    fn test_listing_type_always_applies() {
        let filters = SearchFilters::default();
        let properties = sample_properties();
        let results = filter_local(&properties, &filters);
        assert!(results.iter().all(|p| p.listing_type == ListingType::Sale));
    }

    #[test]
    fn test_maple_rent_scenario() {
        let properties = sample_properties();
        let filters = SearchFilters::new(ListingType::Rent).location("Maple");

        let results = filter_local(&properties, &filters);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 2);
        assert_eq!(results[0].price, Some(3200));
        assert_eq!(results[0].address, "456 Maple Ave, Suburbia");
    }

    #[test]
    fn test_default_filters_exclude_pricey_listings() {
        let properties = sample_properties();
        let results = filter_local(&properties, &SearchFilters::default());
        let ids: Vec<_> = results.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_matches_is_deterministic() {
        let home = family_home();
        let filters = passing_filters();
        let first = matches(&home, &filters);
        for _ in 0..10 {
            assert_eq!(matches(&home, &filters), first);
        }
    }

    #[test]
    fn test_where_clauses_for_defaults() {
        let clauses = where_clauses(&SearchFilters::default());
        assert_eq!(
            clauses,
            vec![
                WhereClause::new("listing_type", Operator::ExactMatch, "sale"),
                WhereClause::new("price", Operator::LessThanOrEqualTo, 1_000_000u64),
            ]
        );
    }

    #[test]
    fn test_where_clauses_for_full_filters() {
        let clauses = where_clauses(&passing_filters());
        let fields: Vec<_> = clauses
            .iter()
            .map(|c| (c.field_name.as_str(), c.operator))
            .collect();

        assert_eq!(
            fields,
            vec![
                ("address", Operator::Contains),
                ("property_type", Operator::ExactMatch),
                ("listing_type", Operator::ExactMatch),
                ("price", Operator::GreaterThanOrEqualTo),
                ("price", Operator::LessThanOrEqualTo),
                ("bedrooms", Operator::GreaterThanOrEqualTo),
                ("bathrooms", Operator::GreaterThanOrEqualTo),
            ]
        );
    }
}
