use chrono::{DateTime, Utc};

use super::{Car, Customer, Rental, RentalFilter};

/// Case-insensitive substring search over a rental's display fields:
/// car id, brand, model, customer name, and phone. An empty needle
/// matches everything.
pub fn matches_search(rental: &Rental, car: &Car, customer: &Customer, text: &str) -> bool {
    let needle = text.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    car.id.to_lowercase().contains(&needle)
        || car.brand.to_lowercase().contains(&needle)
        || car.model.to_lowercase().contains(&needle)
        || customer.name.to_lowercase().contains(&needle)
        || customer
            .phone
            .as_deref()
            .is_some_and(|phone| phone.to_lowercase().contains(&needle))
}

/// Full search predicate: text AND status/recency filter.
pub fn matches_query(
    rental: &Rental,
    car: &Car,
    customer: &Customer,
    text: &str,
    filter: RentalFilter,
    now: DateTime<Utc>,
) -> bool {
    matches_search(rental, car, customer, text) && filter.matches(rental, now)
}
