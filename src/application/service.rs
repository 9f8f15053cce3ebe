use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{matches_query, Car, CarId, Cents, Customer, Rental, RentalFilter};

use super::{AppError, SessionSnapshot, Statistics};

/// What happens to a rental record when its car comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosurePolicy {
    /// Keep the closed rental in the list for history and search.
    Retain,
    /// Drop the rental from the list entirely (legacy minimal-footprint
    /// mode). Statistics are unaffected; they run on accumulators.
    Purge,
}

impl ClosurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClosurePolicy::Retain => "retain",
            ClosurePolicy::Purge => "purge",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "retain" => Some(ClosurePolicy::Retain),
            "purge" => Some(ClosurePolicy::Purge),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClosurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of opening a rental, for the caller's confirmation display.
#[derive(Debug)]
pub struct RentalResult {
    pub rental: Rental,
    pub customer: Customer,
    pub car: Car,
}

/// Result of closing a rental.
#[derive(Debug)]
pub struct ReturnResult {
    pub rental: Rental,
    pub customer_name: String,
}

/// A rental joined with the car and customer it references.
pub struct RentalView {
    pub rental: Rental,
    pub car: Car,
    pub customer: Customer,
}

/// The rental ledger. Owns the car catalog, the customer registry, and the
/// rental list; any front end calls in here and owns no state of its own.
///
/// Mutating operations validate everything before touching state, so a
/// failed call never leaves a partial commit behind.
pub struct RentalService {
    policy: ClosurePolicy,
    cars: Vec<Car>,
    customers: Vec<Customer>,
    rentals: Vec<Rental>,
    /// Index from car id to the position of its open rental in `rentals`.
    /// At most one open rental per car at any time.
    open_rentals: HashMap<CarId, usize>,
    customer_seq: u64,
    total_rentals: u64,
    total_revenue: Cents,
}

impl RentalService {
    pub fn new(policy: ClosurePolicy) -> Self {
        Self {
            policy,
            cars: Vec::new(),
            customers: Vec::new(),
            rentals: Vec::new(),
            open_rentals: HashMap::new(),
            customer_seq: 0,
            total_rentals: 0,
            total_revenue: 0,
        }
    }

    pub fn policy(&self) -> ClosurePolicy {
        self.policy
    }

    // ========================
    // Catalog operations
    // ========================

    /// Add a car to the catalog. Ids must be unique; duplicates are
    /// rejected rather than shadowed.
    pub fn add_car(
        &mut self,
        id: &str,
        brand: &str,
        model: &str,
        price_per_day: Cents,
    ) -> Result<Car, AppError> {
        let id = id.trim();
        let brand = brand.trim();
        let model = model.trim();

        if id.is_empty() {
            return Err(AppError::InvalidInput("car id must not be empty".into()));
        }
        if brand.is_empty() || model.is_empty() {
            return Err(AppError::InvalidInput(
                "car brand and model must not be empty".into(),
            ));
        }
        if price_per_day < 0 {
            return Err(AppError::InvalidInput(format!(
                "daily price must not be negative (got {price_per_day})"
            )));
        }
        if self.car(id).is_some() {
            return Err(AppError::InvalidInput(format!(
                "car id '{id}' already exists"
            )));
        }

        let car = Car::new(id, brand, model, price_per_day);
        self.cars.push(car.clone());
        Ok(car)
    }

    /// All cars, in catalog insertion order.
    pub fn list_cars(&self) -> &[Car] {
        &self.cars
    }

    /// Cars currently available for rent, in catalog insertion order.
    pub fn list_available_cars(&self) -> Vec<Car> {
        self.cars.iter().filter(|c| c.available).cloned().collect()
    }

    // ========================
    // Rental lifecycle
    // ========================

    /// Quote the price for renting a car over the given number of days,
    /// at the car's current daily rate. Pure; does not lock in the price.
    pub fn quote_price(&self, car_id: &str, days: u32) -> Result<Cents, AppError> {
        if days == 0 {
            return Err(AppError::InvalidInput(
                "rental duration must be at least one day".into(),
            ));
        }
        let car = self
            .car(car_id)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown car id '{car_id}'")))?;
        Ok(car.quote(days))
    }

    /// Open a rental: register a fresh customer, freeze the price, flip
    /// the car to unavailable, and append the rental. Callers are expected
    /// to quote and confirm with the user before committing here.
    pub fn rent_car(
        &mut self,
        car_id: &str,
        customer_name: &str,
        phone: Option<&str>,
        days: u32,
    ) -> Result<RentalResult, AppError> {
        self.rent_car_at(car_id, customer_name, phone, days, Utc::now())
    }

    /// Like [`rent_car`](Self::rent_car), with an explicit rental
    /// timestamp.
    pub fn rent_car_at(
        &mut self,
        car_id: &str,
        customer_name: &str,
        phone: Option<&str>,
        days: u32,
        at: DateTime<Utc>,
    ) -> Result<RentalResult, AppError> {
        let name = customer_name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "customer name must not be empty".into(),
            ));
        }
        if days == 0 {
            return Err(AppError::InvalidInput(
                "rental duration must be at least one day".into(),
            ));
        }
        let Some(car_pos) = self.cars.iter().position(|c| c.id == car_id) else {
            return Err(AppError::CarUnavailable(format!(
                "unknown car id '{car_id}'"
            )));
        };
        if !self.cars[car_pos].available {
            return Err(AppError::CarUnavailable(format!(
                "car '{car_id}' is already rented"
            )));
        }

        // Validation done; nothing below fails.
        self.customer_seq += 1;
        let mut customer = Customer::new(format!("CUS{}", self.customer_seq), name);
        if let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty()) {
            customer = customer.with_phone(phone);
        }

        let car = &mut self.cars[car_pos];
        let total_price = car.quote(days);
        car.available = false;

        let rental = Rental::new(car.id.clone(), customer.id.clone(), days, total_price, at);
        self.open_rentals.insert(car.id.clone(), self.rentals.len());
        self.rentals.push(rental.clone());
        self.customers.push(customer.clone());
        self.total_rentals += 1;
        self.total_revenue += total_price;

        Ok(RentalResult {
            rental,
            customer,
            car: self.cars[car_pos].clone(),
        })
    }

    /// Close the open rental on a car: stamp the return time, flip the car
    /// back to available, then apply the closure policy.
    pub fn return_car(&mut self, car_id: &str) -> Result<ReturnResult, AppError> {
        let Some(car_pos) = self.cars.iter().position(|c| c.id == car_id) else {
            return Err(AppError::NotRented(format!("unknown car id '{car_id}'")));
        };
        if self.cars[car_pos].available {
            return Err(AppError::NotRented(format!(
                "car '{car_id}' is not currently rented"
            )));
        }
        let Some(&rental_pos) = self.open_rentals.get(car_id) else {
            return Err(AppError::DataIntegrity(format!(
                "car '{car_id}' is marked rented but has no open rental"
            )));
        };
        let customer_name = self
            .customer(&self.rentals[rental_pos].customer_id)
            .map(|c| c.name.clone())
            .ok_or_else(|| {
                AppError::DataIntegrity(format!(
                    "rental on car '{car_id}' references an unknown customer"
                ))
            })?;

        // Validation done; commit.
        let now = Utc::now();
        self.open_rentals.remove(car_id);
        self.rentals[rental_pos].close(now);
        self.cars[car_pos].available = true;
        let rental = self.rentals[rental_pos].clone();

        if self.policy == ClosurePolicy::Purge {
            self.rentals.remove(rental_pos);
            // Open rentals past the removed slot shifted left by one.
            for pos in self.open_rentals.values_mut() {
                if *pos > rental_pos {
                    *pos -= 1;
                }
            }
        }

        Ok(ReturnResult {
            rental,
            customer_name,
        })
    }

    // ========================
    // Queries
    // ========================

    /// Search the retained rental list. Text is matched case-insensitively
    /// against car id, brand, model, customer name, and phone; results come
    /// back in creation order.
    pub fn search_rentals(&self, text: &str, filter: RentalFilter) -> Vec<RentalView> {
        let now = Utc::now();
        self.rentals
            .iter()
            .filter_map(|rental| {
                let car = self.car(&rental.car_id)?;
                let customer = self.customer(&rental.customer_id)?;
                matches_query(rental, car, customer, text, filter, now).then(|| RentalView {
                    rental: rental.clone(),
                    car: car.clone(),
                    customer: customer.clone(),
                })
            })
            .collect()
    }

    /// Retained rentals for one customer, in creation order.
    pub fn rentals_for_customer(&self, customer_id: &str) -> Vec<Rental> {
        self.rentals
            .iter()
            .filter(|r| r.customer_id == customer_id)
            .cloned()
            .collect()
    }

    /// All customers registered this session, in registration order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Session aggregates. Policy-independent: counts and revenue come from
    /// running accumulators, not from the (possibly purged) rental list.
    pub fn statistics(&self) -> Statistics {
        Statistics {
            total_rentals: self.total_rentals,
            active_rentals: self.open_rentals.len() as u64,
            total_revenue: self.total_revenue,
        }
    }

    /// Serializable dump of the whole session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            policy: self.policy,
            cars: self.cars.clone(),
            customers: self.customers.clone(),
            rentals: self.rentals.clone(),
            statistics: self.statistics(),
        }
    }

    fn car(&self, id: &str) -> Option<&Car> {
        self.cars.iter().find(|c| c.id == id)
    }

    fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }
}
