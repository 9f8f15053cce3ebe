// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use vettura::application::{ClosurePolicy, RentalService};

/// Daily rates for the standard test fleet, in cents.
pub const CAMRY_RATE: i64 = 500000;
pub const ACCORD_RATE: i64 = 600000;
pub const THAR_RATE: i64 = 1200000;

/// Ledger seeded with the standard three-car fleet.
pub fn seeded_service(policy: ClosurePolicy) -> Result<RentalService> {
    let mut service = RentalService::new(policy);
    service.add_car("C001", "Toyota", "Camry", CAMRY_RATE)?;
    service.add_car("C002", "Honda", "Accord", ACCORD_RATE)?;
    service.add_car("C003", "Mahindra", "Thar", THAR_RATE)?;
    Ok(service)
}

pub fn retain_service() -> Result<RentalService> {
    seeded_service(ClosurePolicy::Retain)
}

pub fn purge_service() -> Result<RentalService> {
    seeded_service(ClosurePolicy::Purge)
}
