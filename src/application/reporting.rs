use serde::{Deserialize, Serialize};

use crate::application::ClosurePolicy;
use crate::domain::{Car, Cents, Customer, Rental};

/// Aggregate figures over the whole session. Backed by running
/// accumulators, so the numbers are identical under both closure policies
/// even though the purge policy drops closed rentals from the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Every rental ever created, including returned (and purged) ones.
    pub total_rentals: u64,
    /// Rentals currently open.
    pub active_rentals: u64,
    /// Sum of frozen total prices over all rentals ever created.
    pub total_revenue: Cents,
}

/// Serializable dump of the current session, for the JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub policy: ClosurePolicy,
    pub cars: Vec<Car>,
    pub customers: Vec<Customer>,
    /// Under the purge policy this holds only the rentals still retained.
    pub rentals: Vec<Rental>,
    pub statistics: Statistics,
}
