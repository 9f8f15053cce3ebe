use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CarId, Cents, CustomerId};

/// A rental transaction. References its car and customer by id rather than
/// by object identity, and freezes the total price at creation - later
/// catalog price changes never affect an existing rental.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rental {
    pub car_id: CarId,
    pub customer_id: CustomerId,
    pub days: u32,
    /// Frozen at creation: car's daily rate at rental time x days.
    pub total_price: Cents,
    pub rented_at: DateTime<Utc>,
    /// None while the rental is open; stamped when the car comes back.
    pub returned_at: Option<DateTime<Utc>>,
}

impl Rental {
    pub fn new(
        car_id: impl Into<CarId>,
        customer_id: impl Into<CustomerId>,
        days: u32,
        total_price: Cents,
        rented_at: DateTime<Utc>,
    ) -> Self {
        Self {
            car_id: car_id.into(),
            customer_id: customer_id.into(),
            days,
            total_price,
            rented_at,
            returned_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }

    /// Mark the rental closed. Closed is terminal.
    pub fn close(&mut self, at: DateTime<Utc>) {
        self.returned_at = Some(at);
    }
}

/// Status/recency filter for rental queries. Combined with the text
/// predicate by logical AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalFilter {
    All,
    ActiveOnly,
    ReturnedOnly,
    WithinLastDays(i64),
}

impl RentalFilter {
    pub fn matches(&self, rental: &Rental, now: DateTime<Utc>) -> bool {
        match self {
            RentalFilter::All => true,
            RentalFilter::ActiveOnly => rental.is_open(),
            RentalFilter::ReturnedOnly => !rental.is_open(),
            RentalFilter::WithinLastDays(n) => (now - rental.rented_at).num_days() <= *n,
        }
    }
}
