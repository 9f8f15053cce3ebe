use serde::{Deserialize, Serialize};

use super::Cents;

/// Catalog identifier, supplied by whoever adds the car (e.g. "C001").
pub type CarId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub brand: String,
    pub model: String,
    /// Daily rate in cents. Quotes use the current rate; rentals freeze
    /// their total at creation time.
    pub price_per_day: Cents,
    /// Single source of truth for whether the car may be rented.
    pub available: bool,
}

impl Car {
    pub fn new(
        id: impl Into<CarId>,
        brand: impl Into<String>,
        model: impl Into<String>,
        price_per_day: Cents,
    ) -> Self {
        Self {
            id: id.into(),
            brand: brand.into(),
            model: model.into(),
            price_per_day,
            available: true,
        }
    }

    /// Price for renting this car over the given number of days.
    pub fn quote(&self, days: u32) -> Cents {
        self.price_per_day * days as i64
    }

    /// Short display label: "C001 - Toyota Camry"
    pub fn label(&self) -> String {
        format!("{} - {} {}", self.id, self.brand, self.model)
    }
}

impl std::fmt::Display for Car {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({})",
            self.label(),
            if self.available { "Available" } else { "Rented" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_car_is_available() {
        let car = Car::new("C001", "Toyota", "Camry", 500000);
        assert!(car.available);
    }

    #[test]
    fn test_quote_is_linear_in_days() {
        let car = Car::new("C001", "Toyota", "Camry", 500000);
        assert_eq!(car.quote(1), 500000);
        assert_eq!(car.quote(3), 1500000);
        assert_eq!(car.quote(30), 15000000);
    }

    #[test]
    fn test_display_reflects_availability() {
        let mut car = Car::new("C001", "Toyota", "Camry", 500000);
        assert_eq!(car.to_string(), "C001 - Toyota Camry (Available)");
        car.available = false;
        assert_eq!(car.to_string(), "C001 - Toyota Camry (Rented)");
    }
}
