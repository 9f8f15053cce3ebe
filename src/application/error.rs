use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Car unavailable: {0}")]
    CarUnavailable(String),

    #[error("Not rented: {0}")]
    NotRented(String),

    /// A car is marked rented but no open rental references it. Unreachable
    /// as long as all mutations go through the service.
    #[error("Ledger integrity violation: {0}")]
    DataIntegrity(String),
}
