// Application layer - the rental ledger service and its support types.
// The CLI (or any other front end) collects raw input and calls into
// RentalService; all mutable state lives behind that service.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
