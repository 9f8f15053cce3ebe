mod car;
mod customer;
mod ledger;
mod money;
mod rental;

pub use car::*;
pub use customer::*;
pub use ledger::*;
pub use money::*;
pub use rental::*;
