use serde::{Deserialize, Serialize};

/// Sequentially generated identifier (e.g. "CUS1"). Never reused and never
/// supplied by callers; the ledger assigns it at rental time.
pub type CustomerId = String;

/// A customer record is created once per rental. Renting twice under the
/// same name produces two distinct customers; there is no deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: Option<String>,
}

impl Customer {
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_is_optional() {
        let anonymous = Customer::new("CUS1", "Alice");
        assert_eq!(anonymous.phone, None);

        let reachable = Customer::new("CUS2", "Bob").with_phone("555-1234");
        assert_eq!(reachable.phone.as_deref(), Some("555-1234"));
    }
}
