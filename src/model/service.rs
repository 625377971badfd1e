use crate::model::Amount;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An entry in the service catalog offered for booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct Service {
    id: String,
    name: String,
    price: Amount,
    /// Informational length of the service, in minutes.
    duration: u32,
}

impl Service {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Amount, duration: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            duration,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Amount {
        self.price
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// The catalog written into a fresh `config.json`.
    pub(crate) fn default_catalog() -> Vec<Service> {
        let entry = |id: &str, name: &str, price: i64, duration: u32| {
            Service::new(id, name, Amount::new(Decimal::from(price)), duration)
        };
        vec![
            entry("manicure", "Manicure", 20, 30),
            entry("pedicure", "Pedicure", 25, 45),
            entry("gel-nails", "Gel Nails", 35, 60),
            entry("nail-art", "Nail Art", 15, 20),
            entry("eyelash-extensions", "Eyelash Extensions", 45, 90),
        ]
    }
}

#[test]
fn test_default_catalog_ids_unique() {
    let catalog = Service::default_catalog();
    let mut ids: Vec<&str> = catalog.iter().map(|s| s.id()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), catalog.len());
}
