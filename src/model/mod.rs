//! Types that represent the core data model, such as `Transaction` and `Appointment`.
mod amount;
pub(crate) mod appointment;
mod service;
mod transaction;

pub use amount::{Amount, AmountError};
pub use appointment::{Appointment, AppointmentStatus};
pub use service::Service;
pub use transaction::{Category, Transaction};

use schemars::JsonSchema;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The identifier of a stored record.
///
/// New records get a random UUID. Older data used creation timestamps written as JSON numbers,
/// those are read back as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = RecordId;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("a string or an integer identifier")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
                Ok(RecordId::new(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordId, E> {
                Ok(RecordId::new(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordId, E> {
                Ok(RecordId::new(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<RecordId, E> {
                Ok(RecordId::new(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Anything kept in a collection and removable by identifier.
pub trait Record {
    fn id(&self) -> &RecordId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_from_number() {
        let id: RecordId = serde_json::from_str("1717236000000").unwrap();
        assert_eq!(id.as_str(), "1717236000000");
    }

    #[test]
    fn test_record_id_from_string() {
        let id: RecordId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id, RecordId::new("abc"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
