use crate::commands::Out;
use crate::model::{Appointment, Transaction};
use crate::store::{APPOINTMENTS, TRANSACTIONS};
use schemars::{schema_for, Schema};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// The JSON Schema of each durable storage entry.
#[derive(Debug, Clone, Serialize)]
pub struct StorageSchema {
    pub transactions: Schema,
    pub appointments: Schema,
}

impl Display for StorageSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}

pub fn schema() -> Out<StorageSchema> {
    Out::new(
        format!("Schema of the '{TRANSACTIONS}' and '{APPOINTMENTS}' entries"),
        StorageSchema {
            transactions: schema_for!(Vec<Transaction>),
            appointments: schema_for!(Vec<Appointment>),
        },
    )
}
