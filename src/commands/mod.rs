//! Command handlers for the salon CLI.
//!
//! This module contains implementations for all CLI subcommands. Handlers that act on the
//! collections take an open `App`; the rest only need the home directory or nothing at all.

mod admin;
mod appointments;
mod booking;
mod gallery;
mod init;
mod schema;
mod transactions;

use serde::Serialize;
use std::fmt::{Debug, Display};
use tracing::{debug, info};

pub use admin::{follow_panel, login, logout, panel, stats};
pub use appointments::{delete_appointment, list_appointments};
pub use booking::{book, select, services, ServiceList};
pub use gallery::gallery;
pub use init::init;
pub use schema::{schema, StorageSchema};
pub use transactions::{add_transaction, delete_transaction, list_transactions};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data that can be printed for the user.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Take the structured data, dropping the message.
    pub fn into_structure(self) -> Option<T> {
        self.structure
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        self.print_json();
    }

    /// Print the structured data (if it exists) as JSON to `debug!`.
    pub fn print_json(&self) {
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug + Display,
{
    /// Print the structured data (if it exists) to stdout, for commands whose output is the point
    /// of running them. The message is left to the notification area.
    pub fn render(&self) {
        if let Some(structure) = self.structure() {
            println!("{structure}");
        }
        self.print_json();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_from_message() {
        let out: Out<()> = "done".into();
        assert_eq!(out.message(), "done");
        assert!(out.structure().is_none());
    }

    #[test]
    fn test_out_serialize() {
        let out = Out::new("Transaction deleted", 1usize);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["message"], "Transaction deleted");
        assert_eq!(json["structure"], 1);
        assert_eq!(out.into_structure(), Some(1));
    }
}
