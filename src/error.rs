//! Error types shared by the command handlers.
//!
//! Everything is an `anyhow::Error`. Handlers tag failures that the user should see verbatim with
//! an `ErrorType` through `IntoResult::pub_result`. Untagged errors are treated as unexpected.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies a failure for the notification layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Missing or invalid form input. The form is left intact for correction.
    Validation,
    /// The admin session flag is missing or the password did not match.
    Auth,
    /// Durable storage could not be written.
    Storage,
    /// Anything else.
    Internal,
}

serde_plain::derive_display_from_serialize!(ErrorType);

/// An error whose message is meant for the user.
#[derive(Debug)]
pub struct PubError {
    error_type: ErrorType,
    message: String,
}

impl PubError {
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for PubError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for PubError {}

/// Tags the error side of a result with an `ErrorType`.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| {
            let e: Error = e.into();
            // Keep an existing tag, the innermost classification wins.
            if e.downcast_ref::<PubError>().is_some() {
                return e;
            }
            PubError::new(error_type, format!("{e:#}")).into()
        })
    }
}

/// Returns the `ErrorType` of `e`, `Internal` when it was never tagged.
pub fn error_type(e: &Error) -> ErrorType {
    e.chain()
        .find_map(|cause| cause.downcast_ref::<PubError>())
        .map(PubError::error_type)
        .unwrap_or(ErrorType::Internal)
}

/// Shorthand for a validation failure.
pub(crate) fn invalid(message: impl Into<String>) -> Error {
    PubError::new(ErrorType::Validation, message).into()
}

/// Shorthand for an access failure.
pub(crate) fn denied(message: impl Into<String>) -> Error {
    PubError::new(ErrorType::Auth, message).into()
}
