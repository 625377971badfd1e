mod app;
pub mod args;
pub mod commands;
mod config;
pub mod domain;
pub mod error;
pub mod forms;
pub mod gallery;
pub mod model;
pub mod notify;
pub mod session;
pub mod store;
mod utils;
pub mod views;


pub use app::{App, UNEXPECTED_ERROR};
pub use config::Config;
pub use error::Error;
pub use error::Result;
