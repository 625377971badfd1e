use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, its subdirectories and an initial `config.json` file with the
/// default service catalog, gallery and settings.
///
/// # Arguments
/// - `salon_home` - The directory that will be the root of data directory, e.g. `$HOME/salon`
///
/// # Errors
/// - Returns an error if a configuration already exists there.
/// - Returns an error if any file operations fail.
pub async fn init(salon_home: &Path) -> Result<Out<()>> {
    let config = Config::create(salon_home)
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Storage)?;
    Ok(format!(
        "Successfully created the salon directory at '{}'",
        config.root().display()
    )
    .into())
}
