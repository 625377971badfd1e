//! Configuration file handling.
//!
//! The configuration file is stored at `$SALON_HOME/config.json` and holds the service catalog,
//! the gallery, display settings and the admin password. Durable collections live in
//! `$SALON_HOME/storage` and the admin session flag in `$SALON_HOME/.session`.

use crate::gallery::GalleryItem;
use crate::model::Service;
use crate::views::DateLocale;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "salon";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const STORAGE: &str = "storage";
const SESSION: &str = ".session";

const DEFAULT_CURRENCY: &str = "€";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_NOTIFICATION_TIMEOUT_SECS: u64 = 5;
const DEFAULT_BOOKING_WINDOW_MONTHS: u32 = 3;
const DEFAULT_RECENT_TRANSACTIONS: usize = 10;
const DEFAULT_REFRESH_DELAY_MS: u64 = 1000;

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$SALON_HOME` and from there it loads `$SALON_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    storage: PathBuf,
    session: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory, its subdirectories and an initial `config.json` with default
    /// settings.
    ///
    /// # Errors
    /// - Returns an error if a `config.json` already exists in `dir`.
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the salon home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}', refusing to overwrite it",
                config_path.display()
            )
        }

        let storage = root.join(STORAGE);
        utils::make_dir(&storage).await?;
        let session = root.join(SESSION);
        utils::make_dir(&session).await?;

        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            storage,
            session,
            config_file,
        })
    }

    /// This will
    /// - validate that `salon_home` and its config file exist
    /// - load the config file
    /// - validate that the storage directory exists, recreating the session directory if needed
    pub async fn load(salon_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = salon_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Salon home is missing, run 'salon init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let config = Self {
            storage: root.join(STORAGE),
            session: root.join(SESSION),
            root,
            config_path,
            config_file,
        };
        if !config.storage.is_dir() {
            bail!(
                "The storage directory is missing '{}'",
                config.storage.display()
            )
        }
        // The session directory is disposable, losing it only logs the admin out.
        utils::make_dir(&config.session).await?;
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn storage(&self) -> &Path {
        &self.storage
    }

    pub fn session(&self) -> &Path {
        &self.session
    }

    pub fn currency(&self) -> &str {
        &self.config_file.currency
    }

    pub fn locale(&self) -> DateLocale {
        self.config_file.locale
    }

    pub fn admin_password(&self) -> &str {
        &self.config_file.admin_password
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.config_file.notification_timeout_secs)
    }

    pub fn booking_window_months(&self) -> u32 {
        self.config_file.booking_window_months
    }

    pub fn recent_transactions(&self) -> usize {
        self.config_file.recent_transactions
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.config_file.refresh_delay_ms)
    }

    pub fn services(&self) -> &[Service] {
        &self.config_file.services
    }

    pub fn gallery(&self) -> &[GalleryItem] {
        &self.config_file.gallery
    }

    #[cfg(test)]
    pub(crate) fn set_refresh_delay(&mut self, delay: Duration) {
        self.config_file.refresh_delay_ms = delay.as_millis() as u64;
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration (catalog and gallery shortened):
/// ```json
/// {
///   "app_name": "salon",
///   "config_version": 1,
///   "currency": "€",
///   "locale": "en_US",
///   "admin_password": "admin123",
///   "notification_timeout_secs": 5,
///   "booking_window_months": 3,
///   "recent_transactions": 10,
///   "refresh_delay_ms": 1000,
///   "services": [{ "id": "manicure", "name": "Manicure", "price": "20", "duration": 30 }],
///   "gallery": [{ "title": "French tips", "category": "nails" }]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
struct ConfigFile {
    /// Application name, should always be "salon"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Symbol written after every amount
    currency: String,

    /// Controls month names in formatted dates
    locale: DateLocale,

    /// Compared verbatim against the login password. Not a security boundary.
    admin_password: String,

    notification_timeout_secs: u64,

    /// How far ahead appointments may be booked
    booking_window_months: u32,

    /// How many transactions the ledger list shows
    recent_transactions: usize,

    /// Delay before the admin panel reloads from storage when it becomes visible again
    refresh_delay_ms: u64,

    services: Vec<Service>,

    gallery: Vec<GalleryItem>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency: DEFAULT_CURRENCY.to_string(),
            locale: DateLocale::default(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            notification_timeout_secs: DEFAULT_NOTIFICATION_TIMEOUT_SECS,
            booking_window_months: DEFAULT_BOOKING_WINDOW_MONTHS,
            recent_transactions: DEFAULT_RECENT_TRANSACTIONS,
            refresh_delay_ms: DEFAULT_REFRESH_DELAY_MS,
            services: Service::default_catalog(),
            gallery: GalleryItem::default_gallery(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or names another application.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: ConfigFile = utils::deserialize(path.as_ref()).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Config version {} is newer than this program supports ({})",
            config.config_version,
            CONFIG_VERSION
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("salon_home");

        let config = Config::create(&home_dir).await.unwrap();

        assert!(config.config_path().is_file());
        assert!(config.storage().is_dir());
        assert!(config.session().is_dir());
        assert_eq!(config.currency(), "€");
        assert_eq!(config.admin_password(), "admin123");
        assert_eq!(config.notification_timeout(), Duration::from_secs(5));
        assert_eq!(config.booking_window_months(), 3);
        assert_eq!(config.recent_transactions(), 10);
        assert_eq!(config.refresh_delay(), Duration::from_millis(1000));
        assert!(!config.services().is_empty());
    }

    #[tokio::test]
    async fn test_config_create_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path()).await.unwrap();
        let err = Config::create(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path()).await.unwrap();
        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(created.config_file, loaded.config_file);
        assert_eq!(created.root(), loaded.root());
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path().join("nope")).await.is_err());
    }

    #[tokio::test]
    async fn test_config_load_missing_storage() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path()).await.unwrap();
        tokio::fs::remove_dir_all(config.storage()).await.unwrap();
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("storage directory is missing"));
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "salon",
            "config_version": 1,
            "currency": "$",
            "locale": "es_ES"
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config.currency, "$");
        assert_eq!(config.locale, DateLocale::EsEs);
        assert_eq!(config.admin_password, DEFAULT_ADMIN_PASSWORD);
        assert_eq!(config.services, Service::default_catalog());
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        utils::write(&config_path, r#"{"app_name": "bookkeeper"}"#)
            .await
            .unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        let original = ConfigFile {
            currency: "$".into(),
            recent_transactions: 3,
            ..ConfigFile::default()
        };
        original.save(&path).await.unwrap();
        let read = ConfigFile::load(&path).await.unwrap();
        assert_eq!(original, read);
    }
}
