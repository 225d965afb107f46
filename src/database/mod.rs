pub mod connection;
pub mod settings;

use crate::error::StoreResult;
use crate::test_parameters::{TestParameters, sanitize_parameters};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

pub use settings::SettingsRepository;

/// Main Database struct providing access to the settings store
pub struct Database {
    pub conn: Connection,
}

impl Database {
    pub fn new(db_path: &str) -> StoreResult<Self> {
        let conn = connection::init_connection(db_path)?;
        Ok(Database { conn })
    }

    pub fn save_test_parameters(&self, test_parameters: &TestParameters) -> StoreResult<()> {
        SettingsRepository::new(&self.conn).save(test_parameters)
    }

    /// Loads and sanitizes the stored settings, or returns the defaults if none are usable
    pub fn load_test_parameters(&self) -> StoreResult<TestParameters> {
        let raw = SettingsRepository::new(&self.conn).load_raw()?;
        Ok(raw
            .map(|raw| sanitize_parameters(&raw))
            .unwrap_or_default())
    }

    pub fn has_saved_test_parameters(&self) -> StoreResult<bool> {
        Ok(SettingsRepository::new(&self.conn).load_value()?.is_some())
    }

    pub fn clear_test_parameters(&self) -> StoreResult<()> {
        SettingsRepository::new(&self.conn).clear()
    }

    pub fn settings_updated_at(&self) -> StoreResult<Option<DateTime<Utc>>> {
        SettingsRepository::new(&self.conn).updated_at()
    }
}
