use crate::error::StoreResult;
use crate::test_parameters::{RawTestParameters, TestParameters};
use chrono::{DateTime, Utc};
use log::{info, warn};
use rusqlite::{Connection, OptionalExtension, params};

/// Key under which the difficulty settings are stored
pub const TEST_PARAMETERS_KEY: &str = "testParameters";

pub struct SettingsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SettingsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SettingsRepository { conn }
    }

    pub fn save(&self, test_parameters: &TestParameters) -> StoreResult<()> {
        let json = serde_json::to_string(test_parameters)?;
        self.save_value(&json)?;
        info!("Saved settings: {}", json);
        Ok(())
    }

    fn save_value(&self, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at",
            params![TEST_PARAMETERS_KEY, value, Utc::now()],
        )?;
        Ok(())
    }

    pub fn load_value(&self) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [TEST_PARAMETERS_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Returns the stored record without sanitizing it.
    ///
    /// A record that does not parse as a settings object is treated as absent.
    pub fn load_raw(&self) -> StoreResult<Option<RawTestParameters>> {
        let Some(value) = self.load_value()? else {
            return Ok(None);
        };
        match serde_json::from_str::<RawTestParameters>(&value) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) => {
                warn!("Failed to parse saved settings, ignoring them: {}", e);
                Ok(None)
            }
        }
    }

    pub fn updated_at(&self) -> StoreResult<Option<DateTime<Utc>>> {
        let updated_at = self
            .conn
            .query_row(
                "SELECT updated_at FROM settings WHERE key = ?1",
                [TEST_PARAMETERS_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(updated_at)
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.conn.execute(
            "DELETE FROM settings WHERE key = ?1",
            [TEST_PARAMETERS_KEY],
        )?;
        Ok(())
    }
}
