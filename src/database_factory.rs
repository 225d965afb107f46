use crate::cli::Args;
use crate::database::Database;
use crate::error::StoreResult;

pub const DEFAULT_DB_PATH: &str = "arithmetic_practice.db";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Whether to use in-memory database
    pub is_test_mode: bool,
    /// Custom database file path (ignored if in test mode)
    pub custom_path: Option<String>,
}

impl DatabaseConfig {
    /// Gets the effective database path
    pub fn get_path(&self) -> &str {
        if self.is_test_mode {
            ":memory:"
        } else {
            self.custom_path.as_deref().unwrap_or(DEFAULT_DB_PATH)
        }
    }
}

impl From<&Args> for DatabaseConfig {
    fn from(args: &Args) -> Self {
        DatabaseConfig {
            is_test_mode: args.test,
            custom_path: args
                .db_path
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned()),
        }
    }
}

/// Factory for creating Database instances
pub struct DatabaseFactory;

impl DatabaseFactory {
    /// Creates a database with the specified configuration
    pub fn create(config: DatabaseConfig) -> StoreResult<Database> {
        Database::new(config.get_path())
    }
}
