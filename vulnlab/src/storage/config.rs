use std::{env, fmt, str::FromStr};

use super::errors::StorageError;

pub const DEFAULT_DATA_STORE_URL: &str = "sqlite::memory:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    Sqlite,
    Postgres,
}

impl FromStr for StoreType {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(StorageError::UnsupportedStore(other.to_string())),
        }
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

/// Connection settings for the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub store_type: StoreType,
    pub url: String,
    /// Insert the demo users, profiles and accounts on startup.
    pub seed_demo_data: bool,
}

impl StoreConfig {
    pub fn new(store_type: StoreType, url: impl Into<String>) -> Self {
        Self {
            store_type,
            url: url.into(),
            seed_demo_data: true,
        }
    }

    /// Seeded in-memory SQLite.
    pub fn in_memory() -> Self {
        Self::new(StoreType::Sqlite, DEFAULT_DATA_STORE_URL)
    }

    pub fn with_seed_demo_data(mut self, seed: bool) -> Self {
        self.seed_demo_data = seed;
        self
    }

    /// Reads `LAB_DATA_STORE_TYPE`, `LAB_DATA_STORE_URL` and `LAB_SEED_DEMO_DATA`.
    pub fn from_env() -> Result<Self, StorageError> {
        let store_type = match env::var("LAB_DATA_STORE_TYPE") {
            Ok(value) => value.parse()?,
            Err(_) => StoreType::Sqlite,
        };

        let url = match env::var("LAB_DATA_STORE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ if store_type == StoreType::Sqlite => DEFAULT_DATA_STORE_URL.to_string(),
            _ => {
                return Err(StorageError::Config(
                    "LAB_DATA_STORE_URL must be set for postgres".to_string(),
                ));
            }
        };

        let seed = env::var("LAB_SEED_DEMO_DATA")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        Ok(Self::new(store_type, url).with_seed_demo_data(seed))
    }

    pub(crate) fn is_in_memory(&self) -> bool {
        self.store_type == StoreType::Sqlite && self.url.contains(":memory:")
    }
}
