use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::authz::AccountChanges;
use crate::session::UserId;

use super::config::{StoreConfig, StoreType};
use super::errors::StorageError;
use super::postgres::*;
use super::sqlite::*;
use super::types::{
    Account, CredentialRow, DataStore, PostgresDataStore, Profile, SqliteDataStore, UserRow,
};

/// Credential store shared by every request.
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Clone, Debug)]
pub struct LabStore {
    store: Arc<dyn DataStore>,
    store_type: StoreType,
}

impl LabStore {
    /// Opens the pool described by `config`, creates the tables and, if
    /// configured, inserts the demo data.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StorageError> {
        tracing::info!(store_type = %config.store_type, "Initializing data store");

        let store: Arc<dyn DataStore> = match config.store_type {
            StoreType::Sqlite => {
                let opts = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
                let pool_options = if config.is_in_memory() {
                    // Every in-memory connection is a separate database; keep exactly one alive.
                    SqlitePoolOptions::new()
                        .max_connections(1)
                        .min_connections(1)
                        .idle_timeout(None)
                        .max_lifetime(None)
                } else {
                    SqlitePoolOptions::new()
                };
                Arc::new(SqliteDataStore {
                    pool: pool_options.connect_with(opts).await?,
                })
            }
            StoreType::Postgres => Arc::new(PostgresDataStore {
                pool: PgPoolOptions::new().connect(&config.url).await?,
            }),
        };

        let lab_store = Self {
            store,
            store_type: config.store_type,
        };
        lab_store.init(config.seed_demo_data).await?;

        tracing::info!(store_type = %config.store_type, "Connected to data store");
        Ok(lab_store)
    }

    pub fn store_type(&self) -> StoreType {
        self.store_type
    }

    async fn init(&self, seed_demo_data: bool) -> Result<(), StorageError> {
        match (self.store.as_sqlite(), self.store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                if seed_demo_data {
                    seed_demo_data_sqlite(pool).await?;
                }
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                if seed_demo_data {
                    seed_demo_data_postgres(pool).await?;
                }
            }
            _ => return Err(unsupported()),
        }
        if seed_demo_data {
            tracing::info!("Demo users seeded");
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) async fn get_credentials(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRow>, StorageError> {
        if let Some(pool) = self.store.as_sqlite() {
            get_credentials_sqlite(pool, username).await
        } else if let Some(pool) = self.store.as_postgres() {
            get_credentials_postgres(pool, username).await
        } else {
            Err(unsupported())
        }
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StorageError> {
        if let Some(pool) = self.store.as_sqlite() {
            get_profile_sqlite(pool, user_id).await
        } else if let Some(pool) = self.store.as_postgres() {
            get_profile_postgres(pool, user_id).await
        } else {
            Err(unsupported())
        }
    }

    /// Returns [`StorageError::NotFound`] when the user has no profile row.
    #[tracing::instrument(skip(self, email), fields(user_id = %user_id))]
    pub async fn update_email(&self, user_id: UserId, email: &str) -> Result<(), StorageError> {
        let affected = if let Some(pool) = self.store.as_sqlite() {
            update_email_sqlite(pool, user_id, email).await?
        } else if let Some(pool) = self.store.as_postgres() {
            update_email_postgres(pool, user_id, email).await?
        } else {
            return Err(unsupported());
        };
        if affected == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_account(&self, user_id: UserId) -> Result<Option<Account>, StorageError> {
        if let Some(pool) = self.store.as_sqlite() {
            get_account_sqlite(pool, user_id).await
        } else if let Some(pool) = self.store.as_postgres() {
            get_account_postgres(pool, user_id).await
        } else {
            Err(unsupported())
        }
    }

    /// Writes exactly the fields present in `changes`.
    #[tracing::instrument(skip(self, changes), fields(user_id = %changes.user_id, mode = %changes.mode))]
    pub async fn apply_account_changes(&self, changes: &AccountChanges) -> Result<(), StorageError> {
        let affected = if let Some(pool) = self.store.as_sqlite() {
            update_account_sqlite(pool, changes).await?
        } else if let Some(pool) = self.store.as_postgres() {
            update_account_postgres(pool, changes).await?
        } else {
            return Err(unsupported());
        };
        if affected == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    /// Runs a prepared `SELECT id, username` query, binding `term` as its only
    /// parameter when present.
    pub async fn search_users(
        &self,
        query: &str,
        term: Option<&str>,
    ) -> Result<Vec<UserRow>, StorageError> {
        if let Some(pool) = self.store.as_sqlite() {
            search_users_sqlite(pool, query, term).await
        } else if let Some(pool) = self.store.as_postgres() {
            search_users_postgres(pool, query, term).await
        } else {
            Err(unsupported())
        }
    }
}

fn unsupported() -> StorageError {
    StorageError::UnsupportedStore("unknown".to_string())
}
