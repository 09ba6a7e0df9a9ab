use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Record not found")]
    NotFound,

    #[error("Unsupported store type: {0}. Supported types are 'sqlite' and 'postgres'")]
    UnsupportedStore(String),

    #[error("Store configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
