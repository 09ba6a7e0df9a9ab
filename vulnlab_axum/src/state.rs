use vulnlab::lab::{CommentBoard, FetchError, Fetcher};
use vulnlab::{LabStore, SessionConfig, SessionManager, StoreConfig};

/// Shared application state handed to every handler.
#[derive(Clone, Debug)]
pub struct LabState {
    pub manager: SessionManager,
    pub store: LabStore,
    pub comments: CommentBoard,
    pub fetcher: Fetcher,
}

impl LabState {
    pub fn new(manager: SessionManager, store: LabStore) -> Result<Self, FetchError> {
        Ok(Self {
            manager,
            store,
            comments: CommentBoard::new(),
            fetcher: Fetcher::new()?,
        })
    }

    /// Builds the state from `AUTH_SERVER_SECRET`, `SESSION_COOKIE_*` and
    /// `LAB_DATA_STORE_*`, connecting to and initializing the store.
    pub async fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let manager = SessionManager::new(SessionConfig::from_env()?);
        let store = LabStore::connect(&StoreConfig::from_env()?).await?;
        Ok(Self::new(manager, store)?)
    }
}
