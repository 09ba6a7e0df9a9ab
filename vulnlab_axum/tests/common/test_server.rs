use std::net::SocketAddr;

use axum::Router;
use tokio::task::JoinHandle;
use vulnlab::{LabStore, SessionConfig, SessionManager, SessionSecret, StoreConfig};
use vulnlab_axum::{LAB_ROUTE_PREFIX, LabState, lab_router, lab_router_no_trace};

const TEST_SECRET: &str = "integration-test-signing-secret";

/// Lab router served on 127.0.0.1 with a fresh in-memory store
pub struct TestServer {
    server_handle: JoinHandle<()>,
    /// Address plus route prefix, e.g. `http://127.0.0.1:41234/api`
    pub base_url: String,
    pub cookie_name: String,
    pub state: LabState,
}

impl TestServer {
    pub async fn start() -> Result<Self, Box<dyn std::error::Error>> {
        Self::start_with_secret(TEST_SECRET).await
    }

    pub async fn start_with_secret(secret: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Self::start_with(secret, lab_router_no_trace).await
    }

    /// Serves the production router, CORS and tracing layers included.
    pub async fn start_with_layers() -> Result<Self, Box<dyn std::error::Error>> {
        Self::start_with(TEST_SECRET, lab_router).await
    }

    async fn start_with(
        secret: &str,
        build: fn(LabState) -> Router,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let manager = SessionManager::new(SessionConfig::new(SessionSecret::new(
            secret.as_bytes(),
        )?));
        let store = LabStore::connect(&StoreConfig::in_memory()).await?;
        let state = LabState::new(manager, store)?;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let app = build(state.clone());

        let server_handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {e}");
            }
        });

        Ok(Self {
            server_handle,
            base_url: format!("http://{addr}{}", LAB_ROUTE_PREFIX.as_str()),
            cookie_name: state.manager.cookie_name().to_string(),
            state,
        })
    }

    pub fn browser(&self) -> super::MockBrowser {
        super::MockBrowser::new(&self.base_url, &self.cookie_name)
    }

    pub async fn shutdown(self) {
        self.server_handle.abort();
        let _ = self.server_handle.await;
    }
}
