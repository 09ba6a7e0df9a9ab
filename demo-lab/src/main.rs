use dotenvy::dotenv;

use vulnlab_axum::{LAB_ALLOWED_ORIGIN, LAB_ROUTE_PREFIX, LabState, lab_router};

mod server;
use server::{init_tracing, port_from_env, spawn_http_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    init_tracing("demo_lab");

    let state = LabState::from_env().await?;
    tracing::info!(
        "Lab API mounted at {} (allowed origin: {})",
        LAB_ROUTE_PREFIX.as_str(),
        LAB_ALLOWED_ORIGIN.as_str()
    );

    let app = lab_router(state);
    spawn_http_server(port_from_env(), app).await?;
    Ok(())
}
