use axum::Router;
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) const DEFAULT_PORT: u16 = 8080;

/// Port from `LAB_PORT`, falling back to 8080 when unset or unparsable.
pub(crate) fn port_from_env() -> u16 {
    parse_port(std::env::var("LAB_PORT").ok())
}

fn parse_port(value: Option<String>) -> u16 {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid LAB_PORT {:?}; using {}", raw, DEFAULT_PORT);
            DEFAULT_PORT
        }),
        None => DEFAULT_PORT,
    }
}

pub(crate) fn spawn_http_server(port: u16, app: Router) -> JoinHandle<()> {
    tokio::spawn(async move {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        tracing::info!("HTTP server listening on {}", addr);
        if let Err(e) = axum_server::bind(addr)
            .serve(app.into_make_service())
            .await
        {
            tracing::error!("HTTP server on {} failed: {}", addr, e);
        }
    })
}

pub(crate) fn init_tracing(app_name: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            format!("vulnlab_axum=trace,vulnlab=trace,{app_name}=trace,tower_http=debug,info")
                .into()
        }

        #[cfg(not(debug_assertions))]
        {
            "info".into()
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    #[cfg(debug_assertions)]
    tracing::info!("Debug mode enabled - showing detailed logs by default");
    tracing::info!("You can change verbosity with the RUST_LOG environment variable.");
    tracing::info!("Example: RUST_LOG=vulnlab=debug,info ./demo-lab");
}
