//! Server Implementation
//!
//! HTTP 服务器启动和管理

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::core::{Config, Result, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for sharing with tests or
    /// embedded clients)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config),
        };

        // Start the realtime gateway
        let hub = state.hub.clone();
        let gateway_addr = format!("0.0.0.0:{}", self.config.gateway_tcp_port);
        tokio::spawn(async move {
            if let Err(e) = hub.start_tcp_server(&gateway_addr).await {
                tracing::error!("Gateway TCP server failed: {}", e);
            }
        });

        let app: Router = api::router()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("🍜 Floor server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;

        let shutdown_hub = state.hub.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
                shutdown_hub.shutdown();
            })
            .await?;

        Ok(())
    }
}
