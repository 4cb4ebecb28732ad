mod handlers;
mod middleware;
mod routes;

pub use routes::create_router;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::due_date::DueDateCalculator;
use crate::processor::EventProcessor;
use crate::webhook::SignatureVerifier;
use crate::workorders::HttpWorkOrderClient;

/// Shared application state
pub struct AppState {
    pub verifier: SignatureVerifier,
    pub processor: Arc<EventProcessor>,
}

impl AppState {
    pub fn new(verifier: SignatureVerifier, processor: Arc<EventProcessor>) -> Self {
        Self {
            verifier,
            processor,
        }
    }

    /// Wire up production collaborators from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let client = HttpWorkOrderClient::from_config(config)?;

        let verifier = SignatureVerifier::new(
            config.webhook_secret.clone(),
            config.tolerance_minutes,
            clock.clone(),
        );
        let processor = EventProcessor::new(Arc::new(client), DueDateCalculator::new(clock));

        Ok(Self::new(verifier, Arc::new(processor)))
    }
}

/// Run the webhook server
pub async fn run_server(addr: SocketAddr, config: Config) -> Result<()> {
    tracing::info!(
        api_base_url = %config.api_base_url,
        organization_id = ?config.organization_id,
        tolerance_minutes = config.tolerance_minutes,
        "Starting webhook receiver"
    );

    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_router(state);

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
