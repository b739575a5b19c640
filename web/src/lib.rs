use domain::{CredentialManager, SummaryProvider};
use log::*;
use service::config::Config;
use std::sync::Arc;

mod controller;
mod error;
mod params;
mod response;
pub mod router;

pub use error::{Error, Result, WebErrorKind};

/// State shared by every handler. The credential store is the only mutable
/// piece and guards itself.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub credentials: Arc<CredentialManager>,
    pub summarizer: Arc<dyn SummaryProvider>,
}

impl AppState {
    pub fn new(
        config: Config,
        credentials: Arc<CredentialManager>,
        summarizer: Arc<dyn SummaryProvider>,
    ) -> Self {
        Self {
            config,
            credentials,
            summarizer,
        }
    }
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let host = app_state.config.interface.clone();
    let port = app_state.config.port;
    let server_url = format!("{host}:{port}");

    info!("Server starting... listening for connections on http://{server_url}");

    let listener = tokio::net::TcpListener::bind(server_url).await?;
    axum::serve(listener, router::define_routes(app_state)).await
}
