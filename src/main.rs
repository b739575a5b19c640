use domain::gateway::hugging_face;
use domain::{CredentialManager, InMemoryStorage};
use log::*;
use service::{config::Config, logging::Logger};
use std::error::Error;
use std::sync::Arc;
use web::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::new();
    Logger::init_logger(&config)?;

    info!("Starting up the AI Meeting Assistant backend...");
    debug!("Using client secrets file: {}", config.client_secrets_file());

    let summarizer = hugging_face::Client::new(
        config.huggingface_api_url(),
        config.huggingface_api_key(),
    )?;

    // Credentials live only as long as the process.
    let credentials = Arc::new(CredentialManager::new(InMemoryStorage::new()));

    let app_state = AppState::new(config, credentials, Arc::new(summarizer));

    web::init_server(app_state).await?;

    Ok(())
}
