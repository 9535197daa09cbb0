//! Contact Mailer - Main entry point
//!
//! Serves the mail dispatch endpoint over HTTP.

use anyhow::Result;
use contact_mailer::client::{AsyncBrevoClient, EmailProvider};
use contact_mailer::server::{create_router, run_server, AppState};
use contact_mailer::services::{MailDispatchService, MailDispatchServiceImpl};
use contact_mailer::{BrevoClient, Config};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    let level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting contact mailer with provider URL: {}",
        config.brevo_api_url
    );

    let routing = config.mail_routing()?;

    let provider = AsyncBrevoClient::new(BrevoClient::new(&config));
    let metrics = provider.metrics().cloned();
    let provider = Arc::new(provider) as Arc<dyn EmailProvider>;

    let dispatcher =
        Arc::new(MailDispatchServiceImpl::new(provider, routing)) as Arc<dyn MailDispatchService>;

    let router = create_router(AppState::new(dispatcher, metrics));
    run_server(router, &config.bind_address).await?;

    info!("Contact mailer shutdown complete");
    Ok(())
}
