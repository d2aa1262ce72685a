//! DataHub Notify
//!
//! Sends one status line for an alert state change.
//!
//! Run with: cargo run
//!
//! Environment variables:
//! - DATAHUB_CONFIG: Configuration file (default: conf/localDefaults.ini)
//! - DATAHUB_TAG: Trend tag name (required)
//! - DATAHUB_SERVER: DataHub server name
//! - DATAHUB_PORT: DataHub server port
//! - DATAHUB_ALERT_VALUE: Value sent when alerting
//! - DATAHUB_OK_VALUE: Value sent when ok
//! - DATAHUB_STATE: Alert state: ok, alerting, no_data, pending, paused (default: alerting)
//! - DATAHUB_HOST_SUFFIX: Appended to the server name in the write address (default: empty)
//! - DATAHUB_STRICT_KEYS: Refuse to send without a configured key (default: false)
//! - DATAHUB_DRY_RUN: Print the line instead of sending it (default: false)
//! - RUST_LOG: Log level (default: info)

use std::sync::Arc;

use datahub_notify::alerts::plugin::NotifierPlugin;
use datahub_notify::config::{ConfigLoader, MissingKeyPolicy, SharedConfig, DEFAULT_CONFIG_PATH};
use datahub_notify::{AlertState, DatahubNotifier, DatahubSettings, NotifierOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn env_or_default(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datahub_notify=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path =
        std::env::var("DATAHUB_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Arc::new(SharedConfig::load(&ConfigLoader::new(&config_path)));

    let settings = DatahubSettings::new(
        env_or_default("DATAHUB_TAG"),
        env_or_default("DATAHUB_SERVER"),
        env_or_default("DATAHUB_PORT"),
    )
    .with_values(
        env_or_default("DATAHUB_ALERT_VALUE"),
        env_or_default("DATAHUB_OK_VALUE"),
    );

    let state: AlertState = std::env::var("DATAHUB_STATE")
        .ok()
        .map(|s| s.parse::<AlertState>())
        .transpose()?
        .unwrap_or_default();

    let policy = if env_flag("DATAHUB_STRICT_KEYS") {
        MissingKeyPolicy::Strict
    } else {
        MissingKeyPolicy::Permissive
    };
    let options = NotifierOptions::default()
        .with_host_suffix(env_or_default("DATAHUB_HOST_SUFFIX"))
        .with_missing_key_policy(policy);

    {
        let snapshot = config.snapshot();
        let plugin = NotifierPlugin::datahub(&snapshot.config.keys);
        tracing::info!("DataHub configuration:");
        tracing::info!("  Config file: {}", config_path);
        tracing::info!("  Configured: {}", snapshot.status.is_configured());
        tracing::info!("  Table entries: {}", snapshot.config.table.len());
        tracing::info!("  Keys: {}", snapshot.config.keys.len());
        tracing::debug!("  Plugin: {}", serde_json::to_string(&plugin)?);
    }

    let notifier = DatahubNotifier::new(settings, options, config)?;

    if env_flag("DATAHUB_DRY_RUN") {
        let notification = notifier.prepare(state, chrono::Utc::now().timestamp())?;
        println!("POST {}", notification.address);
        println!("{}", notification.body());
        return Ok(());
    }

    match notifier.notify(state).await {
        Ok(notification) => {
            tracing::info!(
                event_type = %notification.event_type,
                address = %notification.address,
                "Notification delivered"
            );
        }
        Err(e) => {
            // Best-effort reporting: log and exit cleanly
            tracing::error!(error = %e, "Notification failed");
        }
    }

    Ok(())
}
