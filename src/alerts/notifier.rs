//! DataHub notifier: encodes a status line and posts it to the write endpoint

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;

use super::config::{AlertState, DatahubSettings, EventType, NotifierOptions, SettingsError};
use crate::config::SharedConfig;
use crate::line::{EncodeError, LineEncoder, StatusLine};

/// Content type the DataHub write endpoint expects
const WRITE_CONTENT_TYPE: &str = "application/x-www-form-url";

/// A fully prepared notification, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub event_type: EventType,
    pub address: String,
    pub line: StatusLine,
}

impl Notification {
    /// Request body
    pub fn body(&self) -> String {
        self.line.to_string()
    }
}

/// Sends alert state changes to a DataHub server
pub struct DatahubNotifier {
    settings: DatahubSettings,
    options: NotifierOptions,
    config: Arc<SharedConfig>,
    client: reqwest::Client,
}

impl DatahubNotifier {
    /// Create a notifier; fails if the settings carry no tag
    pub fn new(
        settings: DatahubSettings,
        options: NotifierOptions,
        config: Arc<SharedConfig>,
    ) -> Result<Self, NotifierError> {
        settings.validate()?;

        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(NotifierError::Client)?;

        Ok(Self {
            settings,
            options,
            config,
            client,
        })
    }

    /// Create a notifier from the JSON settings stored with the notification
    pub fn from_json(
        json: &serde_json::Value,
        options: NotifierOptions,
        config: Arc<SharedConfig>,
    ) -> Result<Self, NotifierError> {
        Self::new(DatahubSettings::from_json(json)?, options, config)
    }

    pub fn settings(&self) -> &DatahubSettings {
        &self.settings
    }

    /// Write endpoint for the configured server
    pub fn address(&self) -> String {
        format!(
            "http://{}{}:{}/write",
            self.settings.server, self.options.host_suffix, self.settings.port
        )
    }

    /// Build the notification for `state` at `now` (unix seconds)
    pub fn prepare(&self, state: AlertState, now: i64) -> Result<Notification, NotifierError> {
        let snapshot = self.config.snapshot();
        let event_type = state.event_type();
        let value = self.settings.value_for(event_type);

        let key = snapshot
            .config
            .keys
            .resolve_with(
                &self.settings.server,
                &self.settings.port,
                self.options.missing_key_policy,
            )
            .map_err(EncodeError::from)?;
        if key.is_empty() {
            tracing::warn!(
                server = %self.settings.server,
                port = %self.settings.port,
                "No DataHub key configured, sending with empty key"
            );
        }

        let encoder = LineEncoder::new(&snapshot.config.table).map_err(EncodeError::from)?;
        let line = encoder.status_line(&self.settings.tag, now, value, key);

        Ok(Notification {
            event_type,
            address: self.address(),
            line,
        })
    }

    /// Encode and send the notification for `state`
    pub async fn notify(&self, state: AlertState) -> Result<Notification, NotifierError> {
        tracing::info!(
            state = ?state,
            tag = %self.settings.tag,
            server = %self.settings.server,
            port = %self.settings.port,
            alert_value = %self.settings.alert_value,
            ok_value = %self.settings.ok_value,
            "Trigger to Datahub"
        );

        let notification = self.prepare(state, chrono::Utc::now().timestamp())?;
        self.send(&notification).await?;
        Ok(notification)
    }

    /// Post a prepared notification
    pub async fn send(&self, notification: &Notification) -> Result<(), NotifierError> {
        let body = notification.body();

        tracing::info!(
            event_type = %notification.event_type,
            send = %body,
            "Notifying Datahub"
        );

        let response = self
            .client
            .post(&notification.address)
            .header(CONTENT_TYPE, WRITE_CONTENT_TYPE)
            .body(body.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    event_type = %notification.event_type,
                    send = %body,
                    error = %e,
                    "Failed to send alert to Datahub"
                );
                NotifierError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                event_type = %notification.event_type,
                status = %status,
                "Datahub rejected notification"
            );
            return Err(NotifierError::Status(status.as_u16()));
        }

        tracing::debug!(
            address = %notification.address,
            "Datahub notification sent"
        );

        Ok(())
    }
}

/// Notifier errors
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Failed to send to Datahub: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Datahub returned status {0}")]
    Status(u16),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
