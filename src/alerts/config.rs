//! Notifier configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::MissingKeyPolicy;

/// Per-notification settings, as stored with the alert notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatahubSettings {
    /// Trend tag name written to DataHub
    pub tag: String,
    /// DataHub server name
    pub server: String,
    /// DataHub server port
    pub port: String,
    /// Value sent when the alert fires
    #[serde(rename = "alertvalue")]
    pub alert_value: String,
    /// Value sent when the alert resolves
    #[serde(rename = "okvalue")]
    pub ok_value: String,
}

impl DatahubSettings {
    pub fn new(
        tag: impl Into<String>,
        server: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            server: server.into(),
            port: port.into(),
            ..Default::default()
        }
    }

    /// Set the values sent on trigger and on resolve
    pub fn with_values(mut self, alert_value: impl Into<String>, ok_value: impl Into<String>) -> Self {
        self.alert_value = alert_value.into();
        self.ok_value = ok_value.into();
        self
    }

    /// Parse and validate settings from their JSON form
    pub fn from_json(json: &serde_json::Value) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_value(json.clone())?;
        settings.validate()?;
        Ok(settings)
    }

    /// The tag is the only required setting
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tag.is_empty() {
            return Err(SettingsError::MissingTag);
        }
        Ok(())
    }

    /// Value to send for an event
    pub fn value_for(&self, event: EventType) -> &str {
        match event {
            EventType::Trigger => &self.alert_value,
            EventType::Resolve => &self.ok_value,
        }
    }
}

/// State of the alert rule at notification time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertState {
    Ok,
    #[default]
    Alerting,
    NoData,
    Pending,
    Paused,
}

impl AlertState {
    /// Any state other than `ok` is reported as a trigger
    pub fn event_type(self) -> EventType {
        match self {
            AlertState::Ok => EventType::Resolve,
            _ => EventType::Trigger,
        }
    }
}

impl std::str::FromStr for AlertState {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ok" => Ok(AlertState::Ok),
            "alerting" => Ok(AlertState::Alerting),
            "no_data" | "nodata" => Ok(AlertState::NoData),
            "pending" => Ok(AlertState::Pending),
            "paused" => Ok(AlertState::Paused),
            other => Err(SettingsError::UnknownState(other.to_string())),
        }
    }
}

/// Kind of notification sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Trigger,
    Resolve,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Trigger => write!(f, "trigger"),
            EventType::Resolve => write!(f, "resolve"),
        }
    }
}

/// Transport and policy options shared by all DataHub notifiers
#[derive(Debug, Clone)]
pub struct NotifierOptions {
    /// Appended to the server name when building the write address
    pub host_suffix: String,
    /// HTTP request timeout
    pub timeout: Duration,
    /// What to do when no key is configured for the destination
    pub missing_key_policy: MissingKeyPolicy,
}

impl Default for NotifierOptions {
    fn default() -> Self {
        Self {
            host_suffix: String::new(),
            timeout: Duration::from_secs(30),
            missing_key_policy: MissingKeyPolicy::Permissive,
        }
    }
}

impl NotifierOptions {
    pub fn with_host_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.host_suffix = suffix.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_missing_key_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key_policy = policy;
        self
    }
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Could not find tag name property in settings")]
    MissingTag,

    #[error("Invalid settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown alert state: {0}")]
    UnknownState(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_from_json() {
        let settings = DatahubSettings::from_json(&json!({
            "tag": "PUMP_TRIP",
            "server": "scbosco1",
            "port": "9080",
            "alertvalue": "1",
            "okvalue": "0",
        }))
        .unwrap();

        assert_eq!(settings.tag, "PUMP_TRIP");
        assert_eq!(settings.server, "scbosco1");
        assert_eq!(settings.port, "9080");
        assert_eq!(settings.alert_value, "1");
        assert_eq!(settings.ok_value, "0");
    }

    #[test]
    fn test_missing_tag_rejected() {
        let err = DatahubSettings::from_json(&json!({ "server": "scbosco1" })).unwrap_err();
        assert!(matches!(err, SettingsError::MissingTag));

        let err = DatahubSettings::from_json(&json!({ "tag": "" })).unwrap_err();
        assert!(matches!(err, SettingsError::MissingTag));
    }

    #[test]
    fn test_wrong_json_type_rejected() {
        let err = DatahubSettings::from_json(&json!({ "tag": 5 })).unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_event_selection() {
        let settings = DatahubSettings::new("t", "s", "1").with_values("ALARM", "CLEAR");

        assert_eq!(AlertState::Ok.event_type(), EventType::Resolve);
        for state in [
            AlertState::Alerting,
            AlertState::NoData,
            AlertState::Pending,
            AlertState::Paused,
        ] {
            assert_eq!(state.event_type(), EventType::Trigger);
        }

        assert_eq!(settings.value_for(EventType::Trigger), "ALARM");
        assert_eq!(settings.value_for(EventType::Resolve), "CLEAR");
    }

    #[test]
    fn test_alert_state_parse() {
        assert_eq!("OK".parse::<AlertState>().unwrap(), AlertState::Ok);
        assert_eq!("no_data".parse::<AlertState>().unwrap(), AlertState::NoData);
        assert!("firing".parse::<AlertState>().is_err());
    }
}
