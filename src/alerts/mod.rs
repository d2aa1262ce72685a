//! DataHub alert notifications
//!
//! Turns alert state transitions into checksum-tagged status lines and posts
//! them to the DataHub write endpoint.

pub mod config;
pub mod notifier;
pub mod plugin;

pub use config::{AlertState, DatahubSettings, EventType, NotifierOptions, SettingsError};
pub use notifier::{DatahubNotifier, Notification, NotifierError};
pub use plugin::NotifierPlugin;
