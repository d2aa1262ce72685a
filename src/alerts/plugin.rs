//! Registration metadata for the DataHub notifier
//!
//! Describes the notifier type and the settings fields an operator fills in.
//! The server select lists every host that has a key configured.

use serde::{Deserialize, Serialize};

use crate::config::KeyStore;

/// Notifier type identifier
pub const DATAHUB_NOTIFIER_TYPE: &str = "datahub";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierPlugin {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub options: Vec<NotifierOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifierOption {
    pub label: String,
    pub element: ElementType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub select_options: Vec<SelectOption>,
    pub property_name: String,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Input,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl NotifierOption {
    fn text(label: &str, property_name: &str, placeholder: &str) -> Self {
        Self {
            label: label.to_string(),
            element: ElementType::Input,
            input_type: Some(InputType::Text),
            placeholder: placeholder.to_string(),
            select_options: Vec::new(),
            property_name: property_name.to_string(),
            required: true,
        }
    }

    fn select(label: &str, property_name: &str, values: Vec<String>) -> Self {
        Self {
            label: label.to_string(),
            element: ElementType::Select,
            input_type: None,
            placeholder: String::new(),
            select_options: values
                .into_iter()
                .map(|value| SelectOption {
                    label: value.clone(),
                    value,
                })
                .collect(),
            property_name: property_name.to_string(),
            required: true,
        }
    }
}

impl NotifierPlugin {
    /// Descriptor for the DataHub notifier, offering the hosts in `keys`
    pub fn datahub(keys: &KeyStore) -> Self {
        Self {
            kind: DATAHUB_NOTIFIER_TYPE.to_string(),
            name: "DataHub".to_string(),
            description: "Sends notifications to DataHub".to_string(),
            options: vec![
                NotifierOption::text("Tag Name", "tag", "Trend Tag Name"),
                NotifierOption::select("Datahub Server", "server", keys.hosts()),
                NotifierOption::text("Datahub Port", "port", "Datahub Server Port to Send to"),
                NotifierOption::text(
                    "Value To Send When In Alert",
                    "alertvalue",
                    "Value to Send when in Alert",
                ),
                NotifierOption::text("Value To Send When OK", "okvalue", "Value to Send when OK"),
            ],
        }
    }

    /// Look up an option by its settings property name
    pub fn option(&self, property_name: &str) -> Option<&NotifierOption> {
        self.options
            .iter()
            .find(|o| o.property_name == property_name)
    }
}
