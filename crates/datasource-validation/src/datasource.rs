//! Datasource configuration types (the instance being validated).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user-authored datasource configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasourceConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default)]
    pub inputs: Vec<InputConfig>,
}

/// One configured input of a datasource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(rename = "type")]
    pub input_type: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<IndexMap<String, VarEntry>>,

    #[serde(default)]
    pub streams: Vec<StreamConfig>,
}

/// One configured stream of an input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub dataset: DatasetRef,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<IndexMap<String, VarEntry>>,
}

/// The dataset a stream instance was created from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub dataset_type: Option<String>,
}

/// A configured variable value.
///
/// A missing `value` and an explicit `null` are both "absent".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VarEntry {
    #[serde(default)]
    pub value: Option<Value>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub var_type: Option<String>,
}

impl VarEntry {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            var_type: None,
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }
}

impl InputConfig {
    /// Look up the configured entry for a variable.
    pub fn var(&self, name: &str) -> Option<&VarEntry> {
        self.vars.as_ref().and_then(|vars| vars.get(name))
    }
}

impl StreamConfig {
    /// Look up the configured entry for a variable.
    pub fn var(&self, name: &str) -> Option<&VarEntry> {
        self.vars.as_ref().and_then(|vars| vars.get(name))
    }
}

fn default_true() -> bool {
    true
}
