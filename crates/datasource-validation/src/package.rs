//! Package definition types.
//!
//! A package definition declares the input types a datasource may configure
//! (grouped into config templates) and the datasets whose streams attach to
//! those inputs. Only the fields that drive validation are modelled; anything
//! else in a package manifest is ignored on deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A package as published by a registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Datasets and the streams they contribute to each input type
    #[serde(default)]
    pub datasets: Vec<DatasetDefinition>,

    /// `None` and an empty list both mean "nothing to validate"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_templates: Option<Vec<ConfigTemplate>>,
}

/// A dataset and its stream declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetDefinition {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub streams: Vec<StreamDefinition>,
}

/// A stream declared by a dataset for one input type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDefinition {
    /// The input type this stream belongs to
    #[serde(default)]
    pub input: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// A stream declared disabled is never validated
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub vars: Vec<VarDefinition>,
}

/// A group of inputs offered together by a package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub inputs: Vec<InputDefinition>,
}

/// An input type and its top-level variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDefinition {
    #[serde(rename = "type")]
    pub input_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub vars: Vec<VarDefinition>,
}

/// A declared variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDefinition {
    pub name: String,

    #[serde(rename = "type", default)]
    pub var_type: VarType,

    #[serde(default)]
    pub required: bool,

    /// The value is a sequence rather than a scalar
    #[serde(default)]
    pub multi: bool,

    /// Never validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VarDefinition {
    /// Create a plain optional scalar variable of the given type.
    pub fn new(name: impl Into<String>, var_type: VarType) -> Self {
        Self {
            name: name.into(),
            var_type,
            required: false,
            multi: false,
            default: None,
            title: None,
            description: None,
        }
    }

    /// Mark the variable as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the variable as taking a sequence of values
    pub fn multi(mut self) -> Self {
        self.multi = true;
        self
    }

    /// Set the declared default value
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Variable types.
///
/// Only `yaml` carries a syntax rule. Every other type name (`password`,
/// `bool`, `integer`, ...) deserializes to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    #[default]
    Text,
    Yaml,
    #[serde(other)]
    Other,
}

fn default_true() -> bool {
    true
}
