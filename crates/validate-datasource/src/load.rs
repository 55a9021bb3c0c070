//! Loading package definitions and datasource configurations from disk.
//!
//! `.json` files go through serde_json directly. Everything else is parsed
//! with yaml-rust2 and converted to a JSON value first, so both formats end
//! up deserialized by the same serde impls.

use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;
use yaml_rust2::{Yaml, YamlLoader};

/// Read and deserialize a YAML or JSON document.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let value = parse_document(&content, is_json)
        .with_context(|| format!("Failed to parse file: {}", path.display()))?;

    serde_json::from_value(value)
        .with_context(|| format!("Unexpected document structure in {}", path.display()))
}

fn parse_document(content: &str, is_json: bool) -> Result<Value> {
    if is_json {
        return Ok(serde_json::from_str(content)?);
    }

    let documents = YamlLoader::load_from_str(content)?;
    let first = documents
        .first()
        .ok_or_else(|| anyhow!("No YAML document found"))?;
    Ok(yaml_to_json(first))
}

/// Convert a parsed YAML node into a JSON value.
///
/// Mapping keys that are not strings are stringified. Aliases and invalid
/// nodes become `null`.
pub fn yaml_to_json(yaml: &Yaml) -> Value {
    match yaml {
        Yaml::Boolean(b) => Value::Bool(*b),
        Yaml::Integer(i) => Value::Number((*i).into()),
        Yaml::Real(text) => yaml
            .as_f64()
            .and_then(Number::from_f64)
            .map_or_else(|| Value::String(text.clone()), Value::Number),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Array(items) => Value::Array(items.iter().map(yaml_to_json).collect()),
        Yaml::Hash(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, value) in entries {
                if let Some(key) = key_to_string(key) {
                    map.insert(key, yaml_to_json(value));
                }
            }
            Value::Object(map)
        }
        _ => Value::Null,
    }
}

fn key_to_string(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        Yaml::Null => Some("null".to_string()),
        _ => None,
    }
}
