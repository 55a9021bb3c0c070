//! The error tree.
//!
//! Results mirror the shape of the configuration that was checked. Leaves are
//! `None` (serialized as `null`) when a field is fine, or a non-empty list of
//! messages. Levels that were not checked are left out entirely rather than
//! filled with nulls, which is why `vars` and `streams` are optional.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Messages reported for one field.
pub type ErrorList = Vec<String>;

/// Per-variable results, keyed by variable name.
pub type VarsValidationResult = IndexMap<String, Option<ErrorList>>;

/// Result for one stream instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamValidationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<VarsValidationResult>,
}

/// Result for one input instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputValidationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<VarsValidationResult>,

    /// Keyed by stream instance id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streams: Option<IndexMap<String, StreamValidationResult>>,
}

/// Result for a whole datasource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasourceValidationResult {
    pub name: Option<ErrorList>,

    pub description: Option<ErrorList>,

    /// `None` when the package declares no inputs at all, keyed by input
    /// type otherwise
    pub inputs: Option<IndexMap<String, InputValidationResult>>,
}

/// Whether a result (at any level) carries at least one error.
pub trait HasErrors {
    /// Number of fields with a non-empty error list
    fn error_count(&self) -> usize;

    fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Free-function form of [`HasErrors::has_errors`].
pub fn validation_has_errors<R: HasErrors + ?Sized>(result: &R) -> bool {
    result.has_errors()
}

fn leaf_count(errors: &Option<ErrorList>) -> usize {
    match errors {
        Some(list) if !list.is_empty() => 1,
        _ => 0,
    }
}

impl HasErrors for VarsValidationResult {
    fn error_count(&self) -> usize {
        self.values().map(leaf_count).sum()
    }

    fn has_errors(&self) -> bool {
        self.values().any(|errors| leaf_count(errors) > 0)
    }
}

impl HasErrors for StreamValidationResult {
    fn error_count(&self) -> usize {
        self.vars.as_ref().map_or(0, HasErrors::error_count)
    }
}

impl HasErrors for InputValidationResult {
    fn error_count(&self) -> usize {
        let vars = self.vars.as_ref().map_or(0, HasErrors::error_count);
        let streams: usize = self
            .streams
            .iter()
            .flat_map(|streams| streams.values())
            .map(HasErrors::error_count)
            .sum();
        vars + streams
    }
}

impl HasErrors for DatasourceValidationResult {
    fn error_count(&self) -> usize {
        let own = leaf_count(&self.name) + leaf_count(&self.description);
        let inputs: usize = self
            .inputs
            .iter()
            .flat_map(|inputs| inputs.values())
            .map(HasErrors::error_count)
            .sum();
        own + inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(entries: &[(&str, Option<&str>)]) -> VarsValidationResult {
        entries
            .iter()
            .map(|(name, error)| (name.to_string(), error.map(|e| vec![e.to_string()])))
            .collect()
    }

    fn input(
        input_vars: VarsValidationResult,
        stream_vars: VarsValidationResult,
    ) -> InputValidationResult {
        let mut streams = IndexMap::new();
        streams.insert(
            "stream1".to_string(),
            StreamValidationResult {
                vars: Some(stream_vars),
            },
        );
        InputValidationResult {
            vars: Some(input_vars),
            streams: Some(streams),
        }
    }

    #[test]
    fn test_stream_results() {
        let with_error = StreamValidationResult {
            vars: Some(vars(&[("foo", Some("foo error")), ("bar", None)])),
        };
        assert!(validation_has_errors(&with_error));

        let clean = StreamValidationResult {
            vars: Some(vars(&[("foo", None), ("bar", None)])),
        };
        assert!(!validation_has_errors(&clean));
        assert!(!StreamValidationResult::default().has_errors());
    }

    #[test]
    fn test_input_results() {
        let clean = || vars(&[("foo", None), ("bar", None)]);
        let dirty = || vars(&[("foo", Some("foo error")), ("bar", None)]);

        assert!(input(dirty(), clean()).has_errors());
        assert!(input(clean(), dirty()).has_errors());
        assert!(!input(clean(), clean()).has_errors());
        assert!(!InputValidationResult::default().has_errors());
    }

    #[test]
    fn test_datasource_results() {
        let clean = || vars(&[("foo", None), ("bar", None)]);
        let dirty = || vars(&[("foo", Some("foo error")), ("bar", None)]);
        let datasource = |name: Option<&str>, input_result: InputValidationResult| {
            let mut inputs = IndexMap::new();
            inputs.insert("input1".to_string(), input_result);
            DatasourceValidationResult {
                name: name.map(|n| vec![n.to_string()]),
                description: None,
                inputs: Some(inputs),
            }
        };

        assert!(datasource(Some("name error"), input(clean(), clean())).has_errors());
        assert!(datasource(None, input(dirty(), clean())).has_errors());
        assert!(datasource(None, input(clean(), dirty())).has_errors());
        assert!(!datasource(None, input(clean(), clean())).has_errors());
    }

    #[test]
    fn test_no_inputs_contributes_nothing() {
        let result = DatasourceValidationResult::default();
        assert!(result.inputs.is_none());
        assert!(!result.has_errors());
    }

    #[test]
    fn test_error_count() {
        let result = input(
            vars(&[("foo", Some("foo error")), ("bar", Some("bar error"))]),
            vars(&[("foo", Some("foo error")), ("bar", None)]),
        );
        assert_eq!(result.error_count(), 3);
    }

    #[test]
    fn test_empty_error_list_is_not_an_error() {
        let result = vars(&[("foo", None)]);
        let mut empty = result.clone();
        empty.insert("bar".to_string(), Some(Vec::new()));
        assert!(!empty.has_errors());
    }

    #[test]
    fn test_serialized_shape() {
        let mut streams = IndexMap::new();
        streams.insert("logs-1".to_string(), StreamValidationResult::default());
        let mut inputs = IndexMap::new();
        inputs.insert(
            "logfile".to_string(),
            InputValidationResult {
                vars: None,
                streams: Some(streams),
            },
        );
        let result = DatasourceValidationResult {
            name: Some(vec!["Name is required".to_string()]),
            description: None,
            inputs: Some(inputs),
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "name": ["Name is required"],
                "description": null,
                "inputs": { "logfile": { "streams": { "logs-1": {} } } }
            })
        );
    }
}
