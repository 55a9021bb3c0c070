// Datasource validation engine

use crate::datasource::{DatasourceConfig, InputConfig, StreamConfig, VarEntry};
use crate::error::ValidationErrorKind;
use crate::options::{DisabledBranches, ValidationOptions};
use crate::package::{PackageDefinition, VarDefinition};
use crate::result::{
    DatasourceValidationResult, HasErrors, InputValidationResult, StreamValidationResult,
    VarsValidationResult,
};
use crate::schema::{InputSchema, SchemaTables, StreamSchema};
use crate::value::validate_value;
use indexmap::IndexMap;

/// Validates a datasource against indexed schema tables with default options
pub fn validate(datasource: &DatasourceConfig, tables: &SchemaTables) -> DatasourceValidationResult {
    validate_with(datasource, tables, &ValidationOptions::default())
}

/// Indexes a package and validates a datasource against it
pub fn validate_datasource(
    datasource: &DatasourceConfig,
    package: &PackageDefinition,
) -> DatasourceValidationResult {
    validate(datasource, &SchemaTables::index(package))
}

/// Validates a datasource against indexed schema tables
pub fn validate_with(
    datasource: &DatasourceConfig,
    tables: &SchemaTables,
    options: &ValidationOptions,
) -> DatasourceValidationResult {
    let context = ValidationContext::new(tables, options);
    let result = DatasourceValidationResult {
        name: validate_name(&datasource.name),
        description: None,
        inputs: context.validate_inputs(&datasource.inputs),
    };

    tracing::debug!(
        datasource = %datasource.name,
        errors = result.error_count(),
        "validated datasource"
    );
    result
}

fn validate_name(name: &str) -> Option<Vec<String>> {
    if name.trim().is_empty() {
        let kind = ValidationErrorKind::NameRequired;
        tracing::trace!(code = kind.error_code(), "datasource name is blank");
        Some(vec![kind.message()])
    } else {
        None
    }
}

/// Read-only state shared by one validation run
struct ValidationContext<'a> {
    tables: &'a SchemaTables,
    options: &'a ValidationOptions,
}

impl<'a> ValidationContext<'a> {
    fn new(tables: &'a SchemaTables, options: &'a ValidationOptions) -> Self {
        Self { tables, options }
    }

    fn validate_inputs(
        &self,
        inputs: &[InputConfig],
    ) -> Option<IndexMap<String, InputValidationResult>> {
        if self.tables.is_empty() {
            return None;
        }

        let mut results = IndexMap::new();
        for input in inputs {
            match self.tables.input(&input.input_type) {
                Some(schema) => {
                    results.insert(input.input_type.clone(), self.validate_input(input, schema));
                }
                None => {
                    tracing::trace!(input = %input.input_type, "skipping undeclared input type");
                }
            }
        }
        Some(results)
    }

    fn validate_input(&self, input: &InputConfig, schema: &InputSchema) -> InputValidationResult {
        let vars = self.validate_vars(&schema.vars, input.enabled, |name| input.var(name));

        let mut streams = IndexMap::new();
        for stream in &input.streams {
            match schema.stream(&stream.dataset.name) {
                Some(stream_schema) => {
                    let result = self.validate_stream(stream, stream_schema, input.enabled);
                    streams.insert(stream.id.clone(), result);
                }
                None => {
                    tracing::trace!(
                        input = %input.input_type,
                        stream = %stream.id,
                        dataset = %stream.dataset.name,
                        "skipping stream with no declaration"
                    );
                }
            }
        }

        InputValidationResult {
            vars,
            streams: (!streams.is_empty()).then_some(streams),
        }
    }

    fn validate_stream(
        &self,
        stream: &StreamConfig,
        schema: &StreamSchema,
        input_enabled: bool,
    ) -> StreamValidationResult {
        let enabled = input_enabled && stream.enabled && schema.enabled;
        if !enabled {
            tracing::trace!(
                stream = %stream.id,
                dataset = %schema.dataset,
                title = schema.title.as_deref().unwrap_or(""),
                "stream disabled"
            );
        }
        StreamValidationResult {
            vars: self.validate_vars(&schema.vars, enabled, |name| stream.var(name)),
        }
    }

    /// Check every declared variable, or report the branch as disabled.
    ///
    /// Returns `None` when nothing is declared, or when the branch is
    /// disabled and disabled branches are omitted.
    fn validate_vars<'v, F>(
        &self,
        declared: &IndexMap<String, VarDefinition>,
        enabled: bool,
        lookup: F,
    ) -> Option<VarsValidationResult>
    where
        F: Fn(&str) -> Option<&'v VarEntry>,
    {
        if declared.is_empty() {
            return None;
        }

        if !enabled {
            return match self.options.disabled_branches {
                DisabledBranches::Omit => None,
                DisabledBranches::ReportNull => {
                    Some(declared.keys().map(|name| (name.clone(), None)).collect())
                }
            };
        }

        let results = declared
            .iter()
            .map(|(name, definition)| {
                let value = lookup(name).and_then(|entry| entry.value.as_ref());
                (name.clone(), validate_value(value, definition))
            })
            .collect();
        Some(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tables() -> SchemaTables {
        let package: PackageDefinition = serde_json::from_value(json!({
            "datasets": [{
                "name": "access",
                "streams": [{
                    "input": "logfile",
                    "title": "Access logs",
                    "vars": [{ "name": "paths", "multi": true, "required": true }]
                }]
            }],
            "config_templates": [{
                "inputs": [{
                    "type": "logfile",
                    "vars": [{ "name": "encoding", "required": true }]
                }]
            }]
        }))
        .unwrap();
        SchemaTables::index(&package)
    }

    fn datasource(value: serde_json::Value) -> DatasourceConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_blank_name() {
        assert_eq!(validate_name(""), Some(vec!["Name is required".to_string()]));
        assert_eq!(validate_name("   "), Some(vec!["Name is required".to_string()]));
        assert_eq!(validate_name("nginx-1"), None);
    }

    #[test]
    fn test_missing_vars_mapping_checks_declared_vars() {
        let result = validate(
            &datasource(json!({
                "name": "logs",
                "inputs": [{
                    "type": "logfile",
                    "streams": [{ "id": "logfile-access", "dataset": { "name": "access" } }]
                }]
            })),
            &tables(),
        );

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "name": null,
                "description": null,
                "inputs": {
                    "logfile": {
                        "vars": { "encoding": ["encoding is required"] },
                        "streams": {
                            "logfile-access": { "vars": { "paths": ["paths is required"] } }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_undeclared_instance_vars_are_ignored() {
        let result = validate(
            &datasource(json!({
                "name": "logs",
                "inputs": [{
                    "type": "logfile",
                    "vars": {
                        "encoding": { "value": "utf-8" },
                        "unknown": { "value": "" }
                    }
                }]
            })),
            &tables(),
        );

        let input = &result.inputs.as_ref().unwrap()["logfile"];
        let vars = input.vars.as_ref().unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars["encoding"], None);
        assert!(input.streams.is_none());
    }

    #[test]
    fn test_unresolved_stream_is_skipped() {
        let result = validate(
            &datasource(json!({
                "name": "logs",
                "inputs": [{
                    "type": "logfile",
                    "vars": { "encoding": { "value": "utf-8" } },
                    "streams": [{ "id": "logfile-error", "dataset": { "name": "error" } }]
                }]
            })),
            &tables(),
        );

        assert!(result.inputs.unwrap()["logfile"].streams.is_none());
    }

    #[test]
    fn test_first_stream_declaration_for_input_is_checked() {
        let package: PackageDefinition = serde_json::from_value(json!({
            "datasets": [{
                "name": "access",
                "streams": [
                    { "input": "logfile", "title": "Access logs", "vars": [{ "name": "paths", "required": true }] },
                    { "input": "logfile", "title": "Access logs (legacy)", "vars": [{ "name": "legacy_path", "required": true }] }
                ]
            }],
            "config_templates": [{ "inputs": [{ "type": "logfile" }] }]
        }))
        .unwrap();

        let result = validate_datasource(
            &datasource(json!({
                "name": "logs",
                "inputs": [{
                    "type": "logfile",
                    "streams": [{
                        "id": "logfile-access",
                        "dataset": { "name": "access" },
                        "vars": { "legacy_path": { "value": "/var/log/old.log" } }
                    }]
                }]
            })),
            &package,
        );

        assert_eq!(
            serde_json::to_value(&result.inputs).unwrap(),
            json!({
                "logfile": {
                    "streams": {
                        "logfile-access": { "vars": { "paths": ["paths is required"] } }
                    }
                }
            })
        );
    }

    #[test]
    fn test_report_null_for_disabled_branches() {
        let options =
            ValidationOptions::new().with_disabled_branches(DisabledBranches::ReportNull);
        let result = validate_with(
            &datasource(json!({
                "name": "logs",
                "inputs": [{
                    "type": "logfile",
                    "enabled": false,
                    "streams": [{ "id": "logfile-access", "dataset": { "name": "access" } }]
                }]
            })),
            &tables(),
            &options,
        );

        assert_eq!(
            serde_json::to_value(&result.inputs).unwrap(),
            json!({
                "logfile": {
                    "vars": { "encoding": null },
                    "streams": { "logfile-access": { "vars": { "paths": null } } }
                }
            })
        );
        assert!(!result.has_errors());
    }
}
