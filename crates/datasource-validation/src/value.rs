// Per-variable value checks

use crate::error::{ValidationErrorKind, YamlSyntaxError};
use crate::package::{VarDefinition, VarType};
use serde_json::Value;
use yaml_rust2::YamlLoader;

/// How much of a value is there.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Presence<'a> {
    /// No value, or `null`
    Absent,
    /// A string that is empty once trimmed
    Blank,
    Present(&'a Value),
}

impl<'a> Presence<'a> {
    fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Presence::Absent,
            Some(Value::String(s)) if s.trim().is_empty() => Presence::Blank,
            Some(value) => Presence::Present(value),
        }
    }
}

/// Validate one variable value against its definition.
///
/// Returns `None` when the value is acceptable, otherwise a list with exactly
/// one message. A failing required check short-circuits the type checks.
pub fn validate_value(value: Option<&Value>, definition: &VarDefinition) -> Option<Vec<String>> {
    let kind = check_value(value, definition)?;
    tracing::trace!(var = %definition.name, code = kind.error_code(), "variable failed validation");
    Some(vec![kind.message()])
}

pub(crate) fn check_value(
    value: Option<&Value>,
    definition: &VarDefinition,
) -> Option<ValidationErrorKind> {
    let required = || ValidationErrorKind::RequiredMissing {
        field: definition.name.clone(),
    };

    let value = match Presence::of(value) {
        Presence::Absent | Presence::Blank => {
            return definition.required.then(required);
        }
        Presence::Present(value) => value,
    };

    if definition.multi {
        return match value {
            Value::Array(items) if items.is_empty() => definition.required.then(required),
            Value::Array(_) => None,
            _ => Some(ValidationErrorKind::InvalidMultiFormat),
        };
    }

    if definition.var_type == VarType::Yaml {
        if let Value::String(text) = value {
            if let Err(err) = parse_yaml(text) {
                tracing::trace!(var = %definition.name, error = %err, "rejected yaml value");
                return Some(ValidationErrorKind::InvalidYaml);
            }
        }
    }

    None
}

/// Parse-or-fail check for structured text.
fn parse_yaml(text: &str) -> Result<(), YamlSyntaxError> {
    YamlLoader::load_from_str(text)?;
    Ok(())
}
