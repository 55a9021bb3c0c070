// Datasource configuration validation
//
// This crate checks a datasource configuration against the inputs, streams
// and variables declared by a package definition, and produces an error tree
// shaped like the configuration so each field can report its own errors.

pub mod datasource;
pub mod error;
pub mod options;
pub mod package;
pub mod result;
pub mod schema;
pub mod validator;
pub mod value;

pub use datasource::{DatasetRef, DatasourceConfig, InputConfig, StreamConfig, VarEntry};
pub use error::{ValidationErrorKind, YamlSyntaxError};
pub use options::{DisabledBranches, ValidationOptions};
pub use package::{
    ConfigTemplate, DatasetDefinition, InputDefinition, PackageDefinition, StreamDefinition,
    VarDefinition, VarType,
};
pub use result::{
    DatasourceValidationResult, ErrorList, HasErrors, InputValidationResult,
    StreamValidationResult, VarsValidationResult, validation_has_errors,
};
pub use schema::{InputSchema, SchemaTables, StreamSchema};
pub use validator::{validate, validate_datasource, validate_with};
pub use value::validate_value;
