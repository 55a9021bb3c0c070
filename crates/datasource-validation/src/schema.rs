//! Schema indexing.
//!
//! A package definition spreads what a datasource may contain over two
//! places: config templates list input types and their variables, while
//! datasets list streams that name the input type they attach to. Validation
//! needs both by input type, so [`SchemaTables::index`] flattens them into
//! ordered lookup tables once per run.

use crate::package::{PackageDefinition, StreamDefinition, VarDefinition};
use indexmap::IndexMap;
use indexmap::map::Entry;

/// Declared inputs of a package, keyed by input type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaTables {
    inputs: IndexMap<String, InputSchema>,
}

/// Everything declared for one input type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSchema {
    /// Top-level variables, in declaration order
    pub vars: IndexMap<String, VarDefinition>,
    /// Streams attached to this input, keyed by the owning dataset's name
    pub streams: IndexMap<String, StreamSchema>,
}

/// A stream declaration resolved for one input type.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSchema {
    pub dataset: String,
    pub title: Option<String>,
    pub enabled: bool,
    pub vars: IndexMap<String, VarDefinition>,
}

impl SchemaTables {
    /// Build the lookup tables for a package.
    ///
    /// Never fails; missing collections index as empty. When several
    /// templates declare the same input type the last declaration wins.
    pub fn index(package: &PackageDefinition) -> Self {
        let mut inputs: IndexMap<String, InputSchema> = IndexMap::new();

        let templates = package.config_templates.as_deref().unwrap_or_default();
        for template in templates {
            for input in &template.inputs {
                let schema = InputSchema {
                    vars: index_vars(&input.vars),
                    streams: index_streams(package, &input.input_type),
                };
                inputs.insert(input.input_type.clone(), schema);
            }
        }

        tracing::debug!(
            package = package.name.as_deref().unwrap_or("<unnamed>"),
            input_types = inputs.len(),
            "indexed package schema"
        );

        Self { inputs }
    }

    /// Look up the schema for an input type
    pub fn input(&self, input_type: &str) -> Option<&InputSchema> {
        self.inputs.get(input_type)
    }

    /// Iterate over input types in declaration order
    pub fn inputs(&self) -> impl Iterator<Item = (&str, &InputSchema)> {
        self.inputs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }
}

impl InputSchema {
    /// Resolve the stream declared for a dataset under this input
    pub fn stream(&self, dataset: &str) -> Option<&StreamSchema> {
        self.streams.get(dataset)
    }
}

fn index_vars(vars: &[VarDefinition]) -> IndexMap<String, VarDefinition> {
    let mut indexed = IndexMap::with_capacity(vars.len());
    for var in vars {
        if let Entry::Vacant(slot) = indexed.entry(var.name.clone()) {
            slot.insert(var.clone());
        }
    }
    indexed
}

fn index_streams(package: &PackageDefinition, input_type: &str) -> IndexMap<String, StreamSchema> {
    let mut indexed = IndexMap::new();
    for dataset in &package.datasets {
        let declared = dataset
            .streams
            .iter()
            .find(|stream| stream.input == input_type);
        if let Some(stream) = declared {
            if let Entry::Vacant(slot) = indexed.entry(dataset.name.clone()) {
                slot.insert(StreamSchema::new(&dataset.name, stream));
            }
        }
    }
    indexed
}

impl StreamSchema {
    fn new(dataset: &str, stream: &StreamDefinition) -> Self {
        Self {
            dataset: dataset.to_string(),
            title: stream.title.clone(),
            enabled: stream.enabled,
            vars: index_vars(&stream.vars),
        }
    }
}
