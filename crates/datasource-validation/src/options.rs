//! Validation options.

/// How branches switched off by an `enabled: false` flag appear in the
/// error tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisabledBranches {
    /// Disabled inputs and streams carry no `vars` entry at all.
    #[default]
    Omit,

    /// Disabled inputs and streams list every declared variable with no
    /// error, so a form can keep rendering their fields.
    ReportNull,
}

/// Options controlling a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    pub disabled_branches: DisabledBranches,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how disabled branches are reported
    pub fn with_disabled_branches(mut self, disabled_branches: DisabledBranches) -> Self {
        self.disabled_branches = disabled_branches;
        self
    }
}
