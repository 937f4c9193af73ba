//! Harness configuration.

use crate::battery::ContractCase;

/// Harness configuration
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Fail construction when an accessor has no matching mutator
    pub strict_pairing: bool,
    /// Cases the battery runs, in order
    pub cases: Vec<ContractCase>,
    /// Fields left out of the battery
    pub skip_fields: Vec<String>,
    /// Turn panics in DTO code into case failures
    pub catch_panics: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            strict_pairing: false,
            cases: ContractCase::ALL.to_vec(),
            skip_fields: Vec::new(),
            catch_panics: true,
        }
    }
}

impl HarnessConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject DTOs with unpaired accessors
    pub fn with_strict_pairing(mut self, strict: bool) -> Self {
        self.strict_pairing = strict;
        self
    }

    /// Run only these cases
    pub fn with_cases(mut self, cases: impl IntoIterator<Item = ContractCase>) -> Self {
        self.cases = cases.into_iter().collect();
        self
    }

    /// Leave `field` out of every case
    pub fn skip_field(mut self, field: impl Into<String>) -> Self {
        self.skip_fields.push(field.into());
        self
    }

    /// Whether panics in DTO code become case failures
    pub fn with_catch_panics(mut self, catch: bool) -> Self {
        self.catch_panics = catch;
        self
    }

    pub fn is_enabled(&self, case: ContractCase) -> bool {
        self.cases.contains(&case)
    }

    pub fn is_skipped(&self, field: &str) -> bool {
        self.skip_fields.iter().any(|skipped| skipped == field)
    }
}
