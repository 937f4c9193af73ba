//! Error types for harness construction and individual cases.
//!
//! `HarnessError` is fatal: the harness could not be built, or a case could not even create its
//! instances. `CaseFailure` fails exactly one (case, field) invocation.

use miette::Diagnostic;
use thiserror::Error;

use crate::value::ValueError;

/// Errors that stop the harness from running.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("cannot instantiate `{type_name}` through `Default`: {message}")]
    #[diagnostic(
        code(dto_contract::instantiation),
        help("every case builds fresh instances with `Default::default()`; it must not panic")
    )]
    Instantiation { type_name: &'static str, message: String },

    #[error("metadata for `{type_name}` lists method `{method}` more than once")]
    #[diagnostic(
        code(dto_contract::metadata),
        help("apply `#[dto_contract::introspect]` to a single impl block per type")
    )]
    DuplicateMethod { type_name: &'static str, method: &'static str },

    #[error("`{type_name}` has accessors without a matching mutator: {}", .fields.join(", "))]
    #[diagnostic(
        code(dto_contract::unpaired),
        help("add `set_<field>` taking the accessor's return type, mark the accessor `#[dto(skip)]`, or disable strict pairing")
    )]
    UnpairedAccessors { type_name: &'static str, fields: Vec<String> },

    #[error("unknown field `{field}` on `{type_name}`")]
    #[diagnostic(code(dto_contract::unknown_field))]
    UnknownField { type_name: &'static str, field: String },
}

/// Why a single case invocation failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaseFailure {
    #[error("{message}")]
    Assertion { message: String },

    #[error("mutator `{mutator}` rejected the value for `{field}`: {source}")]
    Mutator {
        field: String,
        mutator: &'static str,
        #[source]
        source: ValueError,
    },

    #[error("panicked: {message}")]
    Panicked { message: String },

    #[error("cannot instantiate `{type_name}`: {message}")]
    Instantiation { type_name: &'static str, message: String },

    #[error("unknown field `{field}`")]
    UnknownField { field: String },

    #[error("field `{field}` is skipped by the harness configuration")]
    SkippedField { field: String },

    #[error("`{case}` cannot be run in this scope")]
    ScopeMismatch { case: &'static str },
}

impl CaseFailure {
    pub(crate) fn assertion(message: impl Into<String>) -> Self {
        CaseFailure::Assertion {
            message: message.into(),
        }
    }

    /// The harness-level error this failure escalates to, if it cannot stay local to one case.
    pub fn escalation(&self) -> Option<HarnessError> {
        match self {
            CaseFailure::Instantiation { type_name, message } => Some(HarnessError::Instantiation {
                type_name: *type_name,
                message: message.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpaired_lists_fields() {
        let err = HarnessError::UnpairedAccessors {
            type_name: "Gadget",
            fields: vec!["serial".to_string(), "weight".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "`Gadget` has accessors without a matching mutator: serial, weight"
        );
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = HarnessError::UnknownField {
            type_name: "Employee",
            field: "salary".to_string(),
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("dto_contract::unknown_field"));
    }

    #[test]
    fn test_only_instantiation_failures_escalate() {
        let fatal = CaseFailure::Instantiation {
            type_name: "Employee",
            message: "boom".to_string(),
        };
        assert!(matches!(fatal.escalation(), Some(HarnessError::Instantiation { .. })));
        assert!(CaseFailure::assertion("nope").escalation().is_none());
    }
}
