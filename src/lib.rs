#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
//! Contract tests for data-holder types.
//!
//! `dto_contract` inspects a DTO's `get_*` / `is_*` accessors and `set_*` mutators, pairs them into a
//! field model, and runs a fixed battery of equality, hash and population checks over every field. The
//! test author supplies values; the harness writes the tests.
//!
//! ```ignore
//! #[dto_contract::introspect]
//! impl Employee {
//!     pub fn get_age(&self) -> i64 { self.age }
//!     pub fn set_age(&mut self, age: i64) { self.age = age; }
//! }
//!
//! dto_contract::dto_contract_tests!(employee_contract, Employee, employee_values());
//! ```
//!
//! ## Panic Policy
//!
//! - **Library code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. Panics raised by DTO code are
//!   caught per case unless [`HarnessConfig::catch_panics`] is off.
//!
//! - **Test-runner entry points**: [`ContractHarness::assert_case`] and [`testing::expect_harness`] panic on
//!   purpose; that is how a failure reaches the test runner.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

extern crate self as dto_contract;

pub mod battery;
pub mod config;
pub mod dto;
pub mod error;
pub mod metadata;
pub mod model;
pub mod provider;
pub mod testing;
pub mod value;

pub use battery::report::{
    BatteryReport, BatteryReporter, BatterySummary, CaseOutcome, CaseStatus, ConsoleReporter, DroppedEntry, TracingReporter,
};
pub use battery::{CaseScope, ContractCase, ContractHarness};
pub use config::HarnessConfig;
pub use dto::Dto;
pub use error::{CaseFailure, HarnessError};
pub use metadata::{Introspect, Invoker, MethodInfo, Receiver};
pub use model::{CopyConstructor, DropReason, DroppedField, FieldDescriptor, FieldModel};
pub use provider::{MapValueProvider, ValueProvider};
pub use value::{FieldValue, FromFieldValue, IntoFieldValue, ValueError};

pub use dto_contract_derive::introspect;
