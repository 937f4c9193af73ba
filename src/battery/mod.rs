//! Contract test battery.
//!
//! A [`ContractHarness`] owns the field model of one DTO type, a value provider and a configuration. It
//! runs the [`ContractCase`]s either one invocation at a time (`check_field` / `check_whole`), one case
//! across all fields (`run_case`), or all enabled cases (`run`).
//!
//! ## Failure isolation
//!
//! Every invocation builds its own instances and returns its own `Result`; one failing field never stops
//! the others. The exception is instantiation: if `Default::default()` panics there is nothing left to
//! test, so the run stops with a [`HarnessError`].

mod cases;
pub mod report;

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use serde::Serialize;

use crate::config::HarnessConfig;
use crate::dto::Dto;
use crate::error::{CaseFailure, HarnessError};
use crate::model::FieldModel;
use crate::provider::ValueProvider;

use cases::CaseContext;
use report::{BatteryReport, BatteryReporter, CaseOutcome, TracingReporter};

/// One test of the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractCase {
    /// Two fresh instances are equal, and stay equal after one of them has a field mutated twice.
    EqualityStability,
    /// Applying the same value to every field of two instances keeps them equal.
    UniformMutationEquality,
    /// `populate` copies a single mutated field.
    PopulateField,
    /// `populate` copies every mutated field.
    PopulateAll,
    /// Mutating one field of one instance changes its hash code.
    HashDivergence,
    /// Applying the same value to every field of two instances keeps their hash codes equal.
    HashConvergence,
    /// The accessor of a default instance reports the provider's expected default.
    AccessorDefault,
    /// The accessor reports the provider's expected output after the mutator was applied.
    AccessorRoundTrip,
}

/// Whether a case runs once per field or once per battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseScope {
    PerField,
    WholeObject,
}

impl ContractCase {
    pub const ALL: [ContractCase; 8] = [
        ContractCase::EqualityStability,
        ContractCase::UniformMutationEquality,
        ContractCase::PopulateField,
        ContractCase::PopulateAll,
        ContractCase::HashDivergence,
        ContractCase::HashConvergence,
        ContractCase::AccessorDefault,
        ContractCase::AccessorRoundTrip,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ContractCase::EqualityStability => "equality_stability",
            ContractCase::UniformMutationEquality => "uniform_mutation_equality",
            ContractCase::PopulateField => "populate_field",
            ContractCase::PopulateAll => "populate_all",
            ContractCase::HashDivergence => "hash_divergence",
            ContractCase::HashConvergence => "hash_convergence",
            ContractCase::AccessorDefault => "accessor_default",
            ContractCase::AccessorRoundTrip => "accessor_round_trip",
        }
    }

    pub fn scope(self) -> CaseScope {
        match self {
            ContractCase::EqualityStability
            | ContractCase::PopulateField
            | ContractCase::HashDivergence
            | ContractCase::AccessorDefault
            | ContractCase::AccessorRoundTrip => CaseScope::PerField,
            ContractCase::UniformMutationEquality | ContractCase::PopulateAll | ContractCase::HashConvergence => {
                CaseScope::WholeObject
            }
        }
    }

    pub fn is_per_field(self) -> bool {
        self.scope() == CaseScope::PerField
    }
}

impl fmt::Display for ContractCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Runs the battery against one DTO type.
pub struct ContractHarness<T, P> {
    model: FieldModel<T>,
    provider: P,
    config: HarnessConfig,
}

impl<T: Dto, P: ValueProvider> ContractHarness<T, P> {
    /// Build a harness with the default configuration.
    pub fn new(provider: P) -> Result<Self, HarnessError> {
        Self::with_config(provider, HarnessConfig::default())
    }

    /// Build the field model, validate `config` against it and check that `T` can be instantiated.
    #[tracing::instrument(skip_all, fields(dto = T::type_name()))]
    pub fn with_config(provider: P, config: HarnessConfig) -> Result<Self, HarnessError> {
        let model = FieldModel::<T>::build()?;

        if config.strict_pairing && !model.dropped().is_empty() {
            return Err(HarnessError::UnpairedAccessors {
                type_name: model.type_name(),
                fields: model.dropped().iter().map(|dropped| dropped.field.to_string()).collect(),
            });
        }

        if let Some(unknown) = config.skip_fields.iter().find(|field| model.field(field).is_none()) {
            return Err(HarnessError::UnknownField {
                type_name: model.type_name(),
                field: unknown.clone(),
            });
        }

        cases::instantiate::<T>(config.catch_panics).map_err(|message| HarnessError::Instantiation {
            type_name: T::type_name(),
            message,
        })?;

        tracing::debug!(fields = model.len(), dropped = model.dropped().len(), "harness ready");

        Ok(Self {
            model,
            provider,
            config,
        })
    }

    pub fn model(&self) -> &FieldModel<T> {
        &self.model
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Fields the per-field cases run over: the model's fields minus skipped ones.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.model
            .fields()
            .iter()
            .map(|field| field.name())
            .filter(|name| !self.config.is_skipped(name))
            .collect()
    }

    /// Run one per-field case for `field`.
    pub fn check_field(&self, case: ContractCase, field: &str) -> Result<(), CaseFailure> {
        if !case.is_per_field() {
            return Err(CaseFailure::ScopeMismatch { case: case.id() });
        }
        let descriptor = self.model.field(field).ok_or_else(|| CaseFailure::UnknownField {
            field: field.to_string(),
        })?;
        if self.config.is_skipped(field) {
            return Err(CaseFailure::SkippedField {
                field: field.to_string(),
            });
        }
        self.guard(|| cases::run_field(case, &self.context(), descriptor))
    }

    /// Run one whole-object case.
    pub fn check_whole(&self, case: ContractCase) -> Result<(), CaseFailure> {
        if case.is_per_field() {
            return Err(CaseFailure::ScopeMismatch { case: case.id() });
        }
        self.guard(|| cases::run_whole(case, &self.context()))
    }

    /// Run every invocation of `case`: once per field, or once for whole-object cases.
    pub fn run_case(&self, case: ContractCase) -> Result<Vec<CaseOutcome>, HarnessError> {
        self.run_case_with(case, &mut TracingReporter)
    }

    /// Run every enabled case.
    pub fn run(&self) -> Result<BatteryReport, HarnessError> {
        self.run_with_reporter(&mut TracingReporter)
    }

    /// Run every enabled case, reporting progress to `reporter`.
    pub fn run_with_reporter(&self, reporter: &mut dyn BatteryReporter) -> Result<BatteryReport, HarnessError> {
        let started = Instant::now();
        let fields = self.field_names();
        reporter.on_battery_start(T::type_name(), fields.len());

        let mut outcomes = Vec::new();
        for &case in &self.config.cases {
            outcomes.extend(self.run_case_with(case, reporter)?);
        }

        let report = BatteryReport::new(
            T::type_name(),
            fields,
            self.model.dropped(),
            outcomes,
            started.elapsed(),
        );
        reporter.on_battery_complete(&report.summary());
        Ok(report)
    }

    /// Run `case` and panic with every failing invocation listed.
    ///
    /// This is the entry point used by `dto_contract_tests!`. Disabled cases pass without running.
    ///
    /// # Panics
    ///
    /// Panics if any invocation fails, or if the DTO cannot be instantiated.
    #[track_caller]
    pub fn assert_case(&self, case: ContractCase) {
        if !self.config.is_enabled(case) {
            tracing::info!(%case, "case disabled by configuration");
            return;
        }
        let outcomes = match self.run_case(case) {
            Ok(outcomes) => outcomes,
            Err(err) => panic!("{:?}", miette::Report::new(err)),
        };
        let failures: Vec<String> = outcomes.iter().filter_map(CaseOutcome::failure_line).collect();
        if !failures.is_empty() {
            panic!(
                "{} of {} `{}` invocations failed for `{}`:\n{}",
                failures.len(),
                outcomes.len(),
                case,
                T::type_name(),
                failures.join("\n")
            );
        }
    }

    fn run_case_with(
        &self,
        case: ContractCase,
        reporter: &mut dyn BatteryReporter,
    ) -> Result<Vec<CaseOutcome>, HarnessError> {
        let targets: Vec<Option<&'static str>> = match case.scope() {
            CaseScope::PerField => self.field_names().into_iter().map(Some).collect(),
            CaseScope::WholeObject => vec![None],
        };

        let mut outcomes = Vec::with_capacity(targets.len());
        for field in targets {
            reporter.on_case_start(case, field);
            let started = Instant::now();
            let result = match field {
                Some(field) => self.check_field(case, field),
                None => self.check_whole(case),
            };
            if let Some(fatal) = result.as_ref().err().and_then(CaseFailure::escalation) {
                return Err(fatal);
            }
            let outcome = CaseOutcome::new(case, field, result, started.elapsed());
            reporter.on_case_complete(&outcome);
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    fn context(&self) -> CaseContext<'_, T, P> {
        CaseContext {
            model: &self.model,
            provider: &self.provider,
            config: &self.config,
        }
    }

    fn guard(&self, case: impl FnOnce() -> Result<(), CaseFailure>) -> Result<(), CaseFailure> {
        if !self.config.catch_panics {
            return case();
        }
        panic::catch_unwind(AssertUnwindSafe(case)).unwrap_or_else(|payload| {
            Err(CaseFailure::Panicked {
                message: cases::panic_message(payload),
            })
        })
    }
}

impl<T, P: fmt::Debug> fmt::Debug for ContractHarness<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractHarness")
            .field("model", &self.model)
            .field("provider", &self.provider)
            .field("config", &self.config)
            .finish()
    }
}
