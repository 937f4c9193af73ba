//! Battery results and progress reporting.
//!
//! ## BatteryReporter Trait
//!
//! The harness separates running cases from presenting them. [`TracingReporter`] is used when no reporter
//! is given; [`ConsoleReporter`] prints pytest-style progress to stderr. Custom formats implement
//! [`BatteryReporter`].

use std::time::Duration;

use serde::Serialize;

use super::ContractCase;
use crate::error::CaseFailure;
use crate::model::DroppedField;

// ============================================================================
// Outcomes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    Failed,
}

/// Result of one (case, field) invocation.
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub case: ContractCase,
    /// `None` for whole-object cases.
    pub field: Option<&'static str>,
    pub status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip)]
    pub failure: Option<CaseFailure>,
    #[serde(skip)]
    pub duration: Duration,
}

impl CaseOutcome {
    pub fn new(
        case: ContractCase,
        field: Option<&'static str>,
        result: Result<(), CaseFailure>,
        duration: Duration,
    ) -> Self {
        let (status, failure) = match result {
            Ok(()) => (CaseStatus::Passed, None),
            Err(failure) => (CaseStatus::Failed, Some(failure)),
        };
        Self {
            case,
            field,
            status,
            message: failure.as_ref().map(ToString::to_string),
            failure,
            duration,
        }
    }

    /// `case[field]` for per-field invocations, `case` otherwise.
    pub fn label(&self) -> String {
        match self.field {
            Some(field) => format!("{}[{}]", self.case, field),
            None => self.case.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status == CaseStatus::Failed
    }

    /// `label: message` for failed invocations.
    pub fn failure_line(&self) -> Option<String> {
        self.failure
            .as_ref()
            .map(|failure| format!("{}: {}", self.label(), failure))
    }
}

/// An accessor left out of the battery, as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedEntry {
    pub field: &'static str,
    pub accessor: &'static str,
    pub reason: String,
}

impl From<&DroppedField> for DroppedEntry {
    fn from(dropped: &DroppedField) -> Self {
        Self {
            field: dropped.field,
            accessor: dropped.accessor,
            reason: dropped.reason.to_string(),
        }
    }
}

/// Summary of a battery run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatterySummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration: Duration,
}

/// Everything one battery run produced.
#[derive(Debug, Clone, Serialize)]
pub struct BatteryReport {
    pub dto: &'static str,
    pub fields: Vec<&'static str>,
    pub dropped: Vec<DroppedEntry>,
    pub outcomes: Vec<CaseOutcome>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

impl BatteryReport {
    pub fn new(
        dto: &'static str,
        fields: Vec<&'static str>,
        dropped: &[DroppedField],
        outcomes: Vec<CaseOutcome>,
        duration: Duration,
    ) -> Self {
        Self {
            dto,
            fields,
            dropped: dropped.iter().map(DroppedEntry::from).collect(),
            outcomes,
            duration,
        }
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| !outcome.is_failure()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_failure()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_failure())
    }

    pub fn summary(&self) -> BatterySummary {
        BatterySummary {
            total: self.outcomes.len(),
            passed: self.passed(),
            failed: self.failed(),
            duration: self.duration,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text rendering, one line per dropped accessor and per outcome. Timing is left out.
    pub fn render_text(&self) -> String {
        let mut lines = Vec::with_capacity(1 + self.dropped.len() + self.outcomes.len());
        lines.push(format!("{}: {} passed, {} failed", self.dto, self.passed(), self.failed()));
        for dropped in &self.dropped {
            lines.push(format!("DROP {}: {}", dropped.field, dropped.reason));
        }
        for outcome in &self.outcomes {
            lines.push(match &outcome.failure {
                Some(failure) => format!("FAIL {}: {}", outcome.label(), failure),
                None => format!("PASS {}", outcome.label()),
            });
        }
        lines.join("\n")
    }
}

// ============================================================================
// Battery Reporter Trait
// ============================================================================

/// Trait for reporting battery progress.
pub trait BatteryReporter {
    /// Called before the first case runs
    fn on_battery_start(&mut self, _dto: &str, _field_count: usize) {}

    /// Called before each invocation
    fn on_case_start(&mut self, _case: ContractCase, _field: Option<&str>) {}

    /// Called after each invocation
    fn on_case_complete(&mut self, outcome: &CaseOutcome);

    /// Called when all enabled cases have run
    fn on_battery_complete(&mut self, summary: &BatterySummary);
}

/// Reports through `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl BatteryReporter for TracingReporter {
    fn on_battery_start(&mut self, dto: &str, field_count: usize) {
        tracing::info!(dto, field_count, "contract battery started");
    }

    fn on_case_complete(&mut self, outcome: &CaseOutcome) {
        match &outcome.failure {
            Some(failure) => tracing::debug!(case = %outcome.case, field = outcome.field, %failure, "case failed"),
            None => tracing::debug!(case = %outcome.case, field = outcome.field, "case passed"),
        }
    }

    fn on_battery_complete(&mut self, summary: &BatterySummary) {
        tracing::info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            elapsed_ms = summary.duration.as_millis() as u64,
            "contract battery finished"
        );
    }
}

/// Console reporter (pytest-style)
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl BatteryReporter for ConsoleReporter {
    fn on_battery_start(&mut self, dto: &str, field_count: usize) {
        eprintln!("\x1b[1m{dto}\x1b[0m ({field_count} fields)");
    }

    fn on_case_start(&mut self, case: ContractCase, field: Option<&str>) {
        if self.verbose {
            match field {
                Some(field) => eprint!("{case}[{field}] ... "),
                None => eprint!("{case} ... "),
            }
        }
    }

    fn on_case_complete(&mut self, outcome: &CaseOutcome) {
        let status = match (outcome.status, self.verbose) {
            (CaseStatus::Passed, true) => format!("\x1b[32mPASSED\x1b[0m ({}ms)", outcome.duration.as_millis()),
            (CaseStatus::Passed, false) => "\x1b[32m.\x1b[0m".to_string(),
            (CaseStatus::Failed, true) => format!("\x1b[31mFAILED\x1b[0m ({}ms)", outcome.duration.as_millis()),
            (CaseStatus::Failed, false) => "\x1b[31mF\x1b[0m".to_string(),
        };

        if self.verbose {
            eprintln!("{status}");
        } else {
            eprint!("{status}");
        }

        if let Some(line) = outcome.failure_line() {
            eprintln!("\n\x1b[31m{line}\x1b[0m");
        }
    }

    fn on_battery_complete(&mut self, summary: &BatterySummary) {
        if !self.verbose {
            eprintln!();
        }

        let mut parts = Vec::new();
        if summary.passed > 0 {
            parts.push(format!("\x1b[32m{} passed\x1b[0m", summary.passed));
        }
        if summary.failed > 0 {
            parts.push(format!("\x1b[31m{} failed\x1b[0m", summary.failed));
        }
        if parts.is_empty() {
            parts.push("no cases run".to_string());
        }

        eprintln!(
            "====== {} in {:.2}s ======",
            parts.join(", "),
            summary.duration.as_secs_f64()
        );
    }
}
