//! Test-runner glue: logging setup and the `dto_contract_tests!` macro.

use crate::battery::ContractHarness;
use crate::error::HarnessError;

/// Install a `tracing` subscriber writing through the test harness's captured output.
///
/// The filter comes from `RUST_LOG`, defaulting to `warn` so dropped accessors show up. Safe to call from
/// every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Unwrap a harness, panicking with the rendered diagnostic if it could not be built.
///
/// # Panics
///
/// Panics if `result` is an error.
#[track_caller]
pub fn expect_harness<T, P>(result: Result<ContractHarness<T, P>, HarnessError>) -> ContractHarness<T, P> {
    match result {
        Ok(harness) => harness,
        Err(err) => panic!("{:?}", miette::Report::new(err)),
    }
}

/// Generate one `#[test]` per contract case for a DTO type.
///
/// ```ignore
/// dto_contract_tests!(employee_contract, Employee, employee_values());
/// dto_contract_tests!(
///     badge_contract,
///     Badge,
///     badge_values(),
///     HarnessConfig::new().skip_field("label")
/// );
/// ```
///
/// The provider and config expressions are evaluated inside the generated module, which glob-imports
/// its parent. Per-field cases run over every field of the model and report all failing fields at once.
#[macro_export]
macro_rules! dto_contract_tests {
    ($module:ident, $dto:ty, $provider:expr $(,)?) => {
        $crate::dto_contract_tests!($module, $dto, $provider, $crate::HarnessConfig::default());
    };
    ($module:ident, $dto:ty, $provider:expr, $config:expr $(,)?) => {
        mod $module {
            #[allow(unused_imports)]
            use super::*;

            #[track_caller]
            fn check(case: $crate::ContractCase) {
                $crate::testing::init_tracing();
                let harness = $crate::testing::expect_harness($crate::ContractHarness::<$dto, _>::with_config(
                    $provider, $config,
                ));
                harness.assert_case(case);
            }

            #[test]
            fn equality_stability() {
                check($crate::ContractCase::EqualityStability);
            }

            #[test]
            fn uniform_mutation_equality() {
                check($crate::ContractCase::UniformMutationEquality);
            }

            #[test]
            fn populate_field() {
                check($crate::ContractCase::PopulateField);
            }

            #[test]
            fn populate_all() {
                check($crate::ContractCase::PopulateAll);
            }

            #[test]
            fn hash_divergence() {
                check($crate::ContractCase::HashDivergence);
            }

            #[test]
            fn hash_convergence() {
                check($crate::ContractCase::HashConvergence);
            }

            #[test]
            fn accessor_default() {
                check($crate::ContractCase::AccessorDefault);
            }

            #[test]
            fn accessor_round_trip() {
                check($crate::ContractCase::AccessorRoundTrip);
            }
        }
    };
}
