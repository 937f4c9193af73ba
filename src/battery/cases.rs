//! Case bodies.
//!
//! Each function builds its own instances and returns on the first failed check. Values always come
//! from the provider at the point of use; nothing is cached between invocations.

use std::any::Any;
use std::panic;

use super::ContractCase;
use crate::config::HarnessConfig;
use crate::dto::Dto;
use crate::error::CaseFailure;
use crate::model::{FieldDescriptor, FieldModel};
use crate::provider::ValueProvider;
use crate::value::FieldValue;

pub(super) struct CaseContext<'a, T, P> {
    pub(super) model: &'a FieldModel<T>,
    pub(super) provider: &'a P,
    pub(super) config: &'a HarnessConfig,
}

impl<'a, T: Dto, P: ValueProvider> CaseContext<'a, T, P> {
    fn fresh(&self) -> Result<T, CaseFailure> {
        instantiate::<T>(self.config.catch_panics).map_err(|message| CaseFailure::Instantiation {
            type_name: T::type_name(),
            message,
        })
    }

    /// Two fresh instances that the DTO itself considers equal.
    fn equal_pair(&self) -> Result<(T, T), CaseFailure> {
        let a = self.fresh()?;
        let b = self.fresh()?;
        if !a.equals(&b) {
            return Err(CaseFailure::assertion(format!(
                "fresh `{}` instances are not equal",
                T::type_name()
            )));
        }
        Ok((a, b))
    }

    fn fields(&self) -> impl Iterator<Item = &'a FieldDescriptor<T>> {
        let config = self.config;
        self.model
            .fields()
            .iter()
            .filter(move |field| !config.is_skipped(field.name()))
    }

    fn input(&self, field: &FieldDescriptor<T>) -> FieldValue {
        self.provider.input_for(field.name())
    }

    fn apply(&self, field: &FieldDescriptor<T>, dto: &mut T, value: FieldValue) -> Result<(), CaseFailure> {
        field.write(dto, value).map_err(|source| CaseFailure::Mutator {
            field: field.name().to_string(),
            mutator: field.mutator_name(),
            source,
        })
    }
}

pub(super) fn run_field<T: Dto, P: ValueProvider>(
    case: ContractCase,
    cx: &CaseContext<'_, T, P>,
    field: &FieldDescriptor<T>,
) -> Result<(), CaseFailure> {
    match case {
        ContractCase::EqualityStability => equality_stability(cx, field),
        ContractCase::PopulateField => populate_field(cx, field),
        ContractCase::HashDivergence => hash_divergence(cx, field),
        ContractCase::AccessorDefault => accessor_default(cx, field),
        ContractCase::AccessorRoundTrip => accessor_round_trip(cx, field),
        ContractCase::UniformMutationEquality | ContractCase::PopulateAll | ContractCase::HashConvergence => {
            Err(CaseFailure::ScopeMismatch { case: case.id() })
        }
    }
}

pub(super) fn run_whole<T: Dto, P: ValueProvider>(
    case: ContractCase,
    cx: &CaseContext<'_, T, P>,
) -> Result<(), CaseFailure> {
    match case {
        ContractCase::UniformMutationEquality => uniform_mutation_equality(cx),
        ContractCase::PopulateAll => populate_all(cx),
        ContractCase::HashConvergence => hash_convergence(cx),
        ContractCase::EqualityStability
        | ContractCase::PopulateField
        | ContractCase::HashDivergence
        | ContractCase::AccessorDefault
        | ContractCase::AccessorRoundTrip => Err(CaseFailure::ScopeMismatch { case: case.id() }),
    }
}

fn equality_stability<T: Dto, P: ValueProvider>(
    cx: &CaseContext<'_, T, P>,
    field: &FieldDescriptor<T>,
) -> Result<(), CaseFailure> {
    let (mut a, b) = cx.equal_pair()?;

    // Second write overwrites the first.
    cx.apply(field, &mut a, cx.input(field))?;
    cx.apply(field, &mut a, cx.input(field))?;

    if !a.equals(&b) {
        return Err(CaseFailure::assertion(format!(
            "`{}` instances are no longer equal after writing `{}` twice on one of them",
            T::type_name(),
            field.name()
        )));
    }
    Ok(())
}

fn uniform_mutation_equality<T: Dto, P: ValueProvider>(cx: &CaseContext<'_, T, P>) -> Result<(), CaseFailure> {
    let (mut a, mut b) = cx.equal_pair()?;

    for field in cx.fields() {
        let input = cx.input(field);
        cx.apply(field, &mut a, input.clone())?;
        cx.apply(field, &mut b, input)?;
    }

    if !a.equals(&b) {
        return Err(CaseFailure::assertion(format!(
            "`{}` instances are not equal after applying the same value to every field",
            T::type_name()
        )));
    }
    Ok(())
}

fn populate_field<T: Dto, P: ValueProvider>(
    cx: &CaseContext<'_, T, P>,
    field: &FieldDescriptor<T>,
) -> Result<(), CaseFailure> {
    let (mut a, mut b) = cx.equal_pair()?;

    cx.apply(field, &mut a, cx.input(field))?;
    b.populate(&a);

    if !a.equals(&b) {
        return Err(CaseFailure::assertion(format!(
            "`populate` did not carry `{}` over: source and target `{}` are not equal",
            field.name(),
            T::type_name()
        )));
    }
    Ok(())
}

fn populate_all<T: Dto, P: ValueProvider>(cx: &CaseContext<'_, T, P>) -> Result<(), CaseFailure> {
    let (mut a, mut b) = cx.equal_pair()?;

    for field in cx.fields() {
        cx.apply(field, &mut a, cx.input(field))?;
    }
    b.populate(&a);

    if !a.equals(&b) {
        return Err(CaseFailure::assertion(format!(
            "`populate` did not carry every field over: source and target `{}` are not equal",
            T::type_name()
        )));
    }
    Ok(())
}

fn hash_divergence<T: Dto, P: ValueProvider>(
    cx: &CaseContext<'_, T, P>,
    field: &FieldDescriptor<T>,
) -> Result<(), CaseFailure> {
    let (mut a, b) = cx.equal_pair()?;

    cx.apply(field, &mut a, cx.input(field))?;

    if a.hash_code() == b.hash_code() {
        return Err(CaseFailure::assertion(format!(
            "hash code of `{}` did not change after mutating `{}`",
            T::type_name(),
            field.name()
        )));
    }
    Ok(())
}

fn hash_convergence<T: Dto, P: ValueProvider>(cx: &CaseContext<'_, T, P>) -> Result<(), CaseFailure> {
    let mut a = cx.fresh()?;
    let mut b = cx.fresh()?;

    for field in cx.fields() {
        let input = cx.input(field);
        cx.apply(field, &mut a, input.clone())?;
        cx.apply(field, &mut b, input)?;

        if a.hash_code() != b.hash_code() {
            return Err(CaseFailure::assertion(format!(
                "hash codes of `{}` diverged after applying the same value to `{}`",
                T::type_name(),
                field.name()
            )));
        }
    }

    if a.hash_code() != b.hash_code() {
        return Err(CaseFailure::assertion(format!(
            "hash codes of `{}` instances differ",
            T::type_name()
        )));
    }
    Ok(())
}

fn accessor_default<T: Dto, P: ValueProvider>(
    cx: &CaseContext<'_, T, P>,
    field: &FieldDescriptor<T>,
) -> Result<(), CaseFailure> {
    let dto = cx.fresh()?;
    let actual = field.read(&dto);

    match cx.provider.expected_default(field.name()) {
        Some(expected) if expected != actual => Err(CaseFailure::assertion(format!(
            "`{}` on a default `{}` returned {actual}, expected {expected}",
            field.accessor_name(),
            T::type_name()
        ))),
        _ => Ok(()),
    }
}

fn accessor_round_trip<T: Dto, P: ValueProvider>(
    cx: &CaseContext<'_, T, P>,
    field: &FieldDescriptor<T>,
) -> Result<(), CaseFailure> {
    let mut dto = cx.fresh()?;
    let input = cx.input(field);
    let expected = cx.provider.output_for(field.name(), &input);

    cx.apply(field, &mut dto, input)?;
    let actual = field.read(&dto);

    if actual != expected {
        return Err(CaseFailure::assertion(format!(
            "`{}` returned {actual} after `{}`, expected {expected}",
            field.accessor_name(),
            field.mutator_name()
        )));
    }
    Ok(())
}

/// Build a default instance. With `catch_panics`, a panic becomes its message; otherwise it propagates.
pub(super) fn instantiate<T: Default>(catch_panics: bool) -> Result<T, String> {
    if !catch_panics {
        return Ok(T::default());
    }
    panic::catch_unwind(T::default).map_err(panic_message)
}

pub(super) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => (*message).to_string(),
            Err(_) => "non-string panic payload".to_string(),
        },
    }
}
