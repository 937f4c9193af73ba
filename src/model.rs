//! Field model builder.
//!
//! Derives the testable fields of a DTO type from its recorded methods:
//!
//! 1. every `get_<field>` / `is_<field>` accessor taking only `&self` is a candidate;
//! 2. the candidate is kept if `set_<field>` exists, takes `&mut self` and exactly one parameter whose type
//!    equals the accessor's return type;
//! 3. otherwise it is dropped, recorded in [`FieldModel::dropped`] with a [`DropReason`] and logged.
//!
//! A copy constructor (an associated function taking the type itself and returning it) is located as well.
//! The battery does not use it; it is exposed for collaborators.

use std::collections::{HashMap, HashSet};
use std::fmt;

use dto_contract_core::naming::{mutator_name, parse_accessor, parse_mutator};
use dto_contract_core::signature::{is_owned_self, is_self_like, same_type};

use crate::error::HarnessError;
use crate::metadata::{ConstructFn, Introspect, Invoker, MethodInfo, ReadFn, Receiver, WriteFn};
use crate::value::{FieldValue, ValueError};

/// One testable field: an accessor paired with its mutator.
pub struct FieldDescriptor<T> {
    name: &'static str,
    value_type: &'static str,
    accessor: &'static str,
    mutator: &'static str,
    read: ReadFn<T>,
    write: WriteFn<T>,
}

impl<T> FieldDescriptor<T> {
    /// Field name, the identifier after `get_` / `is_`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Shared accessor return / mutator parameter type.
    pub fn value_type(&self) -> &'static str {
        self.value_type
    }

    pub fn accessor_name(&self) -> &'static str {
        self.accessor
    }

    pub fn mutator_name(&self) -> &'static str {
        self.mutator
    }

    /// Invoke the accessor.
    pub fn read(&self, dto: &T) -> FieldValue {
        (self.read)(dto)
    }

    /// Invoke the mutator.
    pub fn write(&self, dto: &mut T, value: FieldValue) -> Result<(), ValueError> {
        (self.write)(dto, value)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("accessor", &self.accessor)
            .field("mutator", &self.mutator)
            .finish_non_exhaustive()
    }
}

/// Why an accessor did not make it into the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// No `set_<field>` taking exactly one argument.
    MissingMutator,
    /// `set_<field>` exists but takes a different type.
    TypeMismatch {
        accessor_type: &'static str,
        mutator_type: &'static str,
    },
    /// The accessor or mutator cannot be called through a handle.
    NotInvocable,
    /// Another accessor already claimed the field (`get_x` and `is_x`).
    Shadowed { by: &'static str },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingMutator => f.write_str("no matching mutator"),
            DropReason::TypeMismatch {
                accessor_type,
                mutator_type,
            } => write!(f, "accessor returns `{accessor_type}` but mutator takes `{mutator_type}`"),
            DropReason::NotInvocable => f.write_str("not invocable"),
            DropReason::Shadowed { by } => write!(f, "shadowed by `{by}`"),
        }
    }
}

/// An accessor excluded from the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedField {
    pub field: &'static str,
    pub accessor: &'static str,
    pub reason: DropReason,
}

/// Handle to a discovered copy constructor.
pub struct CopyConstructor<T> {
    name: &'static str,
    construct: ConstructFn<T>,
}

impl<T> CopyConstructor<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Build a new instance from `source`.
    pub fn copy_from(&self, source: &T) -> T {
        (self.construct)(source)
    }
}

impl<T> fmt::Debug for CopyConstructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyConstructor").field("name", &self.name).finish_non_exhaustive()
    }
}

/// The derived field set of a DTO type. Immutable once built.
pub struct FieldModel<T> {
    type_name: &'static str,
    fields: Vec<FieldDescriptor<T>>,
    dropped: Vec<DroppedField>,
    copy_constructor: Option<CopyConstructor<T>>,
}

impl<T> fmt::Debug for FieldModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldModel")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .field("dropped", &self.dropped)
            .field("copy_constructor", &self.copy_constructor)
            .finish()
    }
}

impl<T: Introspect> FieldModel<T> {
    /// Build the model from the type's `Introspect` metadata.
    pub fn build() -> Result<Self, HarnessError> {
        Self::from_methods(T::type_name(), T::methods())
    }
}

impl<T> FieldModel<T> {
    /// Build a model from explicitly supplied metadata.
    ///
    /// Deterministic: the same method list always yields the same model, with fields in accessor order.
    #[tracing::instrument(skip_all, fields(type_name = %type_name, method_count = methods.len()))]
    pub fn from_methods(type_name: &'static str, methods: Vec<MethodInfo<T>>) -> Result<Self, HarnessError> {
        let mut seen = HashSet::with_capacity(methods.len());
        for method in &methods {
            if !seen.insert(method.name) {
                return Err(HarnessError::DuplicateMethod {
                    type_name,
                    method: method.name,
                });
            }
        }

        let mutators: HashMap<&'static str, &MethodInfo<T>> = methods
            .iter()
            .filter(|method| parse_mutator(method.name).is_some())
            .map(|method| (method.name, method))
            .collect();

        let mut fields: Vec<FieldDescriptor<T>> = Vec::new();
        let mut dropped = Vec::new();

        for method in &methods {
            let Some(accessor) = parse_accessor(method.name) else {
                continue;
            };
            match pair(method, accessor.field, &mutators, &fields) {
                Ok(descriptor) => fields.push(descriptor),
                Err(reason) => {
                    tracing::warn!(
                        type_name,
                        field = accessor.field,
                        accessor = method.name,
                        %reason,
                        "accessor excluded from field model"
                    );
                    dropped.push(DroppedField {
                        field: accessor.field,
                        accessor: method.name,
                        reason,
                    });
                }
            }
        }

        let copy_constructor = methods.iter().find_map(|method| copy_constructor(method, type_name));

        tracing::debug!(
            fields = fields.len(),
            dropped = dropped.len(),
            copy_constructor = copy_constructor.is_some(),
            "built field model"
        );

        Ok(Self {
            type_name,
            fields,
            dropped,
            copy_constructor,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.name).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Accessors that were not paired, in accessor order.
    pub fn dropped(&self) -> &[DroppedField] {
        &self.dropped
    }

    pub fn copy_constructor(&self) -> Option<&CopyConstructor<T>> {
        self.copy_constructor.as_ref()
    }
}

fn pair<T>(
    accessor: &MethodInfo<T>,
    field: &'static str,
    mutators: &HashMap<&'static str, &MethodInfo<T>>,
    fields: &[FieldDescriptor<T>],
) -> Result<FieldDescriptor<T>, DropReason> {
    let (Invoker::Read(read), Some(value_type), Receiver::Ref, []) =
        (accessor.invoker, accessor.returns, accessor.receiver, accessor.params)
    else {
        return Err(DropReason::NotInvocable);
    };

    if let Some(existing) = fields.iter().find(|descriptor| descriptor.name == field) {
        return Err(DropReason::Shadowed { by: existing.accessor });
    }

    let mutator = mutators
        .get(mutator_name(field).as_str())
        .filter(|mutator| mutator.params.len() == 1)
        .ok_or(DropReason::MissingMutator)?;

    let mutator_type = mutator.params[0];
    if !same_type(value_type, mutator_type) {
        return Err(DropReason::TypeMismatch {
            accessor_type: value_type,
            mutator_type,
        });
    }

    let (Invoker::Write(write), Receiver::RefMut) = (mutator.invoker, mutator.receiver) else {
        return Err(DropReason::NotInvocable);
    };

    Ok(FieldDescriptor {
        name: field,
        value_type,
        accessor: accessor.name,
        mutator: mutator.name,
        read,
        write,
    })
}

fn copy_constructor<T>(method: &MethodInfo<T>, type_name: &str) -> Option<CopyConstructor<T>> {
    let Invoker::Construct(construct) = method.invoker else {
        return None;
    };
    let takes_self = matches!(method.params, [param] if is_self_like(param, type_name));
    let returns_self = method.returns.is_some_and(|ret| is_owned_self(ret, type_name));
    (method.receiver == Receiver::Static && takes_self && returns_self).then_some(CopyConstructor {
        name: method.name,
        construct,
    })
}
