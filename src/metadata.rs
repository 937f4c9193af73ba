//! Method metadata recorded by `#[introspect]`.
//!
//! The `Introspect` trait is the harness's view of a DTO's public shape: the convention-named methods of
//! the type, each with its signature rendered as text and a type-erased handle to invoke it. Nothing here
//! interprets names; that is the field model builder's job.

use std::fmt;

use crate::value::{FieldValue, ValueError};

/// Type-erased accessor call.
pub type ReadFn<T> = fn(&T) -> FieldValue;

/// Type-erased mutator call.
pub type WriteFn<T> = fn(&mut T, FieldValue) -> Result<(), ValueError>;

/// Type-erased copy-constructor call.
pub type ConstructFn<T> = fn(&T) -> T;

/// Receiver of a recorded method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// `&self`
    Ref,
    /// `&mut self`
    RefMut,
    /// `self` / `mut self`
    Value,
    /// Typed receivers such as `self: Box<Self>`.
    Other,
    /// No receiver (associated function).
    Static,
}

/// How a recorded method can be called.
pub enum Invoker<T> {
    Read(ReadFn<T>),
    Write(WriteFn<T>),
    Construct(ConstructFn<T>),
    /// Recorded for completeness but not callable by the harness (wrong arity, generic, async...).
    Opaque,
}

impl<T> Clone for Invoker<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Invoker<T> {}

impl<T> fmt::Debug for Invoker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Invoker::Read(_) => "Read",
            Invoker::Write(_) => "Write",
            Invoker::Construct(_) => "Construct",
            Invoker::Opaque => "Opaque",
        })
    }
}

/// One public method of a DTO type.
pub struct MethodInfo<T> {
    pub name: &'static str,
    pub receiver: Receiver,
    /// Parameter types excluding the receiver, whitespace-free (`Option<String>`).
    pub params: &'static [&'static str],
    pub returns: Option<&'static str>,
    pub invoker: Invoker<T>,
}

impl<T> Clone for MethodInfo<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MethodInfo<T> {}

impl<T> fmt::Debug for MethodInfo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("receiver", &self.receiver)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .field("invoker", &self.invoker)
            .finish()
    }
}

/// Public shape of a DTO type.
///
/// Usually generated by `#[dto_contract::introspect]` on the type's inherent `impl` block. A hand-written
/// implementation must list each method once, in a stable order.
pub trait Introspect: Sized + 'static {
    /// Unqualified type name (`Employee`).
    fn type_name() -> &'static str;

    /// Recorded methods in declaration order.
    fn methods() -> Vec<MethodInfo<Self>>;
}
