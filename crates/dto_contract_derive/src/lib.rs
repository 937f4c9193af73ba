//! Macros for the `dto_contract` harness.
//!
//! - `introspect`: records the accessor/mutator surface of an inherent `impl` block as
//!   `dto_contract::Introspect` metadata.

use proc_macro::TokenStream;
use syn::{ItemImpl, parse_macro_input};

mod expand;

/// Records the convention-named methods of an inherent `impl` block.
///
/// The block is emitted unchanged (minus `#[dto(...)]` helper attributes), followed by an
/// `impl dto_contract::Introspect` listing:
/// - every `pub` method named `get_*`, `is_*` or `set_*`, and
/// - every `pub` associated function taking the type itself as its only argument and returning it
///   (copy-constructor candidates).
///
/// Pairing and type matching happen later, in `dto_contract::FieldModel::build`.
///
/// Accessors must return a type implementing `dto_contract::IntoFieldValue`; mutators must take a type
/// implementing `dto_contract::FromFieldValue`. Mark a convention-named method `#[dto(skip)]` to leave
/// it out of the metadata.
///
/// Apply it to one `impl` block per type.
///
/// # Example
/// ```ignore
/// #[dto_contract::introspect]
/// impl Employee {
///     pub fn get_age(&self) -> i64 { self.age }
///     pub fn set_age(&mut self, age: i64) { self.age = age; }
/// }
/// ```
#[proc_macro_attribute]
pub fn introspect(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemImpl);
    match expand::expand_introspect(attr.into(), item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
