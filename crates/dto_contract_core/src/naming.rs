//! Accessor/mutator naming convention.
//!
//! Accessors are `get_<field>` or `is_<field>`, mutators are `set_<field>`. The `<field>` part must be a
//! plain identifier tail: ASCII alphanumerics and underscores, not starting with an underscore.

/// Prefix of value accessors (`get_first_name`).
pub const GET_PREFIX: &str = "get_";

/// Prefix of flag accessors (`is_active`).
pub const IS_PREFIX: &str = "is_";

/// Prefix of mutators (`set_first_name`).
pub const SET_PREFIX: &str = "set_";

/// Which accessor prefix a method name used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Get,
    Is,
}

impl AccessorKind {
    pub fn prefix(self) -> &'static str {
        match self {
            AccessorKind::Get => GET_PREFIX,
            AccessorKind::Is => IS_PREFIX,
        }
    }
}

/// A method name split into accessor prefix and field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorName<'a> {
    pub kind: AccessorKind,
    pub field: &'a str,
}

/// Parse `get_<field>` / `is_<field>` into its field name.
///
/// Returns `None` for anything else, including a bare prefix (`get_`) or a malformed tail (`get__x`).
pub fn parse_accessor(name: &str) -> Option<AccessorName<'_>> {
    [AccessorKind::Get, AccessorKind::Is].into_iter().find_map(|kind| {
        let field = name.strip_prefix(kind.prefix())?;
        is_field_ident(field).then_some(AccessorName { kind, field })
    })
}

/// Parse `set_<field>` into its field name.
pub fn parse_mutator(name: &str) -> Option<&str> {
    name.strip_prefix(SET_PREFIX).filter(|field| is_field_ident(field))
}

/// Name of the mutator that pairs with `field`.
pub fn mutator_name(field: &str) -> String {
    format!("{SET_PREFIX}{field}")
}

/// Whether `name` is an accessor or a mutator under the convention.
pub fn is_convention_name(name: &str) -> bool {
    parse_accessor(name).is_some() || parse_mutator(name).is_some()
}

/// Whether `s` is usable as the field part of a convention name.
pub fn is_field_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}
