//! Type-name helpers for comparing method signatures recorded as strings.
//!
//! Signatures reach the runtime as the token text of the Rust type (`Option < String >`). Comparison is done
//! on the whitespace-free form.

/// Strip all whitespace from a stringified type.
pub fn normalize_type(ty: &str) -> String {
    ty.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Whether two stringified types name the same type.
pub fn same_type(a: &str, b: &str) -> bool {
    normalize_type(a) == normalize_type(b)
}

/// Whether `ty` is `Self` or `type_name`, owned or behind a shared reference.
pub fn is_self_like(ty: &str, type_name: &str) -> bool {
    let ty = normalize_type(ty);
    let owned = ty.strip_prefix('&').unwrap_or(&ty);
    is_owned_self(owned, type_name)
}

/// Whether `ty` is `Self` or `type_name` by value.
pub fn is_owned_self(ty: &str, type_name: &str) -> bool {
    let ty = normalize_type(ty);
    ty == "Self" || ty == type_name
}

/// Whether `ty` is a shared reference.
pub fn is_reference(ty: &str) -> bool {
    normalize_type(ty).starts_with('&')
}

/// Whether `ty` is `Result<..>`, bare or path-qualified through `std`/`core`.
pub fn is_result(ty: &str) -> bool {
    let ty = normalize_type(ty);
    let ty = ty.strip_prefix("::").unwrap_or(&ty);
    let ty = ty
        .strip_prefix("std::result::")
        .or_else(|| ty.strip_prefix("core::result::"))
        .unwrap_or(ty);
    ty.starts_with("Result<")
}
