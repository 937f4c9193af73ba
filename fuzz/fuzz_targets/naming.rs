#![no_main]

use dto_contract_core::naming::{is_field_ident, mutator_name, parse_accessor, parse_mutator};
use dto_contract_core::signature::normalize_type;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(accessor) = parse_accessor(s) {
            assert!(is_field_ident(accessor.field));
            assert_eq!(format!("{}{}", accessor.kind.prefix(), accessor.field), s);
        }
        if let Some(field) = parse_mutator(s) {
            assert_eq!(mutator_name(field), s);
        }
        let normalized = normalize_type(s);
        assert_eq!(normalize_type(&normalized), normalized);
    }
});
