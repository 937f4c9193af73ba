//! Layering guardrails to keep macro machinery out of the runtime crates.
//!
//! Parsing Rust syntax is the job of `dto_contract_derive`. The runtime crate and the shared vocabulary crate
//! must not list `syn`, `quote` or `proc-macro2` in `[dependencies]`.

const MACRO_CRATES: [&str; 3] = ["syn", "quote", "proc-macro2"];

fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn runtime_does_not_depend_on_macro_crates() {
    let deps = dependency_names(include_str!("../Cargo.toml"));
    for forbidden in MACRO_CRATES {
        assert!(
            !deps.iter().any(|dep| dep == forbidden),
            "`{forbidden}` must not appear in the runtime's [dependencies]"
        );
    }
}

#[test]
fn core_vocabulary_has_no_macro_dependencies() {
    let deps = dependency_names(include_str!("../crates/dto_contract_core/Cargo.toml"));
    for forbidden in MACRO_CRATES {
        assert!(
            !deps.iter().any(|dep| dep == forbidden),
            "`{forbidden}` must not appear in dto_contract_core's [dependencies]"
        );
    }
}

#[test]
fn derive_uses_shared_vocabulary() {
    let deps = dependency_names(include_str!("../crates/dto_contract_derive/Cargo.toml"));
    assert!(deps.iter().any(|dep| dep == "dto_contract_core"));
}
