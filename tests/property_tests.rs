//! Property-based tests for the field model builder
//!
//! Metadata is generated directly, bypassing `#[introspect]`, so arbitrary combinations of accessors and
//! mutators can be fed to the builder.

use std::collections::BTreeSet;

use dto_contract::{FieldModel, FieldValue, Invoker, MethodInfo, Receiver, ValueError};
use proptest::prelude::*;

#[derive(Debug, Default)]
struct Synthetic;

fn read_null(_: &Synthetic) -> FieldValue {
    FieldValue::Null
}

fn write_ignore(_: &mut Synthetic, _: FieldValue) -> Result<(), ValueError> {
    Ok(())
}

/// How one generated field is exposed.
#[derive(Debug, Clone)]
struct FieldShape {
    name: String,
    flag_accessor: bool,
    has_accessor: bool,
    has_mutator: bool,
    mutator_type_matches: bool,
}

impl FieldShape {
    fn is_paired(&self) -> bool {
        self.has_accessor && self.has_mutator && self.mutator_type_matches
    }
}

fn leak(s: String) -> &'static str {
    Box::leak(s.into_boxed_str())
}

fn methods(shapes: &[FieldShape]) -> Vec<MethodInfo<Synthetic>> {
    let mut methods = Vec::new();
    for shape in shapes {
        if shape.has_accessor {
            let prefix = if shape.flag_accessor { "is_" } else { "get_" };
            methods.push(MethodInfo {
                name: leak(format!("{prefix}{}", shape.name)),
                receiver: Receiver::Ref,
                params: &[],
                returns: Some("i64"),
                invoker: Invoker::Read(read_null),
            });
        }
        if shape.has_mutator {
            let params: &'static [&'static str] = if shape.mutator_type_matches { &["i64"] } else { &["String"] };
            methods.push(MethodInfo {
                name: leak(format!("set_{}", shape.name)),
                receiver: Receiver::RefMut,
                params,
                returns: None,
                invoker: Invoker::Write(write_ignore),
            });
        }
    }
    methods
}

fn shapes() -> impl Strategy<Value = Vec<FieldShape>> {
    prop::collection::btree_set("[a-z][a-z0-9_]{0,8}", 0..8).prop_flat_map(|names: BTreeSet<String>| {
        let count = names.len();
        prop::collection::vec(any::<(bool, bool, bool, bool)>(), count).prop_map(move |flags| {
            names
                .iter()
                .zip(flags)
                .map(
                    |(name, (flag_accessor, has_accessor, has_mutator, mutator_type_matches))| FieldShape {
                        name: name.clone(),
                        flag_accessor,
                        has_accessor,
                        has_mutator,
                        mutator_type_matches,
                    },
                )
                .collect()
        })
    })
}

proptest! {
    /// Property: exactly the fields with an accessor and a same-typed mutator are discovered
    #[test]
    fn discovers_exactly_paired_fields(fields in shapes()) {
        let model = FieldModel::from_methods("Synthetic", methods(&fields)).unwrap();

        let expected: Vec<&str> = fields.iter().filter(|s| s.is_paired()).map(|s| s.name.as_str()).collect();
        prop_assert_eq!(model.field_names(), expected);
    }

    /// Property: every accessor ends up either in the model or in the dropped list
    #[test]
    fn every_accessor_is_accounted_for(fields in shapes()) {
        let model = FieldModel::from_methods("Synthetic", methods(&fields)).unwrap();

        let accessors = fields.iter().filter(|s| s.has_accessor).count();
        prop_assert_eq!(model.len() + model.dropped().len(), accessors);
    }

    /// Property: mutators without accessors never produce fields
    #[test]
    fn getter_only_and_setter_only_fields_are_absent(fields in shapes()) {
        let model = FieldModel::from_methods("Synthetic", methods(&fields)).unwrap();

        for shape in fields.iter().filter(|s| !s.has_accessor || !s.has_mutator) {
            prop_assert!(model.field(&shape.name).is_none());
        }
    }

    /// Property: building twice from the same metadata gives the same model
    #[test]
    fn build_is_deterministic(fields in shapes()) {
        let a = FieldModel::from_methods("Synthetic", methods(&fields)).unwrap();
        let b = FieldModel::from_methods("Synthetic", methods(&fields)).unwrap();

        prop_assert_eq!(a.field_names(), b.field_names());
        prop_assert_eq!(a.dropped(), b.dropped());
    }
}
