//! Value providers: the per-DTO source of test inputs and expectations.

use std::collections::HashMap;

use crate::value::FieldValue;

/// Supplies field values to the battery.
///
/// Each call to [`ValueProvider::input_for`] is an independent request; the battery may call it more than
/// once per case.
pub trait ValueProvider {
    /// A value accepted by the field's mutator.
    fn input_for(&self, field: &str) -> FieldValue;

    /// The value the accessor should report after `input` was applied. Identity by default.
    fn output_for(&self, _field: &str, input: &FieldValue) -> FieldValue {
        input.clone()
    }

    /// The value the accessor reports on a default instance, if the provider wants it checked.
    fn expected_default(&self, _field: &str) -> Option<FieldValue> {
        None
    }
}

impl<F> ValueProvider for F
where
    F: Fn(&str) -> FieldValue,
{
    fn input_for(&self, field: &str) -> FieldValue {
        self(field)
    }
}

/// A provider backed by per-field maps.
#[derive(Debug, Clone, Default)]
pub struct MapValueProvider {
    inputs: HashMap<String, FieldValue>,
    outputs: HashMap<String, FieldValue>,
    defaults: HashMap<String, FieldValue>,
}

impl MapValueProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mutator input for `field`.
    pub fn with_input(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.inputs.insert(field.into(), value.into());
        self
    }

    /// Override the expected accessor output for `field` (otherwise the input itself).
    pub fn with_output(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.outputs.insert(field.into(), value.into());
        self
    }

    /// Expect `value` from the accessor of a default instance.
    pub fn with_default(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.defaults.insert(field.into(), value.into());
        self
    }
}

impl ValueProvider for MapValueProvider {
    fn input_for(&self, field: &str) -> FieldValue {
        match self.inputs.get(field) {
            Some(value) => value.clone(),
            None => {
                tracing::warn!(field, "no input configured, using null");
                FieldValue::Null
            }
        }
    }

    fn output_for(&self, field: &str, input: &FieldValue) -> FieldValue {
        self.outputs.get(field).cloned().unwrap_or_else(|| input.clone())
    }

    fn expected_default(&self, field: &str) -> Option<FieldValue> {
        self.defaults.get(field).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_provider_returns_configured_input() {
        let provider = MapValueProvider::new().with_input("first_name", "Foo").with_input("age", 55);
        assert_eq!(provider.input_for("first_name"), FieldValue::from("Foo"));
        assert_eq!(provider.input_for("age"), FieldValue::Int(55));
    }

    #[test]
    fn test_map_provider_missing_input_is_null() {
        let provider = MapValueProvider::new();
        assert_eq!(provider.input_for("anything"), FieldValue::Null);
    }

    #[test]
    fn test_output_defaults_to_identity() {
        let provider = MapValueProvider::new().with_input("age", 55);
        let input = provider.input_for("age");
        assert_eq!(provider.output_for("age", &input), input);
    }

    #[test]
    fn test_output_override() {
        let provider = MapValueProvider::new()
            .with_input("email", "FOO@EXAMPLE.COM")
            .with_output("email", "foo@example.com");
        let input = provider.input_for("email");
        assert_eq!(provider.output_for("email", &input), FieldValue::from("foo@example.com"));
    }

    #[test]
    fn test_expected_default() {
        let provider = MapValueProvider::new().with_default("age", 0);
        assert_eq!(provider.expected_default("age"), Some(FieldValue::Int(0)));
        assert_eq!(provider.expected_default("first_name"), None);
    }

    #[test]
    fn test_closure_provider() {
        let provider = |field: &str| FieldValue::from(field.len() as i64);
        assert_eq!(provider.input_for("age"), FieldValue::Int(3));
        assert_eq!(provider.expected_default("age"), None);
    }
}
