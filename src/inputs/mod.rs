//! Raw, user-typed calculator inputs

pub mod loader;

pub use loader::{load_scenarios, ScenarioRow};

use crate::format::parse_formatted_number;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Field name to raw text, exactly as typed (possibly comma-grouped)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInputs {
    fields: BTreeMap<String, String>,
}

impl RawInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.trim().to_string(), value.into());
    }

    /// Raw text of a field; blank values count as absent
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Parsed numeric value: `None` if absent, `Some(None)` if not a number
    pub fn number(&self, field: &str) -> Option<Option<f64>> {
        self.get(field).map(parse_formatted_number)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build from a JSON object whose values may be strings or numbers
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut inputs = RawInputs::new();
        for (field, v) in object {
            match v {
                Value::String(s) => inputs.insert(field, s.clone()),
                Value::Number(n) => inputs.insert(field, n.to_string()),
                Value::Bool(b) => inputs.insert(field, b.to_string()),
                _ => {}
            }
        }
        Some(inputs)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawInputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut inputs = RawInputs::new();
        for (k, v) in iter {
            inputs.insert(k.as_ref(), v);
        }
        inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_is_absent() {
        let inputs = RawInputs::new().with("rate", "  ").with("years", "10");
        assert_eq!(inputs.get("rate"), None);
        assert_eq!(inputs.get("years"), Some("10"));
    }

    #[test]
    fn test_number_parses_grouped_text() {
        let inputs = RawInputs::new()
            .with("principal", "1,00,000")
            .with("rate", "twelve");
        assert_eq!(inputs.number("principal"), Some(Some(100_000.0)));
        assert_eq!(inputs.number("rate"), Some(None));
        assert_eq!(inputs.number("years"), None);
    }

    #[test]
    fn test_from_json_accepts_numbers_and_strings() {
        let inputs = RawInputs::from_json(&json!({
            "monthly_investment": "5,000",
            "rate": 12,
            "years": 10.0,
            "ignored": null
        }))
        .unwrap();
        assert_eq!(inputs.number("monthly_investment"), Some(Some(5_000.0)));
        assert_eq!(inputs.number("rate"), Some(Some(12.0)));
        assert_eq!(inputs.number("years"), Some(Some(10.0)));
        assert_eq!(inputs.len(), 3);

        assert!(RawInputs::from_json(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_collect_from_pairs() {
        let inputs: RawInputs = [("rate", "8.5"), ("tenure_years", "20")].into_iter().collect();
        assert_eq!(inputs.get("tenure_years"), Some("20"));
    }
}
