use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;

/// One submitted or seeded data item: named fields mapped to JSON values.
/// Field order is preserved as received, so a record reads back exactly
/// as the client sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Build a record from a parsed JSON value. Only objects qualify.
    pub fn from_value(value: Value) -> Result<Self, StoreError> {
        match value {
            Value::Object(fields) => Ok(Record(fields)),
            _ => Err(StoreError::NotAnObject),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// A field satisfies a requirement when it is present and truthy.
    pub fn field_present(&self, field: &str) -> bool {
        self.0.get(field).is_some_and(is_truthy)
    }

    /// Required fields that are absent or falsy, in the order given.
    pub fn missing_required(&self, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|field| !self.field_present(field.as_str()))
            .cloned()
            .collect()
    }
}

/// Truthiness as the submitting clients understand it: `null`, `false`,
/// numeric zero and the empty string carry no data. Empty arrays and
/// empty objects count as present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn falsy_values_are_not_truthy() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&value), "expected falsy: {value}");
        }
    }

    #[test]
    fn truthy_values_include_empty_containers() {
        for value in [
            json!(true),
            json!(1),
            json!(-1),
            json!("0"),
            json!(" "),
            json!([]),
            json!({}),
        ] {
            assert!(is_truthy(&value), "expected truthy: {value}");
        }
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(Record::from_value(json!({"a": 1})).is_ok());
        for value in [json!([1, 2]), json!("x"), json!(3), json!(null)] {
            assert!(matches!(
                Record::from_value(value),
                Err(StoreError::NotAnObject)
            ));
        }
    }

    #[test]
    fn missing_required_reports_in_declaration_order() {
        let record = Record::from_value(json!({"nombre": "Ana", "edad": 0})).unwrap();
        let required = vec![
            "apellido".to_string(),
            "nombre".to_string(),
            "edad".to_string(),
        ];
        assert_eq!(
            record.missing_required(&required),
            vec!["apellido".to_string(), "edad".to_string()]
        );
    }

    #[test]
    fn record_serializes_fields_in_received_order() {
        let record =
            Record::from_value(json!({"nombre": "Ana", "apellido": "Diaz"})).unwrap();
        let body = serde_json::to_string(&record).unwrap();
        assert_eq!(body, r#"{"nombre":"Ana","apellido":"Diaz"}"#);
    }
}
