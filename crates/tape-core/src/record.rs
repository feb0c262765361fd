//! Labeled records.

use crate::error::{CoreError, Result};
use crate::value::Value;

/// One labeled field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

/// An ordered name-to-value mapping produced by the label stage.
///
/// Field order is insertion order, which is the positional order of the
/// label list the record was built from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<Field>,
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| Field { name, value })
                .collect(),
        }
    }
}

impl Record {
    /// Build a record by zipping labels with converted values positionally.
    ///
    /// The two lists must have the same length.
    pub fn from_pairs(labels: &[String], values: Vec<Value>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(CoreError::FieldMismatch {
                labels: labels.len(),
                values: values.len(),
            });
        }
        let fields = labels
            .iter()
            .zip(values)
            .map(|(name, value)| Field {
                name: name.clone(),
                value,
            })
            .collect();
        Ok(Self { fields })
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_from_pairs_positional() {
        let record = Record::from_pairs(
            &labels(&["name", "price", "change"]),
            vec![
                Value::Text("AAPL".to_string()),
                Value::Float(10.5),
                Value::Float(3.2),
            ],
        )
        .unwrap();

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("name"), Some(&Value::Text("AAPL".to_string())));
        assert_eq!(record.get("price"), Some(&Value::Float(10.5)));
        assert_eq!(record.get("change"), Some(&Value::Float(3.2)));
        assert_eq!(record.get("volume"), None);
    }

    #[test]
    fn test_from_pairs_rejects_length_mismatch() {
        let err = Record::from_pairs(&labels(&["name", "price"]), vec![Value::Int(1)]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::FieldMismatch {
                labels: 2,
                values: 1
            }
        ));
    }

    #[test]
    fn test_iteration_preserves_label_order() {
        let record = Record::from_pairs(
            &labels(&["b", "a"]),
            vec![Value::Int(1), Value::Int(2)],
        )
        .unwrap();
        let names: Vec<&str> = record.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
