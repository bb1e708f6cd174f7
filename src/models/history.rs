use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form medical history notes: every field of the history form, in
/// form order. Only one record exists at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryRecord {
    fields: Map<String, Value>,
}

impl HistoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. A repeated name keeps its first position and takes the
    /// latest value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), Value::String(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in form order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_flat_mapping_in_form_order() {
        let mut record = HistoryRecord::new();
        record.insert("name", "Ana");
        record.insert("allergies", "penicillin");
        record.insert("conditions", "");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"Ana","allergies":"penicillin","conditions":""}"#);
    }

    #[test]
    fn repeated_name_takes_latest_value() {
        let mut record = HistoryRecord::new();
        record.insert("notes", "first");
        record.insert("blood", "O+");
        record.insert("notes", "second");
        assert_eq!(record.get("notes"), Some("second"));
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["notes", "blood"]);
    }
}
