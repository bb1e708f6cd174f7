//! Form-to-record capture.
//!
//! A `Form` mirrors one input form of the portal page: named fields with
//! defaults. Submitting gathers every field into ordered `FormData`, which
//! flattens into a record (last value wins on repeated names), and puts the
//! form back to its defaults. No field is validated.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::HistoryRecord;

/// One named input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: String,
    #[serde(skip)]
    pub default: String,
}

/// Submitted name/value pairs in form order. Names may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Flatten into one mapping. A repeated name keeps its first position
    /// and takes its last value.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for (name, value) in &self.entries {
            map.insert(name.clone(), Value::String(value.clone()));
        }
        map
    }

    /// Decode the flattened mapping into a typed record. Fields the record
    /// does not declare are dropped; missing ones read as empty.
    pub fn into_record<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.to_map()))
    }

    /// Keep every field as-is.
    pub fn into_history(self) -> HistoryRecord {
        let mut record = HistoryRecord::new();
        for (name, value) in self.entries {
            record.insert(name, value);
        }
        record
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Identifies the portal's input forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormId {
    Appointment,
    Review,
    Delivery,
    History,
}

/// A form with named fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Form {
    pub id: FormId,
    pub fields: Vec<Field>,
}

impl Form {
    /// Form whose listed fields all default to the empty string.
    pub fn with_fields(id: FormId, names: &[&str]) -> Self {
        Self {
            id,
            fields: names
                .iter()
                .map(|name| Field {
                    name: name.to_string(),
                    value: String::new(),
                    default: String::new(),
                })
                .collect(),
        }
    }

    /// Booking form: date, time, doctor, department.
    pub fn appointment() -> Self {
        Self::with_fields(FormId::Appointment, &["date", "time", "doctor", "department"])
    }

    /// Review form: hospital, rating, text.
    pub fn review() -> Self {
        Self::with_fields(FormId::Review, &["hospital", "rating", "text"])
    }

    /// Medicine delivery form: medicine, qty, address.
    pub fn delivery() -> Self {
        Self::with_fields(FormId::Delivery, &["medicine", "qty", "address"])
    }

    /// History form. Its fields are whatever the page submits.
    pub fn history() -> Self {
        Self::with_fields(FormId::History, &[])
    }

    /// Set the first field called `name`, adding an empty-default field when
    /// the form has none.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value = value,
            None => self.fields.push(Field {
                name: name.to_string(),
                value,
                default: String::new(),
            }),
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Copy submitted pairs into the form, in order.
    pub fn fill<'a>(&mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (name, value) in pairs {
            self.set(name, value);
        }
    }

    /// Gather every named field in form order.
    pub fn data(&self) -> FormData {
        self.fields
            .iter()
            .filter(|f| !f.name.is_empty())
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Put every field back to its default.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.default.clone();
        }
    }

    /// Whether every field holds its default.
    pub fn is_pristine(&self) -> bool {
        self.fields.iter().all(|f| f.value == f.default)
    }

    /// Submit: gather the data, then reset.
    pub fn submit(&mut self) -> FormData {
        let data = self.data();
        self.reset();
        data
    }
}
