use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One object from the remote JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Case-insensitive substring match. `needle` must already be lowercase.
    fn matches_lowercase(&self, needle: &str, searchable: &[String]) -> bool {
        let contains = |value: &Value| {
            value
                .as_str()
                .is_some_and(|text| text.to_lowercase().contains(needle))
        };
        if searchable.is_empty() {
            self.0.values().any(contains)
        } else {
            searchable
                .iter()
                .filter_map(|field| self.0.get(field))
                .any(contains)
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Keep the records whose searchable fields contain `term`, preserving order.
pub fn filter_records(records: Vec<Record>, term: &str, searchable: &[String]) -> Vec<Record> {
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|record| record.matches_lowercase(&needle, searchable))
        .collect()
}
