use std::collections::HashMap;

use crate::Record;

/// Query-keyed result sets, kept in insertion order. No eviction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryCache {
    order: Vec<String>,
    entries: HashMap<String, Vec<Record>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &str) -> Option<&[Record]> {
        self.entries.get(query).map(Vec::as_slice)
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(query)
    }

    /// Store `results` under `query`. Re-inserting keeps the original position.
    pub fn insert(&mut self, query: String, results: Vec<Record>) {
        if !self.entries.contains_key(&query) {
            self.order.push(query.clone());
        }
        self.entries.insert(query, results);
    }

    /// Cached queries, oldest first.
    pub fn queries(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }
}
