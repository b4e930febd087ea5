use std::collections::HashMap;

use crate::record::KeyValue;

// keys are kept in first-seen order, never taken from the map
#[derive(Debug, Default)]
pub struct Groups {
    values: HashMap<String, Vec<String>>,
    keys: Vec<String>,
    records: usize,
}

impl Groups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kv: KeyValue) {
        let KeyValue { key, value } = kv;
        self.records += 1;
        match self.values.get_mut(&key) {
            Some(values) => values.push(value),
            None => {
                self.keys.push(key.clone());
                self.values.insert(key, vec![value]);
            }
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.records
    }

    pub fn take(&mut self, key: &str) -> Vec<String> {
        self.values.remove(key).unwrap_or_default()
    }
}

impl Extend<KeyValue> for Groups {
    fn extend<T: IntoIterator<Item = KeyValue>>(&mut self, iter: T) {
        for kv in iter {
            self.insert(kv);
        }
    }
}
