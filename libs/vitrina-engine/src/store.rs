use vitrina_api::record::Record;

/// Process-lifetime record storage for one collection resource.
///
/// Unbounded: accepted records are never dropped or reordered while the
/// process lives.
#[derive(Debug, Default)]
pub struct Store {
    records: std::sync::RwLock<Vec<Record>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: Record) {
        let mut guard = match self.records.write() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("store write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.push(record);
    }

    /// All records in insertion order.
    pub fn records(&self) -> Vec<Record> {
        let guard = match self.records.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("store read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.clone()
    }

    pub fn len(&self) -> usize {
        let guard = match self.records.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("store read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(name: &str) -> Record {
        Record::from_value(json!({ "nombre": name })).unwrap()
    }

    #[test]
    fn append_preserves_insertion_order() {
        let store = Store::new();
        assert!(store.is_empty());

        store.append(record("Ana"));
        store.append(record("Luis"));
        store.append(record("Eva"));

        let records = store.records();
        assert_eq!(store.len(), 3);
        assert_eq!(records[0].get("nombre"), Some(&json!("Ana")));
        assert_eq!(records[1].get("nombre"), Some(&json!("Luis")));
        assert_eq!(records[2].get("nombre"), Some(&json!("Eva")));
    }
}
