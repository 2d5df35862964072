use indexmap::IndexMap;

/// Ordered multimap from attribute key to its values.
///
/// Keys keep the spelling they were first written with but are compared
/// case-insensitively. Distinct keys iterate in first-insertion order and
/// repeated values keep source order, which keeps rendering deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeStore {
    entries: IndexMap<String, Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    values: Vec<String>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `key`, creating the key if absent.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let entry = self
            .entries
            .entry(key.to_lowercase())
            .or_insert_with(|| Entry {
                key,
                values: Vec::new(),
            });
        entry.values.push(value.into());
    }

    /// Number of distinct keys.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values stored under `key`, looked up case-insensitively.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .get(&key.to_lowercase())
            .map(|entry| entry.values.as_slice())
    }

    /// Iterate `(key, values)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .values()
            .map(|entry| (entry.key.as_str(), entry.values.as_slice()))
    }

    /// Append `other`'s values for every key this store already holds.
    ///
    /// Keys that only exist in `other` are dropped.
    pub fn merge_known(&mut self, other: &AttributeStore) {
        for (folded, entry) in self.entries.iter_mut() {
            if let Some(extra) = other.entries.get(folded) {
                entry.values.extend(extra.values.iter().cloned());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AttributeStore;

    #[test]
    fn repeated_keys_group_under_first_spelling() {
        let mut store = AttributeStore::new();
        store.put("Rule", "a");
        store.put("tag", "x");
        store.put("rule", "b");

        assert_eq!(store.count(), 2);
        let pairs: Vec<(&str, Vec<&str>)> = store
            .iter()
            .map(|(k, v)| (k, v.iter().map(String::as_str).collect()))
            .collect();
        assert_eq!(pairs, vec![("Rule", vec!["a", "b"]), ("tag", vec!["x"])]);
    }

    #[test]
    fn merge_known_ignores_foreign_keys() {
        let mut base = AttributeStore::new();
        base.put("flush", "1");
        let mut other = AttributeStore::new();
        other.put("FLUSH", "5");
        other.put("log_level", "debug");

        base.merge_known(&other);

        assert_eq!(base.get("flush"), Some(&["1".to_string(), "5".to_string()][..]));
        assert_eq!(base.get("log_level"), None);
        assert_eq!(base.count(), 1);
    }
}
