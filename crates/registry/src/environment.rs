use serde_json::Value;
use std::collections::BTreeMap;

/// The mutable environment-checks map a compile consults for `qx.core.Environment`-style
/// checks (`spec.md` §4.I). `set(key, undefined)` deletes; `set(map)` merges — modeled
/// here as [`EnvironmentMap::set`] (single key, `None` deletes) and
/// [`EnvironmentMap::merge`] (bulk, overwriting on conflict).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentMap {
    values: BTreeMap<String, Value>,
}

impl EnvironmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// `set(key, Some(value))` inserts/overwrites; `set(key, None)` deletes
    /// the key entirely.
    pub fn set(&mut self, key: impl Into<String>, value: Option<Value>) {
        match value {
            Some(value) => {
                self.values.insert(key.into(), value);
            }
            None => {
                self.values.remove(&key.into());
            }
        }
    }

    /// Merges every key of `other` into this map, overwriting on conflict.
    pub fn merge(&mut self, other: BTreeMap<String, Value>) {
        self.values.extend(other);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_none_deletes_an_existing_key() {
        let mut env = EnvironmentMap::new();
        env.set("qx.debug", Some(json!(true)));
        assert_eq!(env.get("qx.debug"), Some(&json!(true)));

        env.set("qx.debug", None);
        assert_eq!(env.get("qx.debug"), None);
    }

    #[test]
    fn merge_overwrites_conflicting_keys_and_keeps_others() {
        let mut env = EnvironmentMap::new();
        env.set("qx.debug", Some(json!(true)));
        env.set("qx.mobile.nativescroll", Some(json!(false)));

        let mut incoming = BTreeMap::new();
        incoming.insert("qx.debug".to_string(), json!(false));
        incoming.insert("qx.application".to_string(), json!("myapp.Application"));
        env.merge(incoming);

        assert_eq!(env.get("qx.debug"), Some(&json!(false)));
        assert_eq!(env.get("qx.mobile.nativescroll"), Some(&json!(false)));
        assert_eq!(env.get("qx.application"), Some(&json!("myapp.Application")));
    }
}
