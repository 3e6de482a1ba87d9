//! JSON-file backed store.
//!
//! The whole store is one JSON object of string values. It is read once on
//! open and rewritten (via a temp file and rename) on every change.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::{KeyValueStore, StoreError};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `path`, starting empty when it does not exist.
    ///
    /// A file that is not a JSON object is treated as empty (and logged);
    /// the next write replaces it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => parse_entries(&path, &raw),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = entries.len(), "opened store");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn parse_entries(path: &Path, raw: &str) -> BTreeMap<String, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .map(|(k, v)| match v {
                Value::String(s) => (k, s),
                other => (k, other.to_string()),
            })
            .collect(),
        Ok(_) => {
            warn!(path = %path.display(), "store file is not a JSON object; starting empty");
            BTreeMap::new()
        }
        Err(e) => {
            warn!(path = %path.display(), "store file is malformed ({e}); starting empty");
            BTreeMap::new()
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "raindrop-store-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn persists_across_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("Rain_drops_score").unwrap(), None);
        store.set("Rain_drops_score", "1500").unwrap();
        drop(store);

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            store.get("Rain_drops_score").unwrap().as_deref(),
            Some("1500")
        );
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_file_opens_empty() {
        let path = temp_path("malformed");
        fs::write(&path, "{not json").unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);

        fs::write(&path, "[1, 2, 3]").unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn non_string_values_are_stringified() {
        let path = temp_path("stringify");
        fs::write(&path, r#"{"n": 42, "s": "x"}"#).unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("n").unwrap().as_deref(), Some("42"));
        assert_eq!(store.get("s").unwrap().as_deref(), Some("x"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn remove_deletes_key_on_disk() {
        let path = temp_path("remove");
        let _ = fs::remove_file(&path);
        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("a", "1").unwrap();
        store.remove("a").unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        let _ = fs::remove_file(&path);
    }
}
