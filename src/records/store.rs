//! Key-value record storage.
//!
//! Each key maps to an ordered list of JSON records. The file store keeps one
//! pretty-printed `<key>.json` array per key; a missing file reads as empty.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::error::{RecordError, RecordResult};

pub trait RecordStore: Send + Sync {
    fn load(&self, key: &str) -> RecordResult<Vec<Value>>;
    fn save(&mut self, key: &str, records: &[Value]) -> RecordResult<()>;
}

pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self, key: &str) -> RecordResult<Vec<Value>> {
        let path = self.path_for(key);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(RecordError::Io { path, source }),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Array(records)) => Ok(records),
            Ok(_) => Err(RecordError::Malformed {
                key: key.to_string(),
                reason: "expected a JSON array".to_string(),
            }),
            Err(e) => Err(RecordError::Malformed {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn save(&mut self, key: &str, records: &[Value]) -> RecordResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|source| RecordError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let json = serde_json::to_string_pretty(records).map_err(|source| RecordError::Serialize {
            key: key.to_string(),
            source,
        })?;

        let path = self.path_for(key);
        std::fs::write(&path, json).map_err(|source| RecordError::Io { path, source })
    }
}

/// Store kept entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    records: HashMap<String, Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(key: &str, records: Vec<Value>) -> Self {
        let mut store = Self::default();
        store.records.insert(key.to_string(), records);
        store
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, key: &str) -> RecordResult<Vec<Value>> {
        Ok(self.records.get(key).cloned().unwrap_or_default())
    }

    fn save(&mut self, key: &str, records: &[Value]) -> RecordResult<()> {
        self.records.insert(key.to_string(), records.to_vec());
        Ok(())
    }
}
