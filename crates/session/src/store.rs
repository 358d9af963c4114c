use anyhow::{anyhow, Context, Result};
use log::debug;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key of the original (left) input
pub const ORIGINAL_KEY: &str = "text-compare-original";

/// Key of the modified (right) input
pub const MODIFIED_KEY: &str = "text-compare-modified";

/// A durable string key-value store for the comparison inputs
pub trait InputStore {
    /// Read the value stored under `key`
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn store(&mut self, key: &str, value: &str) -> Result<()>;
}

/// An in-memory store, mostly useful for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store kept as a single JSON object on disk.
///
/// A missing file is an empty store. Every write replaces the file through a
/// temporary sibling and a rename.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`, reading it if it exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input store at {}", path.display()))?;
            match serde_json::from_str::<Value>(&contents)
                .with_context(|| format!("Failed to parse input store at {}", path.display()))?
            {
                Value::Object(values) => values,
                other => {
                    return Err(anyhow!(
                        "Input store at {} is not a JSON object but {}",
                        path.display(),
                        json_kind(&other)
                    ))
                }
            }
        } else {
            debug!("No input store at {}, starting empty", path.display());
            Map::new()
        };

        Ok(Self { path, values })
    }

    /// Get the path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.values)?;
        let tmp_path = self.path.with_extension("json.tmp");

        fs::write(&tmp_path, contents)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace input store at {}", self.path.display()))?;

        Ok(())
    }
}

impl InputStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(anyhow!(
                "Value for {} in {} is {} instead of a string",
                key,
                self.path.display(),
                json_kind(other)
            )),
        }
    }

    fn store(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
        self.flush()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The two comparison inputs as persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredInputs {
    pub original: String,
    pub modified: String,
}

impl StoredInputs {
    /// Read both inputs; missing keys read as empty text
    pub fn load<S: InputStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(Self {
            original: store.load(ORIGINAL_KEY)?.unwrap_or_default(),
            modified: store.load(MODIFIED_KEY)?.unwrap_or_default(),
        })
    }

    /// Write both inputs
    pub fn save<S: InputStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.store(ORIGINAL_KEY, &self.original)?;
        store.store(MODIFIED_KEY, &self.modified)
    }
}
