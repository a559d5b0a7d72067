//! Schema loader: reads schema documents from a directory at startup
//!
//! - One JSON document per file, `*.json` only
//! - Files are read in path order so loading is deterministic
//! - Schema names are unique; a second registration is rejected
//! - An unreadable or malformed file stops the load (FATAL)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::errors::{SchemaError, SchemaResult};
use super::types::SchemaDocument;
use crate::model::{Instance, Schema};
use crate::rule::Kind;
use crate::value::Value;

/// A registered schema: its source document and the built schema.
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    document: SchemaDocument,
    schema: Arc<Schema>,
}

impl LoadedSchema {
    /// Builds the schema described by `document`.
    pub fn from_document(document: SchemaDocument) -> SchemaResult<Self> {
        let schema = Arc::new(document.to_schema()?);
        Ok(Self { document, schema })
    }

    pub fn name(&self) -> &str {
        &self.document.name
    }

    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Converts a JSON object into an instance of this schema.
    ///
    /// Undeclared keys are ignored. Strings bound for date fields are parsed
    /// as ISO-8601; a string that does not parse is kept as a string so the
    /// date field reports it as a type mismatch. Arrays and objects become
    /// `Value::Unsupported`, which every kind rule rejects.
    pub fn instance_from_json(&self, json: &JsonValue) -> SchemaResult<Instance> {
        let obj = json.as_object().ok_or_else(|| {
            SchemaError::instance_malformed(self.name(), None, "expected a JSON object")
        })?;

        let mut values = Vec::with_capacity(obj.len());
        for (key, raw) in obj {
            let Some(kind) = self.document.kind_of(key) else {
                continue;
            };
            let value = match (kind, raw) {
                (Kind::Date, JsonValue::String(s)) => {
                    Value::parse_temporal(s).unwrap_or_else(|_| Value::Str(s.clone()))
                }
                (_, JsonValue::Array(_)) => Value::Unsupported("array"),
                (_, JsonValue::Object(_)) => Value::Unsupported("object"),
                _ => Value::try_from(raw).map_err(|e| {
                    SchemaError::instance_malformed(self.name(), Some(key.clone()), e.to_string())
                })?,
            };
            values.push((key.clone(), value));
        }

        Ok(Instance::new(self.schema.clone(), values))
    }
}

/// Schema loader that reads schema files from disk and keeps them by name.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
    /// Loaded schemas indexed by name
    schemas: BTreeMap<String, LoadedSchema>,
}

impl SchemaLoader {
    /// Creates a loader for `schema_dir`. Nothing is read until `load_all`.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: BTreeMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every `*.json` file in the schema directory.
    ///
    /// A missing directory loads nothing.
    pub fn load_all(&mut self) -> SchemaResult<usize> {
        if !self.schema_dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::malformed(
                self.schema_dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed(
                    self.schema_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            self.load_schema_file(path)?;
        }
        Ok(paths.len())
    }

    /// Loads a single schema file.
    pub fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let document: SchemaDocument = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        self.register(document)
    }

    /// Registers a schema document directly.
    pub fn register(&mut self, document: SchemaDocument) -> SchemaResult<()> {
        if self.schemas.contains_key(&document.name) {
            return Err(SchemaError::duplicate(&document.name));
        }
        let loaded = LoadedSchema::from_document(document)?;
        self.schemas.insert(loaded.name().to_string(), loaded);
        Ok(())
    }

    /// Gets a schema by name.
    pub fn get(&self, name: &str) -> Option<&LoadedSchema> {
        self.schemas.get(name)
    }

    /// Gets a schema by name, failing with `FG_SCHEMA_UNKNOWN`.
    pub fn require(&self, name: &str) -> SchemaResult<&LoadedSchema> {
        self.get(name).ok_or_else(|| SchemaError::unknown(name))
    }

    /// Returns all loaded schemas, sorted by name.
    pub fn all_schemas(&self) -> impl Iterator<Item = &LoadedSchema> {
        self.schemas.values()
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Writes a schema document to `<schema_dir>/<name>.json`.
    ///
    /// Existing files are never overwritten.
    pub fn save_schema(&self, document: &SchemaDocument) -> SchemaResult<PathBuf> {
        let path = self.schema_dir.join(format!("{}.json", document.name));
        if path.exists() {
            return Err(SchemaError::duplicate(&document.name));
        }

        fs::create_dir_all(&self.schema_dir).map_err(|e| {
            SchemaError::malformed(
                self.schema_dir.display().to_string(),
                format!("Failed to create schema directory: {}", e),
            )
        })?;

        let content = serde_json::to_string_pretty(document).map_err(|e| {
            SchemaError::malformed(
                path.display().to_string(),
                format!("Failed to serialize schema: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            SchemaError::malformed(
                path.display().to_string(),
                format!("Failed to write file: {}", e),
            )
        })?;

        Ok(path)
    }
}
