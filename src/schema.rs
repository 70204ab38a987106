use std::path::{Path, PathBuf};

use apache_avro::types::Value;
use apache_avro::Schema;
use serde::Serialize;

const KEY_SCHEMA: &str = include_str!("../schemas/telemetry-key.avsc");
const VALUE_SCHEMA: &str = include_str!("../schemas/telemetry-value.avsc");

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read schema file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse schema: {0}")]
    Parse(#[source] apache_avro::Error),

    #[error("datum does not conform to schema: {0}")]
    Validation(#[source] apache_avro::Error),
}

/// The key/value schema pair every publish call encodes against. Parsed once
/// at startup and shared read-only afterwards.
#[derive(Debug)]
pub struct SchemaPair {
    key: Schema,
    value: Schema,
}

impl SchemaPair {
    /// The schema documents shipped with this crate under `schemas/`.
    pub fn embedded() -> Result<Self, SchemaError> {
        Self::from_strs(KEY_SCHEMA, VALUE_SCHEMA)
    }

    pub fn from_strs(key: &str, value: &str) -> Result<Self, SchemaError> {
        Ok(Self {
            key: Schema::parse_str(key).map_err(SchemaError::Parse)?,
            value: Schema::parse_str(value).map_err(SchemaError::Parse)?,
        })
    }

    pub fn load(key_path: &Path, value_path: &Path) -> Result<Self, SchemaError> {
        Self::from_strs(&read_schema_file(key_path)?, &read_schema_file(value_path)?)
    }

    pub fn encode_key<K: Serialize>(&self, key: &K) -> Result<Vec<u8>, SchemaError> {
        encode_datum(&self.key, key)
    }

    pub fn encode_value<V: Serialize>(&self, value: &V) -> Result<Vec<u8>, SchemaError> {
        encode_datum(&self.value, value)
    }

    pub fn decode_key(&self, data: &[u8]) -> Result<Value, SchemaError> {
        decode_datum(&self.key, data)
    }

    pub fn decode_value(&self, data: &[u8]) -> Result<Value, SchemaError> {
        decode_datum(&self.value, data)
    }
}

fn read_schema_file(path: &Path) -> Result<String, SchemaError> {
    std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Validates `datum` against `schema` and serializes it to raw Avro bytes.
/// A value that does not conform fails here, before anything reaches the
/// broker.
fn encode_datum<T: Serialize>(schema: &Schema, datum: &T) -> Result<Vec<u8>, SchemaError> {
    let value = apache_avro::to_value(datum).map_err(SchemaError::Validation)?;
    let resolved = value.resolve(schema).map_err(SchemaError::Validation)?;
    apache_avro::to_avro_datum(schema, resolved).map_err(SchemaError::Validation)
}

fn decode_datum(schema: &Schema, data: &[u8]) -> Result<Value, SchemaError> {
    let mut reader = data;
    apache_avro::from_avro_datum(schema, &mut reader, None).map_err(SchemaError::Validation)
}
