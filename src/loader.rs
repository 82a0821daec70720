//! Document loading from files and text.
//!
//! OpenAPI documents arrive as JSON or YAML; both load into an
//! order-preserving `serde_json::Value` tree, since declaration order in the
//! document decides declaration order in the output.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;

/// Load a document from a file path.
///
/// The format is picked by extension (`.yaml`/`.yml`/`.json`); anything else
/// is sniffed, with JSON tried for brace-led content.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// `LoadError::ReadError` if it can't be read, or the parse error of the
/// detected format.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => load_document_yaml_str(&content),
        Some("json") => load_document_str(&content),
        _ => {
            if content.trim_start().starts_with(['{', '[']) {
                load_document_str(&content)
            } else {
                load_document_yaml_str(&content)
            }
        }
    }
}

/// Load a document from a JSON string.
pub fn load_document_str(content: &str) -> Result<Value, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}

/// Load a document from a YAML string.
///
/// Mappings convert to order-preserving JSON objects; scalar keys that are
/// not strings (YAML's unquoted `200:` status codes) are stringified.
pub fn load_document_yaml_str(content: &str) -> Result<Value, LoadError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|source| LoadError::InvalidYaml { source })?;
    yaml_to_json(yaml)
}

fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, LoadError> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                // NaN and infinities have no JSON form.
                match n.as_f64().and_then(serde_json::Number::from_f64) {
                    Some(f) => Value::Number(f),
                    None => Value::Null,
                }
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(
            seq.into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = serde_json::Map::new();
            for (key, value) in mapping {
                map.insert(scalar_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn scalar_key(key: serde_yaml::Value) -> Result<String, LoadError> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        other => Err(LoadError::UnsupportedKey {
            key: format!("{:?}", other),
        }),
    }
}
