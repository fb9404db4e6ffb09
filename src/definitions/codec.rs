//! Encodings of a definitions store
//!
//! TOML is the canonical form written by every save. JSON is the legacy
//! form (a plain object of set name to set), kept for importing older
//! stores. Decoding tries TOML first, then [`FALLBACK_DECODERS`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DefinitionsMap;
use crate::rules::FilesSet;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("TOML decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Definitions are not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Duplicate files set name '{0}'")]
    DuplicateName(String),
    #[error("Unsupported definitions format version {0}")]
    UnsupportedVersion(u32),
    #[error("Files set '{name}' is stored under the key '{key}'")]
    KeyMismatch { key: String, name: String },
}

/// Encode/decode a set-name to files set mapping
pub trait DefinitionsCodec: Send + Sync {
    fn name(&self) -> &'static str;
    fn encode(&self, sets: &DefinitionsMap) -> Result<Vec<u8>, CodecError>;
    fn decode(&self, bytes: &[u8]) -> Result<DefinitionsMap, CodecError>;
}

#[derive(Serialize, Deserialize)]
struct DefinitionsDocument {
    format_version: u32,
    #[serde(rename = "set", default)]
    sets: Vec<FilesSet>,
}

fn index_by_name(sets: impl IntoIterator<Item = FilesSet>) -> Result<DefinitionsMap, CodecError> {
    let mut map = DefinitionsMap::new();
    for set in sets {
        let name = set.name().to_string();
        if map.insert(name.clone(), set).is_some() {
            return Err(CodecError::DuplicateName(name));
        }
    }
    Ok(map)
}

/// Sets are encoded by their own name, so every key must agree with it
fn check_keys(sets: &DefinitionsMap) -> Result<(), CodecError> {
    match sets.iter().find(|(key, set)| key.as_str() != set.name()) {
        Some((key, set)) => Err(CodecError::KeyMismatch {
            key: key.clone(),
            name: set.name().to_string(),
        }),
        None => Ok(()),
    }
}

/// Canonical TOML encoding (`[[set]]` tables)
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

impl DefinitionsCodec for TomlCodec {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn encode(&self, sets: &DefinitionsMap) -> Result<Vec<u8>, CodecError> {
        check_keys(sets)?;
        let document = DefinitionsDocument {
            format_version: FORMAT_VERSION,
            sets: sets.values().cloned().collect(),
        };
        Ok(toml::to_string_pretty(&document)?.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<DefinitionsMap, CodecError> {
        let text = std::str::from_utf8(bytes)?;
        if text.trim().is_empty() {
            return Ok(DefinitionsMap::new());
        }
        let document: DefinitionsDocument = toml::from_str(text)?;
        if document.format_version > FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion(document.format_version));
        }
        index_by_name(document.sets)
    }
}

/// Legacy JSON encoding: `{ "<set name>": { ... } }`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl DefinitionsCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, sets: &DefinitionsMap) -> Result<Vec<u8>, CodecError> {
        check_keys(sets)?;
        Ok(serde_json::to_vec_pretty(sets)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<DefinitionsMap, CodecError> {
        let legacy: std::collections::BTreeMap<String, FilesSet> = serde_json::from_slice(bytes)?;
        // The set's own name is authoritative; the object key may be stale
        index_by_name(legacy.into_values())
    }
}

/// Legacy codecs tried after the canonical one, in order
pub const FALLBACK_DECODERS: &[&dyn DefinitionsCodec] = &[&JsonCodec];

/// Decode with the canonical codec, falling back to legacy encodings
///
/// When every codec fails, the canonical codec's error is returned.
pub fn decode_with_fallback(bytes: &[u8]) -> Result<DefinitionsMap, CodecError> {
    let primary_error = match TomlCodec.decode(bytes) {
        Ok(sets) => return Ok(sets),
        Err(err) => err,
    };

    for codec in FALLBACK_DECODERS {
        match codec.decode(bytes) {
            Ok(sets) => {
                log::debug!("Decoded {} files sets with legacy {} codec", sets.len(), codec.name());
                return Ok(sets);
            }
            Err(err) => log::debug!("Legacy {} codec could not decode definitions: {}", codec.name(), err),
        }
    }

    Err(primary_error)
}
