//! Fingerprint blake3 (hex de 64 caracteres) del JSON canónico de un payload.

use serde_json::Value;

use super::to_canonical_json;

pub fn hash_value(value: &Value) -> String {
    blake3::hash(to_canonical_json(value).as_bytes()).to_hex().to_string()
}
