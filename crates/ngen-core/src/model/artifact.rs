//! Artifact neutral producido al finalizar un target.
//!
//! Un `Artifact` es inmutable: sólo se crea a partir de un target ya validado
//! (`TargetSpec::into_artifact`) y expone sus partes en modo lectura.
//! - `payload` es el JSON del target, en el orden de sus campos.
//! - `hash` es blake3 del JSON canónico del payload; identifica el contenido
//!   y permite verificar que un artifact previo no fue alterado.
//! - `shape` es la capability de serialización declarada por el tipo.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hashing::hash_value;
use crate::serializer::OutputShape;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    type_name: String,
    shape: Option<OutputShape>,
    payload: Value,
    hash: String,
}

impl Artifact {
    pub(crate) fn new(type_name: &str, shape: Option<OutputShape>, payload: Value) -> Self {
        let hash = hash_value(&payload);
        Self { type_name: type_name.to_string(),
               shape,
               payload,
               hash }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn shape(&self) -> Option<OutputShape> {
        self.shape
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// `true` si el hash corresponde al payload actual.
    pub fn verify_hash(&self) -> bool {
        hash_value(&self.payload) == self.hash
    }
}
