use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::GLOBAL_UNIT_ID;

/// Fila de una fuente tabular: nombre de campo -> valor escalar.
pub type Record = IndexMap<String, Value>;

/// Campos aportados por un handler o acumulados para construir un target.
pub type FieldSet = IndexMap<String, Value>;

/// Fila del provider para una unidad, con su tag de versión sin interpretar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub version: String,
    pub unit_id: String,
    pub row: Record,
}

/// Destino lógico de un artifact escrito.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitId {
    Catchment(String),
    Global,
}

impl UnitId {
    pub fn as_str(&self) -> &str {
        match self {
            UnitId::Catchment(id) => id,
            UnitId::Global => GLOBAL_UNIT_ID,
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for UnitId {
    fn from(id: &str) -> Self {
        UnitId::Catchment(id.to_string())
    }
}
