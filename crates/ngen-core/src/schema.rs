//! Versión de esquema de los registros de entrada.
//!
//! Único punto donde se interpreta el tag de versión: provider, visitors y
//! targets trabajan con `SchemaVersion` ya validado.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::SUPPORTED_SCHEMA_VERSION;
use crate::errors::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemaVersion {
    /// Layout v2.0 de hydrofabric.
    V2,
}

impl SchemaVersion {
    pub fn parse(tag: &str) -> Result<Self> {
        match tag.trim() {
            SUPPORTED_SCHEMA_VERSION => Ok(SchemaVersion::V2),
            other => Err(CoreError::UnsupportedSchemaVersion(format!("{other:?} (only {SUPPORTED_SCHEMA_VERSION:?} is supported)"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::V2 => SUPPORTED_SCHEMA_VERSION,
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_two_point_zero_is_recognized() {
        assert_eq!(SchemaVersion::parse("2.0").unwrap(), SchemaVersion::V2);
        assert_eq!(SchemaVersion::parse(" 2.0 ").unwrap().to_string(), "2.0");
        for bad in ["2", "2.1", "1.0", ""] {
            assert!(matches!(SchemaVersion::parse(bad), Err(CoreError::UnsupportedSchemaVersion(_))), "{bad}");
        }
    }
}
