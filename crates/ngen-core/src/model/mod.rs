//! Modelos neutrales (Artifact, registros, field sets, unidades).

pub mod artifact;
pub mod record;

pub use artifact::Artifact;
pub use record::{FieldSet, Record, UnitId, UnitRecord};
