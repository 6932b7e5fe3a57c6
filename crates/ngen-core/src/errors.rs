//! Errores del core.
//!
//! Todos los errores son fatales para el batch en curso; la única condición
//! recuperable (colisión de nombre de salida) no es un error sino un
//! `OutputCollision` que el writer reporta y registra con `warn!`.

use std::path::PathBuf;

use thiserror::Error;

use crate::capability::{Capability, PayloadShape};

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Un fulfillment (o un pedido al provider) usa una capability que el
    /// tipo destino no implementa. Nunca queda construcción parcial.
    #[error("{target} does not implement capability {capability}")]
    CapabilityMismatch { target: String, capability: Capability },

    #[error("unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    #[error("data alignment: {0}")]
    DataAlignment(String),

    #[error("no data: {0}")]
    NoData(String),

    #[error("no registered capability for {0}")]
    NoRegisteredCapability(String),

    #[error("unsupported output shape for {0}")]
    UnsupportedOutputShape(String),

    #[error("payload for {capability} must be {expected}, got {found}")]
    ShapeMismatch { capability: Capability, expected: PayloadShape, found: String },

    #[error("one or more fulfillments required to build {0}")]
    NoFulfillments(String),

    #[error("field {field:?} of {target} contributed twice with different values")]
    FieldConflict { target: String, field: String },

    #[error("validation failed for {target}: {reason}")]
    Validation { target: String, reason: String },

    #[error("{name:?} is not a member of {kind}")]
    NotAMember { kind: &'static str, name: String },

    #[error("artifact decode: {0}")]
    ArtifactDecode(String),

    #[error("expected dir got file: {}", .0.display())]
    OutputRootNotDirectory(PathBuf),

    #[error("serialize {target}: {reason}")]
    Serialize { target: String, reason: String },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn validation(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation { target: target.into(), reason: reason.into() }
    }

    pub(crate) fn serialize(target: impl Into<String>, reason: impl ToString) -> Self {
        Self::Serialize { target: target.into(), reason: reason.to_string() }
    }
}
