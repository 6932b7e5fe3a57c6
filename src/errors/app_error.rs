use std::path::PathBuf;

use ngen_core::CoreError;
use thiserror::Error;

/// Errores de la aplicación (CLI + carga de fuentes).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("uso inválido: {0}")]
    Usage(String),
    #[error("no se pudo leer {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("{source_name} fila {row}: {reason}")]
    Input { source_name: String, row: usize, reason: String },
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AppError {
    /// Código de salida del proceso: 2 uso, 3 entrada, 5 generación.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Usage(_) => 2,
            AppError::Read { .. } | AppError::Input { .. } => 3,
            AppError::Core(_) => 5,
        }
    }
}
