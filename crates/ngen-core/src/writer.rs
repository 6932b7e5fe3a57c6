//! Escritura de artifacts a archivos.
//!
//! La ruta es `<root>/<TypeName>_<unit>.<ext>`. Si ya existe, se escribe en
//! el primer nombre libre `<TypeName>_<unit>_NN.<ext>` (NN desde 01) y se
//! emite un warning: nunca se sobreescribe un archivo existente. Un id de
//! unidad con separadores de ruta es `Validation`.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::errors::{CoreError, Result};
use crate::model::{Artifact, UnitId};
use crate::serializer::render;

/// Warning recuperable: el destino pedido estaba ocupado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCollision {
    pub requested: PathBuf,
    pub written: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub unit: UnitId,
    pub type_name: String,
    pub path: PathBuf,
    pub artifact_hash: String,
    pub collision: Option<OutputCollision>,
}

pub trait FileWriter {
    fn write(&mut self, unit: &UnitId, artifact: &Artifact) -> Result<WriteOutcome>;
}

#[derive(Debug, Clone)]
pub struct DefaultFileWriter {
    root: PathBuf,
}

impl DefaultFileWriter {
    /// Crea `root` si no existe. Un archivo en esa ruta es un error.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root)?;
        } else if !root.is_dir() {
            return Err(CoreError::OutputRootNotDirectory(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileWriter for DefaultFileWriter {
    fn write(&mut self, unit: &UnitId, artifact: &Artifact) -> Result<WriteOutcome> {
        check_unit_component(unit, artifact.type_name())?;
        let shape = artifact.shape()
                            .ok_or_else(|| CoreError::UnsupportedOutputShape(artifact.type_name().to_string()))?;
        let body = render(shape, artifact.type_name(), artifact.payload())?;

        let requested = self.root.join(format!("{}_{}.{}", artifact.type_name(), unit, shape.extension()));
        let (path, collision) = if requested.exists() {
            let alt = next_free_name(&requested);
            warn!("{:?} already exists; writing to {:?} instead", requested, alt);
            (alt.clone(), Some(OutputCollision { requested, written: alt }))
        } else {
            (requested, None)
        };

        fs::write(&path, body)?;
        debug!("writer: {} {} -> {:?}", artifact.type_name(), unit, path);
        Ok(WriteOutcome { unit: unit.clone(),
                          type_name: artifact.type_name().to_string(),
                          path,
                          artifact_hash: artifact.hash().to_string(),
                          collision })
    }
}

/// El id de unidad va dentro del nombre de archivo: nada de separadores ni
/// componentes relativos.
fn check_unit_component(unit: &UnitId, type_name: &str) -> Result<()> {
    let id = unit.as_str();
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']) {
        return Err(CoreError::validation(type_name, format!("unit id {id:?} is not usable in a file name")));
    }
    Ok(())
}

/// Primer `<stem>_NN<ext>` que no existe, con NN desde 01.
pub fn next_free_name(path: &Path) -> PathBuf {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let ext = path.extension().map(|e| format!(".{}", e.to_string_lossy())).unwrap_or_default();
    let mut i = 1u32;
    loop {
        let candidate = path.with_file_name(format!("{stem}_{i:02}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        i += 1;
    }
}
