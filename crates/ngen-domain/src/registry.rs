use log::debug;
use ngen_core::{CapabilityRegistry, CoreError, Orchestrator, Result, TargetSpec};

use crate::Pet;

/// Registry con todos los tipos destino incluidos en este crate.
pub fn builtin_registry() -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new();
    registry.register::<Pet>();
    debug!("builtin registry: {} targets", registry.len());
    registry
}

pub fn builtin_target_names() -> Vec<&'static str> {
    vec![Pet::NAME]
}

/// Agrega al orquestador el target incluido llamado `name` (sin distinguir
/// mayúsculas).
pub fn add_builtin_target(orchestrator: &mut Orchestrator<'_>, name: &str) -> Result<()> {
    let name = name.trim();
    if name.eq_ignore_ascii_case(Pet::NAME) {
        orchestrator.target::<Pet>()?;
        return Ok(());
    }
    Err(CoreError::NoRegisteredCapability(name.to_string()))
}
