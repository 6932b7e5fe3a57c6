//! Registry de capabilities.
//!
//! Mapea cada tipo destino registrado a la lista (no vacía) de capabilities
//! que implementa. Los tipos sin capabilities no se almacenan; no es un
//! error registrarlos.

use std::collections::BTreeSet;

use log::debug;

use crate::capability::Capability;
use crate::errors::{CoreError, Result};
use crate::target::{TargetDescriptor, TargetKey, TargetSpec};

#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    // orden de registro; claves únicas
    registered: Vec<TargetDescriptor>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: TargetSpec>(&mut self) -> &mut Self {
        self.register_descriptors([TargetDescriptor::of::<T>()]);
        self
    }

    /// Registra varios candidatos. Un tipo ya registrado reemplaza su entrada.
    pub fn register_descriptors(&mut self, candidates: impl IntoIterator<Item = TargetDescriptor>) {
        for candidate in candidates {
            if candidate.capabilities().is_empty() {
                debug!("registry: {} implements no capability; skipped", candidate.name());
                continue;
            }
            debug!("registry: {} -> {:?}", candidate.name(), candidate.capabilities());
            match self.registered.iter_mut().find(|d| d.key() == candidate.key()) {
                Some(existing) => *existing = candidate,
                None => self.registered.push(candidate),
            }
        }
    }

    pub fn contains<T: TargetSpec>(&self) -> bool {
        self.get(TargetKey::of::<T>()).is_some()
    }

    pub fn get(&self, key: TargetKey) -> Option<&TargetDescriptor> {
        self.registered.iter().find(|d| d.key() == key)
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetDescriptor> {
        self.registered.iter()
    }

    /// Tipos registrados que implementan `capability`, en orden de registro.
    pub fn types_with_capability(&self, capability: Capability) -> Vec<&TargetDescriptor> {
        self.registered.iter().filter(|d| d.implements(capability)).collect()
    }

    /// Unión de las capabilities de todos los tipos registrados.
    pub fn requirements(&self) -> BTreeSet<Capability> {
        self.registered.iter().flat_map(|d| d.capabilities()).collect()
    }

    pub fn capabilities_of<T: TargetSpec>(&self) -> Result<Vec<Capability>> {
        self.get(TargetKey::of::<T>())
            .map(|d| d.capabilities())
            .ok_or_else(|| CoreError::NoRegisteredCapability(T::NAME.to_string()))
    }

    pub fn capabilities_of_name(&self, name: &str) -> Result<Vec<Capability>> {
        self.registered
            .iter()
            .find(|d| d.name() == name)
            .map(|d| d.capabilities())
            .ok_or_else(|| CoreError::NoRegisteredCapability(name.to_string()))
    }
}
