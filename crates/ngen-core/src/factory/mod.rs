//! Builder factory: compone fulfillments en un constructor diferido.
//!
//! `build::<T>` verifica primero que `T` implemente todas las capabilities de
//! los fulfillments (atómico: si alguna falta no se ejecuta ningún handler),
//! luego aplica los handlers en el orden recibido y acumula sus campos en un
//! único registro pendiente. `Deferred::construct` es el único camino hacia
//! el `T` inmutable y pasa por su constructor validado.

pub mod merge;

use std::marker::PhantomData;

use log::debug;
use serde_json::Value;

use crate::errors::{CoreError, Result};
use crate::fulfillment::Fulfillment;
use crate::model::{Artifact, FieldSet};
use crate::target::{TargetDescriptor, TargetSpec};

pub use merge::{fill_absent, merge_fields};

/// Construcción pendiente de un `T`: campos acumulados sin validar.
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred<T> {
    pending: FieldSet,
    _target: PhantomData<fn() -> T>,
}

impl<T: TargetSpec> Deferred<T> {
    fn new(pending: FieldSet) -> Self {
        Self { pending,
               _target: PhantomData }
    }

    pub fn pending(&self) -> &FieldSet {
        &self.pending
    }

    /// Fija (o reemplaza) un campo explícitamente.
    pub fn with_field(mut self, field: impl Into<String>, value: Value) -> Self {
        self.pending.insert(field.into(), value);
        self
    }

    /// Fija (o reemplaza) varios campos explícitamente.
    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.pending.extend(fields);
        self
    }

    /// Completa sólo los campos que ningún fulfillment aportó.
    pub fn with_defaults(mut self, defaults: FieldSet) -> Self {
        fill_absent(&mut self.pending, defaults);
        self
    }

    /// Construcción validada; consume el valor diferido.
    pub fn construct(self) -> Result<T> {
        T::from_fields(self.pending)
    }
}

pub fn build<T: TargetSpec>(fulfillments: &[Fulfillment]) -> Result<Deferred<T>> {
    let descriptor = TargetDescriptor::of::<T>();
    let pending = fold(&descriptor, fulfillments)?;
    Ok(Deferred::new(pending))
}

/// `build` + `construct` + `into_artifact`.
pub fn build_artifact<T: TargetSpec>(fulfillments: &[Fulfillment]) -> Result<Artifact> {
    build::<T>(fulfillments)?.construct()?.into_artifact()
}

fn fold(descriptor: &TargetDescriptor, fulfillments: &[Fulfillment]) -> Result<FieldSet> {
    if fulfillments.is_empty() {
        return Err(CoreError::NoFulfillments(descriptor.name().to_string()));
    }

    // resolver todos los handlers antes de ejecutar ninguno
    let mut handlers = Vec::with_capacity(fulfillments.len());
    for f in fulfillments {
        let handler = descriptor.handler(f.capability())
                                .ok_or_else(|| CoreError::CapabilityMismatch { target: descriptor.name().to_string(),
                                                                               capability: f.capability() })?;
        handlers.push((handler, f));
    }

    let mut pending = FieldSet::new();
    for (handler, f) in handlers {
        let update = handler(f.payload())?;
        debug!("factory: {} <- {} ({} fields)", descriptor.name(), f.capability(), update.len());
        merge_fields(descriptor.name(), &mut pending, update)?;
    }
    Ok(pending)
}
