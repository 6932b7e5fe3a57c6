//! Visitors y acumuladores por unidad.
//!
//! Un visitor se crea nuevo para cada (unidad, tipo destino), tira de los
//! payloads del provider, y se consume al construir su artifact. Nada de su
//! estado sobrevive a la unidad.

use std::fmt;

use log::debug;
use serde_json::Value;

use crate::capability::Capability;
use crate::errors::{CoreError, Result};
use crate::factory;
use crate::fulfillment::Fulfillment;
use crate::model::{Artifact, FieldSet};
use crate::provider::HookProvider;
use crate::schema::SchemaVersion;
use crate::target::{TargetDescriptor, TargetSpec};

pub trait Visitable {
    fn visit(&mut self, provider: &dyn HookProvider) -> Result<()>;
}

pub trait Builder {
    /// Produce el artifact final; consume el builder.
    fn build(self: Box<Self>) -> Result<Artifact>;
}

pub trait BuilderVisitable: Visitable + Builder {}

impl<V: Visitable + Builder> BuilderVisitable for V {}

/// Crea un visitor nuevo por unidad.
pub type VisitorFactory = Box<dyn Fn() -> Box<dyn BuilderVisitable>>;

/// Acumulador mutable de un `T` para una unidad.
pub struct Accumulator<T> {
    descriptor: TargetDescriptor,
    version_tag: Option<String>,
    version: Option<SchemaVersion>,
    fulfillments: Vec<Fulfillment>,
    overrides: FieldSet,
    _target: std::marker::PhantomData<fn() -> T>,
}

impl<T: TargetSpec> Accumulator<T> {
    pub fn new() -> Self {
        Self { descriptor: TargetDescriptor::of::<T>(),
               version_tag: None,
               version: None,
               fulfillments: Vec::new(),
               overrides: FieldSet::new(),
               _target: std::marker::PhantomData }
    }

    pub fn version(&self) -> Option<SchemaVersion> {
        self.version
    }

    /// Registra el tag de versión de un payload. El primero queda fijado;
    /// uno distinto después es `UnsupportedSchemaVersion`.
    pub fn record_version(&mut self, tag: &str) -> Result<SchemaVersion> {
        let tag = tag.trim();
        if let Some(current) = &self.version_tag {
            if current != tag {
                return Err(CoreError::UnsupportedSchemaVersion(format!("mismatched versions. current={current:?} new={tag:?}")));
            }
        }
        let version = SchemaVersion::parse(tag)?;
        self.version_tag = Some(tag.to_string());
        self.version = Some(version);
        Ok(version)
    }

    /// Toma del provider el payload de `capability` para la unidad actual.
    pub fn pull(&mut self, provider: &dyn HookProvider, capability: Capability) -> Result<()> {
        if !self.descriptor.implements(capability) {
            return Err(CoreError::CapabilityMismatch { target: T::NAME.to_string(),
                                                       capability });
        }
        let record = provider.provide(capability)?;
        self.record_version(&record.version)?;
        debug!("visitor: {} pulled {} for {}", T::NAME, capability, record.unit_id);
        self.fulfillments.push(Fulfillment::create(capability, record)?);
        Ok(())
    }

    /// Agrega un fulfillment que no proviene del provider.
    pub fn push(&mut self, fulfillment: Fulfillment) -> Result<()> {
        if !self.descriptor.implements(fulfillment.capability()) {
            return Err(CoreError::CapabilityMismatch { target: T::NAME.to_string(),
                                                       capability: fulfillment.capability() });
        }
        self.fulfillments.push(fulfillment);
        Ok(())
    }

    /// Fija un campo explícito; tiene precedencia sobre handlers y defaults.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.overrides.insert(field.into(), value);
    }

    /// Construye el `T`. Sin payloads o sin versión registrada es `NoData`;
    /// los defaults de la versión sólo completan campos ausentes.
    pub fn finalize(self) -> Result<T> {
        if self.fulfillments.is_empty() {
            return Err(CoreError::NoData(format!("{} finalized before any payload was pulled", T::NAME)));
        }
        let version = self.version.ok_or_else(|| {
                                      CoreError::NoData(format!("{} finalized before any schema version was recorded",
                                                                T::NAME))
                                  })?;
        let defaults = T::baseline_defaults(version);
        factory::build::<T>(&self.fulfillments)?.with_fields(self.overrides)
                                                 .with_defaults(defaults)
                                                 .construct()
    }
}

impl<T: TargetSpec> Default for Accumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Accumulator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accumulator")
         .field("target", &self.descriptor.name())
         .field("version", &self.version)
         .field("fulfillments", &self.fulfillments.len())
         .finish()
    }
}

/// Visitor genérico: tira de cada capability del provider que `T` declara.
#[derive(Debug)]
pub struct TargetVisitor<T> {
    acc: Accumulator<T>,
}

impl<T: TargetSpec> TargetVisitor<T> {
    pub fn new() -> Self {
        Self { acc: Accumulator::new() }
    }

    pub fn accumulator(&mut self) -> &mut Accumulator<T> {
        &mut self.acc
    }

    pub fn factory() -> VisitorFactory {
        Box::new(|| Box::new(TargetVisitor::<T>::new()) as Box<dyn BuilderVisitable>)
    }
}

impl<T: TargetSpec> Default for TargetVisitor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TargetSpec> Visitable for TargetVisitor<T> {
    fn visit(&mut self, provider: &dyn HookProvider) -> Result<()> {
        let wanted: Vec<Capability> = self.acc
                                          .descriptor
                                          .capabilities()
                                          .into_iter()
                                          .filter(|c| provider.provided().contains(c))
                                          .collect();
        for capability in wanted {
            self.acc.pull(provider, capability)?;
        }
        Ok(())
    }
}

impl<T: TargetSpec> Builder for TargetVisitor<T> {
    fn build(self: Box<Self>) -> Result<Artifact> {
        self.acc.finalize()?.into_artifact()
    }
}

/// Visitor identidad: fija el id de la unidad actual antes que el resto.
#[derive(Debug, Default)]
pub struct UnitIdVisitor {
    unit_id: Option<String>,
}

impl UnitIdVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit_id(&self) -> Option<&str> {
        self.unit_id.as_deref()
    }
}

impl Visitable for UnitIdVisitor {
    fn visit(&mut self, provider: &dyn HookProvider) -> Result<()> {
        let record = provider.provide(Capability::HydrofabricData)?;
        SchemaVersion::parse(&record.version)?;
        self.unit_id = Some(record.unit_id);
        Ok(())
    }
}
