//! Orquestación del loop por unidad.
//!
//! Para cada unidad de cada provider: el visitor identidad fija el id, luego
//! cada factory pedida crea un visitor nuevo que visita y construye su
//! artifact. Sólo cuando todos los artifacts de la unidad están construidos
//! se entregan al writer, así una unidad fallida no deja archivos. Una unidad
//! termina completa antes de empezar la siguiente. El primer error aborta el
//! batch; no hay catch-and-continue.

use chrono::{DateTime, Utc};
use log::{debug, info};
use uuid::Uuid;

use crate::constants::CORE_VERSION;
use crate::errors::{CoreError, Result};
use crate::model::UnitId;
use crate::provider::HookProvider;
use crate::registry::CapabilityRegistry;
use crate::target::TargetSpec;
use crate::visitor::{BuilderVisitable, TargetVisitor, UnitIdVisitor, Visitable, VisitorFactory};
use crate::writer::{FileWriter, WriteOutcome};

/// Resumen de un batch.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub batch_id: Uuid,
    pub core_version: &'static str,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub units: usize,
    pub written: Vec<WriteOutcome>,
}

impl GenerateReport {
    fn start() -> Self {
        let report = Self { batch_id: Uuid::new_v4(),
                            core_version: CORE_VERSION,
                            started_at: Utc::now(),
                            finished_at: None,
                            units: 0,
                            written: Vec::new() };
        info!("batch {} started (core {})", report.batch_id, CORE_VERSION);
        report
    }

    fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
        info!("batch {} finished: {} units, {} files, {} collisions",
              self.batch_id,
              self.units,
              self.written.len(),
              self.collisions());
    }

    pub fn collisions(&self) -> usize {
        self.written.iter().filter(|w| w.collision.is_some()).count()
    }
}

/// Loop por unidad sin registry ni artifacts globales.
pub fn generate_configs<I, P>(providers: I, factories: &[VisitorFactory], writer: &mut dyn FileWriter) -> Result<GenerateReport>
    where I: IntoIterator<Item = P>,
          P: HookProvider
{
    let mut report = GenerateReport::start();
    for mut provider in providers {
        drive(&mut provider, factories, &mut [], writer, &mut report)?;
    }
    report.finish();
    Ok(report)
}

/// Orquestador con verificación contra el registry y artifacts globales.
pub struct Orchestrator<'r> {
    registry: &'r CapabilityRegistry,
    factories: Vec<VisitorFactory>,
    globals: Vec<VisitorFactory>,
}

impl<'r> Orchestrator<'r> {
    pub fn new(registry: &'r CapabilityRegistry) -> Self {
        Self { registry,
               factories: Vec::new(),
               globals: Vec::new() }
    }

    /// Agrega un `TargetVisitor<T>` por unidad. `T` debe estar registrado.
    pub fn target<T: TargetSpec>(&mut self) -> Result<&mut Self> {
        self.registry.capabilities_of::<T>()?;
        self.factories.push(TargetVisitor::<T>::factory());
        Ok(self)
    }

    /// Agrega un visitor por unidad arbitrario.
    pub fn visitor(&mut self, factory: VisitorFactory) -> &mut Self {
        self.factories.push(factory);
        self
    }

    /// Agrega un visitor global: visita todas las unidades y se construye una
    /// sola vez al final, escrito como `global`.
    pub fn global(&mut self, factory: VisitorFactory) -> &mut Self {
        self.globals.push(factory);
        self
    }

    pub fn generate<I, P>(&self, providers: I, writer: &mut dyn FileWriter) -> Result<GenerateReport>
        where I: IntoIterator<Item = P>,
              P: HookProvider
    {
        let mut report = GenerateReport::start();
        let mut globals: Vec<Box<dyn BuilderVisitable>> = self.globals.iter().map(|f| f()).collect();
        for mut provider in providers {
            drive(&mut provider, &self.factories, &mut globals, writer, &mut report)?;
        }
        for global in globals {
            let artifact = global.build()?;
            report.written.push(writer.write(&UnitId::Global, &artifact)?);
        }
        report.finish();
        Ok(report)
    }
}

fn drive(provider: &mut dyn HookProvider,
         factories: &[VisitorFactory],
         globals: &mut [Box<dyn BuilderVisitable>],
         writer: &mut dyn FileWriter,
         report: &mut GenerateReport)
         -> Result<()> {
    while provider.advance()? {
        let mut identity = UnitIdVisitor::new();
        identity.visit(&*provider)?;
        let unit = identity.unit_id()
                           .map(UnitId::from)
                           .ok_or_else(|| CoreError::NoData("identity visitor produced no unit id".into()))?;
        debug!("orchestrator: unit {unit}");

        // todos los artifacts de la unidad se construyen antes de escribir
        let mut artifacts = Vec::with_capacity(factories.len());
        for factory in factories {
            let mut visitor = factory();
            visitor.visit(&*provider)?;
            artifacts.push(visitor.build()?);
        }
        for artifact in &artifacts {
            report.written.push(writer.write(&unit, artifact)?);
        }
        for global in globals.iter_mut() {
            global.visit(&*provider)?;
        }
        report.units += 1;
    }
    Ok(())
}
