//! ngen-core: builder incremental de configuraciones guiado por capabilities.
//!
//! Flujo: `PairedProvider` -> visitors (`Accumulator` / `TargetVisitor`) ->
//! `Orchestrator` -> `FileWriter`. Los tipos destino declaran capabilities
//! (`TargetSpec::declare`), el `CapabilityRegistry` las indexa y la
//! `factory` compone los `Fulfillment`s en un constructor diferido.
pub mod capability;
pub mod constants;
pub mod errors;
pub mod factory;
pub mod fulfillment;
pub mod hashing;
pub mod model;
pub mod named;
pub mod orchestrator;
pub mod provider;
pub mod registry;
pub mod schema;
pub mod serializer;
pub mod target;
pub mod visitor;
pub mod writer;

pub use capability::{Capability, ForcingMetadataHook, HydrofabricCatchmentHook, HydrofabricDataHook,
                     HydrofabricLinkedDataHook, LinkData, Payload, PayloadShape, RealizationHook};
pub use errors::{CoreError, Result};
pub use factory::{build, build_artifact, Deferred};
pub use fulfillment::Fulfillment;
pub use model::{Artifact, FieldSet, Record, UnitId, UnitRecord};
pub use named::{variant_from_name, NamedVariant};
pub use orchestrator::{generate_configs, GenerateReport, Orchestrator};
pub use provider::{HookProvider, PairedProvider, ProviderOptions};
pub use registry::CapabilityRegistry;
pub use schema::SchemaVersion;
pub use serializer::OutputShape;
pub use target::{Conformance, TargetDescriptor, TargetKey, TargetSpec};
pub use visitor::{Accumulator, Builder, BuilderVisitable, TargetVisitor, UnitIdVisitor, Visitable, VisitorFactory};
pub use writer::{DefaultFileWriter, FileWriter, OutputCollision, WriteOutcome};
