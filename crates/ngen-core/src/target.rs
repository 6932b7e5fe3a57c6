//! Tipos destino y declaración de capabilities.
//!
//! Un tipo destino produce un único tipo de artifact inmutable y validado.
//! Declara sus capabilities en `TargetSpec::declare`; cada método de
//! `Conformance` exige en sus bounds el trait de la capability, de modo que
//! una declaración sólo compila si la interfaz está realmente implementada.
//!
//! ```ignore
//! impl TargetSpec for Pet {
//!     const NAME: &'static str = "PET";
//!     fn declare(c: &mut Conformance<Self>) {
//!         c.hydrofabric_linked_data().hydrofabric_catchment();
//!     }
//! }
//! ```

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::capability::{json_kind, Capability, ForcingMetadataHook, HydrofabricCatchmentHook, HydrofabricDataHook,
                        HydrofabricLinkedDataHook, Payload, RealizationHook};
use crate::errors::{CoreError, Result};
use crate::model::{Artifact, FieldSet};
use crate::schema::SchemaVersion;
use crate::serializer::OutputShape;

/// Handler type-erased de una capability: payload -> campos aportados.
pub(crate) type Handler = fn(&Payload) -> Result<FieldSet>;

/// Especificación de un tipo destino.
pub trait TargetSpec: Sized + Serialize + DeserializeOwned + Clone + PartialEq + fmt::Debug + 'static {
    /// Nombre del tipo; prefijo de los archivos de salida.
    const NAME: &'static str;

    /// Capability de serialización. `None` = el artifact no es escribible.
    fn output_shape() -> Option<OutputShape> {
        Some(OutputShape::GenericDocument)
    }

    /// Declara las capabilities que el tipo implementa. Por defecto ninguna.
    fn declare(_conformance: &mut Conformance<Self>) {}

    /// Valores base para campos que ningún payload aporta.
    fn baseline_defaults(_version: SchemaVersion) -> FieldSet {
        FieldSet::new()
    }

    /// Validación semántica ligera, posterior a la deserialización.
    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }

    /// Constructor validado: campos faltantes o inválidos son `Validation`.
    fn from_fields(fields: FieldSet) -> Result<Self> {
        let object: serde_json::Map<String, Value> = fields.into_iter().collect();
        let built: Self =
            serde_json::from_value(Value::Object(object)).map_err(|e| CoreError::validation(Self::NAME, e.to_string()))?;
        built.validate().map_err(|reason| CoreError::validation(Self::NAME, reason))?;
        Ok(built)
    }

    /// Empaqueta el target en un artifact neutro (con hash).
    fn into_artifact(&self) -> Result<Artifact> {
        let payload = serde_json::to_value(self).map_err(|e| CoreError::serialize(Self::NAME, e))?;
        Ok(Artifact::new(Self::NAME, Self::output_shape(), payload))
    }

    /// Decodifica desde un artifact verificando tipo, hash y validación.
    fn from_artifact(artifact: &Artifact) -> Result<Self> {
        if artifact.type_name() != Self::NAME {
            return Err(CoreError::ArtifactDecode(format!("expected {} artifact, found {}",
                                                         Self::NAME,
                                                         artifact.type_name())));
        }
        if !artifact.verify_hash() {
            return Err(CoreError::ArtifactDecode(format!("{} artifact hash does not match its payload", Self::NAME)));
        }
        let decoded: Self = serde_json::from_value(artifact.payload().clone())
            .map_err(|e| CoreError::ArtifactDecode(e.to_string()))?;
        decoded.validate().map_err(|reason| CoreError::validation(Self::NAME, reason))?;
        Ok(decoded)
    }
}

/// Tabla de capabilities declaradas por `T`.
pub struct Conformance<T> {
    entries: Vec<(Capability, Handler)>,
    _target: PhantomData<fn() -> T>,
}

impl<T: TargetSpec> Conformance<T> {
    pub(crate) fn collect() -> Self {
        let mut c = Self { entries: Vec::new(),
                           _target: PhantomData };
        T::declare(&mut c);
        c
    }

    pub fn hydrofabric_data(&mut self) -> &mut Self
        where T: HydrofabricDataHook
    {
        self.push(Capability::HydrofabricData, hydrofabric_data_handler::<T>)
    }

    pub fn hydrofabric_linked_data(&mut self) -> &mut Self
        where T: HydrofabricLinkedDataHook
    {
        self.push(Capability::HydrofabricLinkedData, hydrofabric_linked_data_handler::<T>)
    }

    pub fn hydrofabric_catchment(&mut self) -> &mut Self
        where T: HydrofabricCatchmentHook
    {
        self.push(Capability::HydrofabricCatchment, hydrofabric_catchment_handler::<T>)
    }

    pub fn realization(&mut self) -> &mut Self
        where T: RealizationHook
    {
        self.push(Capability::Realization, realization_handler::<T>)
    }

    pub fn forcing_metadata(&mut self) -> &mut Self
        where T: ForcingMetadataHook
    {
        self.push(Capability::ForcingMetadata, forcing_metadata_handler::<T>)
    }

    fn push(&mut self, capability: Capability, handler: Handler) -> &mut Self {
        // declarar dos veces la misma capability no la duplica
        if !self.entries.iter().any(|(c, _)| *c == capability) {
            self.entries.push((capability, handler));
        }
        self
    }
}

fn unexpected(capability: Capability, payload: &Payload) -> CoreError {
    let found = match payload {
        Payload::UnitRecord(_) => "a unit record".to_string(),
        Payload::LinkData(_) => "link data".to_string(),
        Payload::Artifact(a) => format!("{} artifact ({})", a.type_name(), json_kind(a.payload())),
    };
    CoreError::ShapeMismatch { capability,
                               expected: capability.expected_shape(),
                               found }
}

fn hydrofabric_data_handler<T: HydrofabricDataHook>(payload: &Payload) -> Result<FieldSet> {
    match payload {
        Payload::UnitRecord(r) => T::hydrofabric_hook(SchemaVersion::parse(&r.version)?, &r.unit_id, &r.row),
        other => Err(unexpected(Capability::HydrofabricData, other)),
    }
}

fn hydrofabric_linked_data_handler<T: HydrofabricLinkedDataHook>(payload: &Payload) -> Result<FieldSet> {
    match payload {
        Payload::UnitRecord(r) => T::hydrofabric_linked_data_hook(SchemaVersion::parse(&r.version)?, &r.unit_id, &r.row),
        other => Err(unexpected(Capability::HydrofabricLinkedData, other)),
    }
}

fn hydrofabric_catchment_handler<T: HydrofabricCatchmentHook>(payload: &Payload) -> Result<FieldSet> {
    match payload {
        Payload::LinkData(l) => T::hydrofabric_catchment_hook(l),
        other => Err(unexpected(Capability::HydrofabricCatchment, other)),
    }
}

fn realization_handler<T: RealizationHook>(payload: &Payload) -> Result<FieldSet> {
    match payload {
        Payload::Artifact(a) => T::realization_hook(a),
        other => Err(unexpected(Capability::Realization, other)),
    }
}

fn forcing_metadata_handler<T: ForcingMetadataHook>(payload: &Payload) -> Result<FieldSet> {
    match payload {
        Payload::Artifact(a) => T::forcing_metadata_hook(a),
        other => Err(unexpected(Capability::ForcingMetadata, other)),
    }
}

/// Identidad de un tipo destino dentro del registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetKey {
    name: &'static str,
    type_id: TypeId,
}

impl TargetKey {
    pub fn of<T: TargetSpec>() -> Self {
        Self { name: T::NAME,
               type_id: TypeId::of::<T>() }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Vista type-erased de un `TargetSpec` y sus capabilities.
#[derive(Clone)]
pub struct TargetDescriptor {
    key: TargetKey,
    shape: Option<OutputShape>,
    entries: Vec<(Capability, Handler)>,
}

impl TargetDescriptor {
    pub fn of<T: TargetSpec>() -> Self {
        Self { key: TargetKey::of::<T>(),
               shape: T::output_shape(),
               entries: Conformance::<T>::collect().entries }
    }

    pub fn key(&self) -> TargetKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.key.name
    }

    pub fn output_shape(&self) -> Option<OutputShape> {
        self.shape
    }

    /// Capabilities en orden de declaración.
    pub fn capabilities(&self) -> Vec<Capability> {
        self.entries.iter().map(|(c, _)| *c).collect()
    }

    pub fn implements(&self, capability: Capability) -> bool {
        self.entries.iter().any(|(c, _)| *c == capability)
    }

    pub(crate) fn handler(&self, capability: Capability) -> Option<Handler> {
        self.entries.iter().find(|(c, _)| *c == capability).map(|(_, h)| *h)
    }
}

impl fmt::Debug for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetDescriptor")
         .field("name", &self.key.name)
         .field("shape", &self.shape)
         .field("capabilities", &self.capabilities())
         .finish()
    }
}
