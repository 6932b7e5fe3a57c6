//! Catálogo de capabilities.
//!
//! Cada `Capability` está ligada a:
//! - un trait (su interfaz) que un tipo destino implementa para reclamarla;
//! - la forma de payload (`PayloadShape`) que un `Fulfillment` debe traer.
//!
//! Agregar una capability nueva es agregar una variante, su trait y el método
//! correspondiente en `Conformance`; registry y factory no cambian.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CoreError, Result};
use crate::model::{Artifact, FieldSet, Record, UnitRecord};
use crate::named::NamedVariant;
use crate::schema::SchemaVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    /// Fila de la fuente hydrofabric (divides) de una unidad.
    HydrofabricData,
    /// Fila de la fuente de datos enlazados (atributos) de una unidad.
    HydrofabricLinkedData,
    /// Mapeo categoría -> (campo -> valor) de una unidad.
    HydrofabricCatchment,
    /// Artifact de realización previamente validado.
    Realization,
    /// Artifact de metadata de forcing previamente validado.
    ForcingMetadata,
}

impl Capability {
    pub const ALL: [Capability; 5] = [Capability::HydrofabricData,
                                      Capability::HydrofabricLinkedData,
                                      Capability::HydrofabricCatchment,
                                      Capability::Realization,
                                      Capability::ForcingMetadata];

    pub fn expected_shape(&self) -> PayloadShape {
        match self {
            Capability::HydrofabricData | Capability::HydrofabricLinkedData => PayloadShape::UnitRecord,
            Capability::HydrofabricCatchment => PayloadShape::LinkData,
            Capability::Realization | Capability::ForcingMetadata => PayloadShape::Artifact,
        }
    }

    /// Capabilities cuyo payload sale de un `HookProvider` por unidad.
    pub fn provider_supplied(&self) -> bool {
        self.expected_shape() == PayloadShape::UnitRecord
    }

    /// Nombre del trait que materializa la interfaz.
    pub fn interface(&self) -> &'static str {
        match self {
            Capability::HydrofabricData => "HydrofabricDataHook",
            Capability::HydrofabricLinkedData => "HydrofabricLinkedDataHook",
            Capability::HydrofabricCatchment => "HydrofabricCatchmentHook",
            Capability::Realization => "RealizationHook",
            Capability::ForcingMetadata => "ForcingMetadataHook",
        }
    }
}

impl NamedVariant for Capability {
    const KIND: &'static str = "Capability";
    const VARIANTS: &'static [Self] = &Capability::ALL;

    fn name(&self) -> &'static str {
        match self {
            Capability::HydrofabricData => "hydrofabric_data",
            Capability::HydrofabricLinkedData => "hydrofabric_linked_data",
            Capability::HydrofabricCatchment => "hydrofabric_catchment",
            Capability::Realization => "realization",
            Capability::ForcingMetadata => "forcing_metadata",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadShape {
    UnitRecord,
    LinkData,
    Artifact,
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PayloadShape::UnitRecord => "a unit record",
            PayloadShape::LinkData => "a mapping of category to field mapping",
            PayloadShape::Artifact => "a validated artifact",
        };
        f.write_str(s)
    }
}

/// Datos enlazados de una unidad: categoría -> (campo -> valor).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkData(IndexMap<String, FieldSet>);

impl LinkData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convierte un JSON en `LinkData`; sólo acepta un objeto de objetos.
    pub fn from_value(value: Value) -> Result<Self> {
        let categories = match value {
            Value::Object(map) => map,
            other => {
                return Err(CoreError::ShapeMismatch { capability: Capability::HydrofabricCatchment,
                                                      expected: PayloadShape::LinkData,
                                                      found: json_kind(&other).to_string() })
            }
        };
        let mut out = IndexMap::with_capacity(categories.len());
        for (category, fields) in categories {
            match fields {
                Value::Object(fields) => {
                    out.insert(category, fields.into_iter().collect());
                }
                other => {
                    return Err(CoreError::ShapeMismatch { capability: Capability::HydrofabricCatchment,
                                                          expected: PayloadShape::LinkData,
                                                          found: format!("{} under category {category:?}", json_kind(&other)) })
                }
            }
        }
        Ok(Self(out))
    }

    pub fn insert(&mut self, category: impl Into<String>, fields: FieldSet) {
        self.0.insert(category.into(), fields);
    }

    pub fn category(&self, name: &str) -> Option<&FieldSet> {
        self.0.get(name)
    }

    pub fn get(&self, category: &str, field: &str) -> Option<&Value> {
        self.category(category).and_then(|f| f.get(field))
    }

    /// Igual que `get` pero falla con `NoData` si falta la entrada.
    pub fn require(&self, category: &str, field: &str) -> Result<&Value> {
        self.get(category, field)
            .ok_or_else(|| CoreError::NoData(format!("link data has no {category}.{field}")))
    }
}

/// Payload transportado por un `Fulfillment`.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    UnitRecord(UnitRecord),
    LinkData(LinkData),
    Artifact(Artifact),
}

impl Payload {
    pub fn shape(&self) -> PayloadShape {
        match self {
            Payload::UnitRecord(_) => PayloadShape::UnitRecord,
            Payload::LinkData(_) => PayloadShape::LinkData,
            Payload::Artifact(_) => PayloadShape::Artifact,
        }
    }
}

impl From<UnitRecord> for Payload {
    fn from(r: UnitRecord) -> Self {
        Payload::UnitRecord(r)
    }
}

impl From<LinkData> for Payload {
    fn from(l: LinkData) -> Self {
        Payload::LinkData(l)
    }
}

impl From<Artifact> for Payload {
    fn from(a: Artifact) -> Self {
        Payload::Artifact(a)
    }
}

pub(crate) fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// -------------------------------------------------------------
// Interfaces. Los handlers son funciones asociadas: reciben el payload y
// devuelven los campos que aportan, sin estado propio.
// -------------------------------------------------------------

pub trait HydrofabricDataHook {
    fn hydrofabric_hook(version: SchemaVersion, divide_id: &str, data: &Record) -> Result<FieldSet>;
}

pub trait HydrofabricLinkedDataHook {
    fn hydrofabric_linked_data_hook(version: SchemaVersion, divide_id: &str, data: &Record) -> Result<FieldSet>;
}

pub trait HydrofabricCatchmentHook {
    fn hydrofabric_catchment_hook(link_data: &LinkData) -> Result<FieldSet>;
}

pub trait RealizationHook {
    fn realization_hook(realization: &Artifact) -> Result<FieldSet>;
}

pub trait ForcingMetadataHook {
    fn forcing_metadata_hook(forcing_metadata: &Artifact) -> Result<FieldSet>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::named::variant_from_name;
    use serde_json::json;

    #[test]
    fn every_capability_resolves_by_name() {
        for c in Capability::ALL {
            assert_eq!(variant_from_name::<Capability>(&c.name().to_uppercase()).unwrap(), c);
        }
    }

    #[test]
    fn only_record_capabilities_are_provider_supplied() {
        let supplied: Vec<_> = Capability::ALL.into_iter().filter(|c| c.provider_supplied()).collect();
        assert_eq!(supplied, vec![Capability::HydrofabricData, Capability::HydrofabricLinkedData]);
    }

    #[test]
    fn link_data_requires_object_of_objects() {
        let ld = LinkData::from_value(json!({"forcing_metadata": {"elevation": 10.5}})).unwrap();
        assert_eq!(ld.get("forcing_metadata", "elevation"), Some(&json!(10.5)));
        assert!(ld.require("forcing_metadata", "missing").is_err());

        assert!(matches!(LinkData::from_value(json!([1, 2])), Err(CoreError::ShapeMismatch { .. })));
        let err = LinkData::from_value(json!({"forcing_metadata": 3})).unwrap_err();
        assert!(err.to_string().contains("forcing_metadata"));
    }
}
