//! Configuración de inicialización del módulo PET (evapotranspiración
//! potencial).
//!
//! Coordenadas y elevación salen de los datos enlazados de la unidad (o de la
//! metadata de forcing del catchment); el resto son valores base de la
//! versión 2.0 del hydrofabric.
use std::fmt;

use ngen_core::{variant_from_name, Conformance, CoreError, FieldSet, HydrofabricCatchmentHook,
                HydrofabricLinkedDataHook, LinkData, NamedVariant, OutputShape, Record, Result, SchemaVersion,
                TargetSpec};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PetMethod {
    EnergyBalance,
    Aerodynamic,
    Combined,
    PriestleyTaylor,
    PenmanMonteith,
}

impl PetMethod {
    /// Código numérico que espera el módulo.
    pub fn code(&self) -> u8 {
        match self {
            PetMethod::EnergyBalance => 1,
            PetMethod::Aerodynamic => 2,
            PetMethod::Combined => 3,
            PetMethod::PriestleyTaylor => 4,
            PetMethod::PenmanMonteith => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|m| m.code() == code)
    }
}

impl NamedVariant for PetMethod {
    const KIND: &'static str = "PetMethod";
    const VARIANTS: &'static [Self] = &[PetMethod::EnergyBalance,
                                        PetMethod::Aerodynamic,
                                        PetMethod::Combined,
                                        PetMethod::PriestleyTaylor,
                                        PetMethod::PenmanMonteith];

    fn name(&self) -> &'static str {
        match self {
            PetMethod::EnergyBalance => "energy_balance",
            PetMethod::Aerodynamic => "aerodynamic",
            PetMethod::Combined => "combined",
            PetMethod::PriestleyTaylor => "priestley_taylor",
            PetMethod::PenmanMonteith => "penman_monteith",
        }
    }
}

impl fmt::Display for PetMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PetMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPetMethod {
    Code(u8),
    Name(String),
}

impl<'de> Deserialize<'de> for PetMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match RawPetMethod::deserialize(deserializer)? {
            RawPetMethod::Code(code) => {
                PetMethod::from_code(code).ok_or_else(|| de::Error::custom(format!("{code} is not a PetMethod code")))
            }
            RawPetMethod::Name(name) => variant_from_name(&name).map_err(de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub verbose: bool,
    pub pet_method: PetMethod,
    pub yes_aorc: bool,
    pub yes_wrf: bool,
    pub wind_speed_measurement_height_m: f64,
    pub humidity_measurement_height_m: f64,
    pub shortwave_radiation_provided: bool,
    pub cloud_base_height_known: bool,
    pub time_step_size_s: u32,
    pub num_timesteps: u32,
    pub vegetation_height_m: f64,
    pub zero_plane_displacement_height_m: f64,
    pub momentum_transfer_roughness_length: f64,
    pub heat_transfer_roughness_length_m: f64,
    pub surface_longwave_emissivity: f64,
    pub surface_shortwave_albedo: f64,
    pub latitude_degrees: f64,
    pub longitude_degrees: f64,
    pub site_elevation_m: f64,
}

fn required<'a>(data: &'a Record, field: &str, divide_id: &str) -> Result<&'a Value> {
    data.get(field)
        .ok_or_else(|| CoreError::NoData(format!("linked data for {divide_id} has no {field:?}")))
}

fn location(longitude: &Value, latitude: &Value, elevation: &Value) -> FieldSet {
    let mut fields = FieldSet::new();
    fields.insert("longitude_degrees".into(), longitude.clone());
    fields.insert("latitude_degrees".into(), latitude.clone());
    fields.insert("site_elevation_m".into(), elevation.clone());
    fields
}

impl HydrofabricLinkedDataHook for Pet {
    fn hydrofabric_linked_data_hook(version: SchemaVersion, divide_id: &str, data: &Record) -> Result<FieldSet> {
        match version {
            SchemaVersion::V2 => Ok(location(required(data, "X", divide_id)?,
                                             required(data, "Y", divide_id)?,
                                             required(data, "elevation_mean", divide_id)?)),
        }
    }
}

impl HydrofabricCatchmentHook for Pet {
    fn hydrofabric_catchment_hook(link_data: &LinkData) -> Result<FieldSet> {
        // la metadata publica la longitud bajo "cetroid_lon"
        Ok(location(link_data.require("forcing_metadata", "cetroid_lon")?,
                    link_data.require("forcing_metadata", "centroid_lat")?,
                    link_data.require("forcing_metadata", "elevation")?))
    }
}

impl TargetSpec for Pet {
    const NAME: &'static str = "PET";

    fn output_shape() -> Option<OutputShape> {
        Some(OutputShape::Ini)
    }

    fn declare(c: &mut Conformance<Self>) {
        c.hydrofabric_linked_data().hydrofabric_catchment();
    }

    fn baseline_defaults(version: SchemaVersion) -> FieldSet {
        let defaults = match version {
            SchemaVersion::V2 => json!({
                "yes_wrf": false,
                "wind_speed_measurement_height_m": 10.0,
                "humidity_measurement_height_m": 10.0,
                "shortwave_radiation_provided": false,
                "time_step_size_s": 3600,
                "num_timesteps": 720,
                "cloud_base_height_known": false,
                "verbose": true,
                "pet_method": PetMethod::EnergyBalance.code(),
                "yes_aorc": true,
                "vegetation_height_m": 0.12,
                "zero_plane_displacement_height_m": 0.0003,
                "momentum_transfer_roughness_length": 0.0,
                "heat_transfer_roughness_length_m": 0.1,
                "surface_longwave_emissivity": 42.0,
                "surface_shortwave_albedo": 7.0,
            }),
        };
        match defaults {
            Value::Object(map) => map.into_iter().collect(),
            _ => FieldSet::new(),
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if !(-90.0..=90.0).contains(&self.latitude_degrees) {
            return Err(format!("latitude_degrees {} outside [-90, 90]", self.latitude_degrees));
        }
        if !(-180.0..=180.0).contains(&self.longitude_degrees) {
            return Err(format!("longitude_degrees {} outside [-180, 180]", self.longitude_degrees));
        }
        if self.time_step_size_s == 0 || self.num_timesteps == 0 {
            return Err("time_step_size_s and num_timesteps must be positive".into());
        }
        Ok(())
    }
}
