//! Targets y fixtures compartidos por los tests de integración del core.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use ngen_core::{Artifact, Conformance, CoreError, FieldSet, ForcingMetadataHook, HydrofabricCatchmentHook,
                HydrofabricDataHook, HydrofabricLinkedDataHook, LinkData, OutputShape, Record, Result, SchemaVersion,
                TargetSpec};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub fn row(v: Value) -> Record {
    serde_json::from_value(v).expect("row fixture must be an object")
}

pub fn fields(v: Value) -> FieldSet {
    serde_json::from_value(v).expect("fields fixture must be an object")
}

/// Fuente hydrofabric con las claves dadas (en el orden dado).
pub fn hydrofabric_rows(keys: &[&str]) -> Vec<Record> {
    keys.iter()
        .enumerate()
        .map(|(i, k)| row(json!({"divide_id": k, "areasqkm": 1.5 + i as f64, "toid": format!("nex-{k}")})))
        .collect()
}

/// Fuente de datos enlazados con las claves dadas.
pub fn linked_rows(keys: &[&str]) -> Vec<Record> {
    keys.iter()
        .enumerate()
        .map(|(i, k)| row(json!({"divide_id": k, "elevation_mean": 100.0 * (i as f64 + 1.0), "slope_mean": 0.25})))
        .collect()
}

/// Target con las dos capabilities de datos y campos disjuntos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basin {
    pub divide_id: String,
    pub area_km2: f64,
    pub elevation_m: f64,
    pub slope: f64,
    pub time_step_s: u32,
}

impl HydrofabricDataHook for Basin {
    fn hydrofabric_hook(_version: SchemaVersion, divide_id: &str, data: &Record) -> Result<FieldSet> {
        Ok(fields(json!({"divide_id": divide_id, "area_km2": data["areasqkm"]})))
    }
}

impl HydrofabricLinkedDataHook for Basin {
    fn hydrofabric_linked_data_hook(version: SchemaVersion, _divide_id: &str, data: &Record) -> Result<FieldSet> {
        match version {
            SchemaVersion::V2 => Ok(fields(json!({"elevation_m": data["elevation_mean"], "slope": data["slope_mean"]}))),
        }
    }
}

impl TargetSpec for Basin {
    const NAME: &'static str = "Basin";

    fn output_shape() -> Option<OutputShape> {
        Some(OutputShape::Json)
    }

    fn declare(c: &mut Conformance<Self>) {
        c.hydrofabric_data().hydrofabric_linked_data();
    }

    fn baseline_defaults(_version: SchemaVersion) -> FieldSet {
        fields(json!({"time_step_s": 3600}))
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.area_km2 <= 0.0 {
            return Err("area_km2 must be positive".into());
        }
        Ok(())
    }
}

/// Target sin capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plain {
    pub value: i64,
}

impl TargetSpec for Plain {
    const NAME: &'static str = "Plain";
}

pub static CATCHMENT_HOOK_CALLS: AtomicUsize = AtomicUsize::new(0);

/// Target con catchment + forcing metadata (payload = artifact `Basin`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forcing {
    pub latitude: f64,
    pub longitude: f64,
    pub divide_id: String,
    pub provider: String,
}

impl HydrofabricCatchmentHook for Forcing {
    fn hydrofabric_catchment_hook(link_data: &LinkData) -> Result<FieldSet> {
        CATCHMENT_HOOK_CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(fields(json!({
            "latitude": link_data.require("forcing_metadata", "centroid_lat")?,
            "longitude": link_data.require("forcing_metadata", "centroid_lon")?,
        })))
    }
}

impl ForcingMetadataHook for Forcing {
    fn forcing_metadata_hook(forcing_metadata: &Artifact) -> Result<FieldSet> {
        let basin = Basin::from_artifact(forcing_metadata)?;
        Ok(fields(json!({"divide_id": basin.divide_id})))
    }
}

impl TargetSpec for Forcing {
    const NAME: &'static str = "Forcing";

    fn output_shape() -> Option<OutputShape> {
        Some(OutputShape::Toml)
    }

    fn declare(c: &mut Conformance<Self>) {
        c.hydrofabric_catchment().forcing_metadata();
    }
}

/// Target escrito sin forma de salida.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hidden {
    pub divide_id: String,
}

impl HydrofabricDataHook for Hidden {
    fn hydrofabric_hook(_version: SchemaVersion, divide_id: &str, _data: &Record) -> Result<FieldSet> {
        Ok(fields(json!({"divide_id": divide_id})))
    }
}

impl TargetSpec for Hidden {
    const NAME: &'static str = "Hidden";

    fn output_shape() -> Option<OutputShape> {
        None
    }

    fn declare(c: &mut Conformance<Self>) {
        c.hydrofabric_data();
    }
}

pub fn is_alignment(e: &CoreError) -> bool {
    matches!(e, CoreError::DataAlignment(_))
}
