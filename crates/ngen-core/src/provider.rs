//! Provider pareado sobre dos fuentes de registros alineadas.
//!
//! `PairedProvider` ordena ambas fuentes por la clave de unidad y, antes de
//! entregar ninguna fila, exige igual largo y claves iguales posición a
//! posición. Cada avance vuelve a comparar las claves de las dos filas.
//!
//! Es forward-only y de una sola pasada: para iterar otra vez hay que
//! construir uno nuevo. Los cursores se liberan (drop) al agotarse o ante el
//! primer error de alineación.

use std::cmp::Ordering;
use std::vec;

use log::debug;
use serde_json::Value;

use crate::capability::{json_kind, Capability};
use crate::constants::{DEFAULT_UNIT_KEY, DEFAULT_VERSION_FIELD, SUPPORTED_SCHEMA_VERSION};
use crate::errors::{CoreError, Result};
use crate::model::{Record, UnitRecord};

/// Fuente de payloads por unidad para los visitors.
pub trait HookProvider {
    /// Capabilities que este provider sabe entregar.
    fn provided(&self) -> &[Capability];

    /// Avanza a la siguiente unidad. `Ok(false)` al agotarse.
    fn advance(&mut self) -> Result<bool>;

    /// Clave de la unidad actual, si hay una.
    fn current_unit(&self) -> Option<&str>;

    /// Payload de la unidad actual para `capability`.
    fn provide(&self, capability: Capability) -> Result<UnitRecord>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOptions {
    pub unit_key: String,
    pub version_field: String,
    /// Versión usada cuando una fila no trae `version_field`.
    pub assumed_version: String,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self { unit_key: DEFAULT_UNIT_KEY.to_string(),
               version_field: DEFAULT_VERSION_FIELD.to_string(),
               assumed_version: SUPPORTED_SCHEMA_VERSION.to_string() }
    }
}

type Cursor = vec::IntoIter<(String, Record)>;

#[derive(Debug)]
pub struct PairedProvider {
    options: ProviderOptions,
    cursors: Option<(Cursor, Cursor)>,
    current: Option<(UnitRecord, UnitRecord)>,
    len: usize,
    position: usize,
}

const PROVIDED: [Capability; 2] = [Capability::HydrofabricData, Capability::HydrofabricLinkedData];

impl PairedProvider {
    pub fn new(hydrofabric: Vec<Record>, linked: Vec<Record>, options: ProviderOptions) -> Result<Self> {
        let hydrofabric = sort_by_unit(hydrofabric, &options.unit_key, "hydrofabric")?;
        let linked = sort_by_unit(linked, &options.unit_key, "linked data")?;
        if hydrofabric.len() != linked.len() {
            return Err(CoreError::DataAlignment(format!("hydrofabric and linked data have differing number of records ({} != {})",
                                                        hydrofabric.len(),
                                                        linked.len())));
        }
        if let Some((i, (a, b))) = hydrofabric.iter()
                                              .zip(linked.iter())
                                              .enumerate()
                                              .find(|(_, (a, b))| a.0 != b.0)
        {
            return Err(CoreError::DataAlignment(format!("sorted record {i}: hydrofabric key {:?} does not match linked data key {:?}",
                                                        a.0, b.0)));
        }
        let len = hydrofabric.len();
        debug!("provider: {len} units keyed by {:?}", options.unit_key);
        Ok(Self { options,
                  cursors: Some((hydrofabric.into_iter(), linked.into_iter())),
                  current: None,
                  len,
                  position: 0 })
    }

    pub fn with_defaults(hydrofabric: Vec<Record>, linked: Vec<Record>) -> Result<Self> {
        Self::new(hydrofabric, linked, ProviderOptions::default())
    }

    /// Número de unidades que el provider entrega en total.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Unidades ya entregadas.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursors.is_none()
    }

    pub fn hydrofabric_row(&self) -> Option<&Record> {
        self.current.as_ref().map(|(hf, _)| &hf.row)
    }

    pub fn linked_row(&self) -> Option<&Record> {
        self.current.as_ref().map(|(_, lnk)| &lnk.row)
    }

    fn release(&mut self) {
        self.cursors = None;
        self.current = None;
    }

    fn unit_record(&self, unit_id: String, row: Record) -> UnitRecord {
        let version = match row.get(&self.options.version_field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => other.to_string(),
            None => self.options.assumed_version.clone(),
        };
        UnitRecord { version, unit_id, row }
    }
}

impl HookProvider for PairedProvider {
    fn provided(&self) -> &[Capability] {
        &PROVIDED
    }

    fn advance(&mut self) -> Result<bool> {
        let Some((hf, lnk)) = self.cursors.as_mut() else {
            return Ok(false);
        };
        let (hf_row, lnk_row) = match (hf.next(), lnk.next()) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                self.release();
                return Ok(false);
            }
        };
        if hf_row.0 != lnk_row.0 {
            let step = self.position;
            self.release();
            return Err(CoreError::DataAlignment(format!("step {step}: hydrofabric key {:?} does not match linked data key {:?}",
                                                        hf_row.0, lnk_row.0)));
        }
        let (unit_id, hf_row) = hf_row;
        let current = (self.unit_record(unit_id.clone(), hf_row), self.unit_record(unit_id, lnk_row.1));
        self.current = Some(current);
        self.position += 1;
        Ok(true)
    }

    fn current_unit(&self) -> Option<&str> {
        self.current.as_ref().map(|(hf, _)| hf.unit_id.as_str())
    }

    fn provide(&self, capability: Capability) -> Result<UnitRecord> {
        let (hf, lnk) = self.current
                            .as_ref()
                            .ok_or_else(|| CoreError::NoData("hook provider has no current row".into()))?;
        match capability {
            Capability::HydrofabricData => Ok(hf.clone()),
            Capability::HydrofabricLinkedData => Ok(lnk.clone()),
            other => Err(CoreError::CapabilityMismatch { target: "PairedProvider".into(),
                                                         capability: other }),
        }
    }
}

/// Clave de orden: números por valor, texto lexicográfico; números primero.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

fn unit_key(row: &Record, key: &str, source: &str, index: usize) -> Result<(SortKey, String)> {
    match row.get(key) {
        Some(Value::String(s)) => Ok((SortKey::Text(s.clone()), s.clone())),
        Some(Value::Number(n)) => {
            let value = n.as_f64()
                         .ok_or_else(|| CoreError::DataAlignment(format!("{source} row {index}: unit key {n} is not comparable")))?;
            Ok((SortKey::Number(value), n.to_string()))
        }
        Some(other) => Err(CoreError::DataAlignment(format!("{source} row {index}: unit key {key:?} is {}", json_kind(other)))),
        None => Err(CoreError::DataAlignment(format!("{source} row {index}: missing unit key {key:?}"))),
    }
}

/// Ordena por clave ascendente (estable) y deja el id de unidad como texto.
fn sort_by_unit(rows: Vec<Record>, key: &str, source: &str) -> Result<Vec<(String, Record)>> {
    let mut keyed = rows.into_iter()
                        .enumerate()
                        .map(|(i, row)| {
                            let (sort_key, unit_id) = unit_key(&row, key, source, i)?;
                            Ok((sort_key, unit_id, row))
                        })
                        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by(|a, b| a.0.compare(&b.0));
    Ok(keyed.into_iter().map(|(_, unit_id, row)| (unit_id, row)).collect())
}
