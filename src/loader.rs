//! Carga de fuentes tabulares: un arreglo JSON de objetos o JSON Lines.
use std::fs;
use std::path::Path;

use log::debug;
use ngen_core::Record;
use serde_json::Value;

use crate::errors::AppError;

pub fn load_records(path: &Path) -> Result<Vec<Record>, AppError> {
    let text = fs::read_to_string(path).map_err(|source| AppError::Read { path: path.to_path_buf(), source })?;
    let records = parse_records(&text, &path.display().to_string())?;
    debug!("loader: {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Filas numeradas desde 1. Un texto que empieza con `[` se lee como arreglo.
pub fn parse_records(text: &str, source_name: &str) -> Result<Vec<Record>, AppError> {
    let input_error = |row: usize, reason: String| AppError::Input { source_name: source_name.to_string(),
                                                                      row,
                                                                      reason };
    let values: Vec<(usize, Value)> = if text.trim_start().starts_with('[') {
        let parsed: Vec<Value> = serde_json::from_str(text).map_err(|e| input_error(e.line(), e.to_string()))?;
        parsed.into_iter().enumerate().map(|(i, v)| (i + 1, v)).collect()
    } else {
        let mut values = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(line).map_err(|e| input_error(i + 1, e.to_string()))?;
            values.push((i + 1, value));
        }
        values
    };

    values.into_iter()
          .map(|(row, value)| match value {
              Value::Object(map) => Ok(map.into_iter().collect()),
              other => Err(input_error(row, format!("expected an object, got {other}"))),
          })
          .collect()
}
