//! Capabilities de serialización y su renderizado a texto.
//!
//! Cada tipo destino declara a lo sumo una `OutputShape`; el writer elige
//! extensión y encoder a partir de ella.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{CoreError, Result};
use crate::named::NamedVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputShape {
    Ini,
    Json,
    Namelist,
    Toml,
    Yaml,
    /// Documento genérico; se escribe como JSON.
    GenericDocument,
}

impl OutputShape {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputShape::Ini => "ini",
            OutputShape::Json | OutputShape::GenericDocument => "json",
            OutputShape::Namelist => "namelist",
            OutputShape::Toml => "toml",
            OutputShape::Yaml => "yaml",
        }
    }
}

impl NamedVariant for OutputShape {
    const KIND: &'static str = "OutputShape";
    const VARIANTS: &'static [Self] = &[OutputShape::Ini,
                                        OutputShape::Json,
                                        OutputShape::Namelist,
                                        OutputShape::Toml,
                                        OutputShape::Yaml,
                                        OutputShape::GenericDocument];

    fn name(&self) -> &'static str {
        match self {
            OutputShape::Ini => "ini",
            OutputShape::Json => "json",
            OutputShape::Namelist => "namelist",
            OutputShape::Toml => "toml",
            OutputShape::Yaml => "yaml",
            OutputShape::GenericDocument => "generic",
        }
    }
}

impl fmt::Display for OutputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renderiza `payload` (el JSON de un artifact `type_name`) en `shape`.
pub fn render(shape: OutputShape, type_name: &str, payload: &Value) -> Result<String> {
    match shape {
        OutputShape::Json | OutputShape::GenericDocument => {
            let mut s = serde_json::to_string_pretty(payload).map_err(|e| CoreError::serialize(type_name, e))?;
            s.push('\n');
            Ok(s)
        }
        OutputShape::Toml => toml::to_string(payload).map_err(|e| CoreError::serialize(type_name, e)),
        OutputShape::Yaml => serde_yaml::to_string(payload).map_err(|e| CoreError::serialize(type_name, e)),
        OutputShape::Ini => Ok(render_ini(as_object(type_name, payload)?)),
        OutputShape::Namelist => Ok(render_namelist(type_name, as_object(type_name, payload)?)),
    }
}

fn as_object<'a>(type_name: &str, payload: &'a Value) -> Result<&'a Map<String, Value>> {
    payload.as_object()
           .ok_or_else(|| CoreError::serialize(type_name, "payload is not an object"))
}

/// `key=value`; objetos anidados van a su propia `[section]` al final.
fn render_ini(fields: &Map<String, Value>) -> String {
    let mut out = String::new();
    for (k, v) in fields.iter().filter(|(_, v)| !v.is_object()) {
        out.push_str(&format!("{k}={}\n", ini_scalar(v)));
    }
    for (section, v) in fields.iter().filter(|(_, v)| v.is_object()) {
        out.push_str(&format!("\n[{section}]\n"));
        if let Value::Object(inner) = v {
            for (k, v) in inner {
                out.push_str(&format!("{k}={}\n", ini_scalar(v)));
            }
        }
    }
    out
}

fn ini_scalar(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(ini_scalar).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// Grupo Fortran `&name ... /`; objetos anidados son grupos aparte.
fn render_namelist(group: &str, fields: &Map<String, Value>) -> String {
    let mut out = format!("&{group}\n");
    for (k, v) in fields.iter().filter(|(_, v)| !v.is_object()) {
        out.push_str(&format!("  {k} = {},\n", namelist_scalar(v)));
    }
    out.push_str("/\n");
    for (name, v) in fields.iter() {
        if let Value::Object(inner) = v {
            out.push('\n');
            out.push_str(&render_namelist(name, inner));
        }
    }
    out
}

fn namelist_scalar(v: &Value) -> String {
    match v {
        Value::Null => "''".to_string(),
        Value::Bool(true) => ".true.".to_string(),
        Value::Bool(false) => ".false.".to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        Value::Array(items) => items.iter().map(namelist_scalar).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
