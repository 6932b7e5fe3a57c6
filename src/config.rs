//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

use ngen_core::constants::{DEFAULT_UNIT_KEY, DEFAULT_VERSION_FIELD, SUPPORTED_SCHEMA_VERSION};
use ngen_core::ProviderOptions;

/// Directorio de salida por defecto (relativo al directorio de trabajo).
pub const DEFAULT_OUTPUT_ROOT: &str = "./config";

/// Parámetros del generador.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Raíz donde se escriben los archivos generados.
    pub output_root: PathBuf,
    /// Campo que identifica la unidad en ambas fuentes.
    pub unit_key: String,
    /// Campo de cada fila con el tag de versión del hydrofabric.
    pub version_field: String,
    /// Versión supuesta cuando una fila no trae `version_field`.
    pub assumed_version: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
               unit_key: DEFAULT_UNIT_KEY.to_string(),
               version_field: DEFAULT_VERSION_FIELD.to_string(),
               assumed_version: SUPPORTED_SCHEMA_VERSION.to_string() }
    }
}

impl GeneratorConfig {
    /// Lee `NGENCONF_*`; las variables ausentes o vacías toman el valor por defecto.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self { output_root: get("NGENCONF_OUTPUT_ROOT").map(PathBuf::from).unwrap_or(defaults.output_root),
               unit_key: get("NGENCONF_UNIT_KEY").unwrap_or(defaults.unit_key),
               version_field: get("NGENCONF_VERSION_FIELD").unwrap_or(defaults.version_field),
               assumed_version: get("NGENCONF_ASSUMED_VERSION").unwrap_or(defaults.assumed_version) }
    }

    pub fn provider_options(&self) -> ProviderOptions {
        ProviderOptions { unit_key: self.unit_key.clone(),
                          version_field: self.version_field.clone(),
                          assumed_version: self.assumed_version.clone() }
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<GeneratorConfig> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
    GeneratorConfig::from_env()
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let cfg = GeneratorConfig::from_lookup(|_| None);
        assert_eq!(cfg, GeneratorConfig::default());
        assert_eq!(cfg.provider_options(), ProviderOptions::default());
    }

    #[test]
    fn variables_override_defaults() {
        let vars: HashMap<&str, &str> =
            [("NGENCONF_OUTPUT_ROOT", "/tmp/out"), ("NGENCONF_UNIT_KEY", " id "), ("NGENCONF_VERSION_FIELD", "")].into();
        let cfg = GeneratorConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.output_root, PathBuf::from("/tmp/out"));
        assert_eq!(cfg.unit_key, "id");
        assert_eq!(cfg.version_field, DEFAULT_VERSION_FIELD);
    }
}
