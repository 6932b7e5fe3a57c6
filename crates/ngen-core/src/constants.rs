//! Constantes del core.
//!
//! Valores estáticos compartidos por provider, writer y visitors. Los nombres
//! de campo por defecto corresponden al layout v2.0 de los registros de
//! hydrofabric.

/// Versión lógica del core. Se registra en cada `GenerateReport`.
pub const CORE_VERSION: &str = "0.1.0";

/// Único valor de versión de esquema reconocido hoy (ver `schema`).
pub const SUPPORTED_SCHEMA_VERSION: &str = "2.0";

/// Campo clave de unidad usado por defecto en ambas fuentes.
pub const DEFAULT_UNIT_KEY: &str = "divide_id";

/// Campo que lleva la versión de esquema en cada fila.
pub const DEFAULT_VERSION_FIELD: &str = "schema_version";

/// Identificador usado en nombres de archivo para artifacts globales.
pub const GLOBAL_UNIT_ID: &str = "global";
