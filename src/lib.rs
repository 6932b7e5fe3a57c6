//! ngenconf: generación de archivos de configuración por unidad hidrológica.
//!
//! - `config`: variables `NGENCONF_*` y `.env`.
//! - `loader`: lectura de fuentes JSON / JSON Lines.
//! - `cli` y `app`: subcomandos `capabilities` y `generate`.
//!
//! El framework vive en `ngen-core`; los targets incluidos en `ngen-domain`.

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod loader;

pub use errors::AppError;
