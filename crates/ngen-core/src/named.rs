//! Búsqueda de variantes por nombre, sin distinguir mayúsculas.
//!
//! Enums cerrados (capabilities, formas de salida, enums de dominio)
//! implementan `NamedVariant` y se resuelven con `variant_from_name`.

use crate::errors::{CoreError, Result};

/// Enum con un conjunto fijo de variantes nombradas.
pub trait NamedVariant: Sized + Copy + 'static {
    /// Nombre del enum, usado en el mensaje de error.
    const KIND: &'static str;
    /// Todas las variantes, en orden de declaración.
    const VARIANTS: &'static [Self];

    fn name(&self) -> &'static str;
}

/// Resuelve `name` (recortado, sin distinguir mayúsculas) a una variante.
pub fn variant_from_name<E: NamedVariant>(name: &str) -> Result<E> {
    let cleaned = name.trim();
    E::VARIANTS.iter()
               .copied()
               .find(|v| v.name().eq_ignore_ascii_case(cleaned))
               .ok_or_else(|| CoreError::NotAMember { kind: E::KIND, name: name.to_string() })
}
