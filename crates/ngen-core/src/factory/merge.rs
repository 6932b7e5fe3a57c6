//! Fusión determinista de field sets.
//!
//! Un campo aportado dos veces debe traer el mismo valor; el resultado no
//! depende del orden de los fulfillments.

use crate::errors::{CoreError, Result};
use crate::model::FieldSet;

/// Agrega `update` a `acc`. Campos repetidos con valor distinto son
/// `FieldConflict`; repetidos con el mismo valor se ignoran.
pub fn merge_fields(target: &str, acc: &mut FieldSet, update: FieldSet) -> Result<()> {
    for (field, value) in update {
        match acc.get(&field) {
            Some(existing) if *existing != value => {
                return Err(CoreError::FieldConflict { target: target.to_string(), field });
            }
            Some(_) => {}
            None => {
                acc.insert(field, value);
            }
        }
    }
    Ok(())
}

/// Inserta sólo los campos ausentes en `acc`.
pub fn fill_absent(acc: &mut FieldSet, defaults: FieldSet) {
    for (field, value) in defaults {
        acc.entry(field).or_insert(value);
    }
}
