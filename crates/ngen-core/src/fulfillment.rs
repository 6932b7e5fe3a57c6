//! `Fulfillment`: par (capability, payload) validado al crearse.
//!
//! Es la única vía por la que datos externos entran al framework. La forma
//! del payload se comprueba en `create`, nunca de forma diferida.

use serde_json::Value;

use crate::capability::{Capability, LinkData, Payload};
use crate::errors::{CoreError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Fulfillment {
    capability: Capability,
    payload: Payload,
}

impl Fulfillment {
    pub fn create(capability: Capability, payload: impl Into<Payload>) -> Result<Self> {
        let payload = payload.into();
        let expected = capability.expected_shape();
        if payload.shape() != expected {
            return Err(CoreError::ShapeMismatch { capability,
                                                  expected,
                                                  found: payload.shape().to_string() });
        }
        if let Payload::Artifact(a) = &payload {
            if !a.verify_hash() {
                return Err(CoreError::ShapeMismatch { capability,
                                                      expected,
                                                      found: format!("{} artifact with a stale hash", a.type_name()) });
            }
        }
        Ok(Self { capability, payload })
    }

    /// Atajo para `HydrofabricCatchment` desde JSON crudo.
    pub fn from_link_value(value: Value) -> Result<Self> {
        Self::create(Capability::HydrofabricCatchment, LinkData::from_value(value)?)
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}
