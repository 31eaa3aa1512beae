//! Value coercion for forwarded attributes
//!
//! Only numeric values become gauges. Everything else is reported back as a
//! [`CoercionSkip`] so the caller can log it and move on.

use thiserror::Error;

use crate::collector::AttributeValue;

/// An attribute value that cannot be sent as a gauge
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot handle {kind} value")]
pub struct CoercionSkip {
    /// Kind of the rejected value (boolean, string, null, composite)
    pub kind: &'static str,
}

/// Coerce an attribute value to a gauge number
///
/// Numbers pass through unchanged. Booleans, strings, nulls and composite
/// values are never converted.
pub fn coerce(value: &AttributeValue) -> Result<f64, CoercionSkip> {
    match value {
        AttributeValue::Number(n) => Ok(*n),
        AttributeValue::Boolean(_)
        | AttributeValue::Text(_)
        | AttributeValue::Null
        | AttributeValue::Composite(_) => Err(CoercionSkip { kind: value.kind() }),
    }
}
