use crate::config::Property;
use crate::host::ResourceId;
use thiserror::Error;

/// Rejection raised by a setter. The slider state is untouched whenever
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliderError {
    #[error("{property} = {value} is out of range: {reason}")]
    Range {
        property: Property,
        value: f64,
        reason: &'static str,
    },

    #[error("thumb must be square, got {width}x{height}")]
    Shape { width: u32, height: u32 },

    #[error("failed to resolve thumb resource '{id}': {reason}")]
    Resource { id: ResourceId, reason: String },
}

impl SliderError {
    pub fn range(property: Property, value: impl Into<f64>, reason: &'static str) -> Self {
        Self::Range {
            property,
            value: value.into(),
            reason,
        }
    }

    pub fn resource(id: &ResourceId, reason: impl ToString) -> Self {
        Self::Resource {
            id: id.clone(),
            reason: reason.to_string(),
        }
    }
}
