use thiserror::Error;

/// Errors reported by the geometry engine.
///
/// Every variant is a permanent failure for the given input: the engine
/// never substitutes a default, so the caller must supply a corrected value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid aspect ratio '{label}': {reason}")]
    InvalidAspectRatio { label: String, reason: &'static str },

    #[error("viewing angle {0}° is outside (0, 180)")]
    InvalidAngle(f64),

    #[error("{field} must be greater than zero (got {value})")]
    InvalidMagnitude { field: &'static str, value: f64 },
}

impl GeometryError {
    pub(crate) fn aspect(label: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidAspectRatio {
            label: label.into(),
            reason,
        }
    }
}
