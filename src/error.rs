/// Input validation failures raised before any computation starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HoughError {
    #[error("invalid {parameter}: {reason}")]
    InvalidInput {
        parameter: &'static str,
        reason: String,
    },

    #[error("size mismatch: expected {expected} cells, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

impl HoughError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Reject anything that is not a finite, strictly positive step.
pub(crate) fn ensure_positive_step(parameter: &'static str, value: f64) -> Result<(), HoughError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(HoughError::invalid(
            parameter,
            format!("must be a finite value > 0, got {value}"),
        ));
    }
    Ok(())
}
