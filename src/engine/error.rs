//! Error type shared by both projectors.

use thiserror::Error;

/// Reason a projection was rejected before or during computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// An input field is outside its documented domain.
    #[error("invalid input `{field}`: {message}")]
    InvalidInput {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable constraint description.
        message: String,
    },
    /// Total lifetime production is zero, so LCOE is undefined.
    #[error("division by zero: `{field}` yields zero lifetime production, LCOE is undefined")]
    DivisionByZero {
        /// Name of the field responsible for the zero denominator.
        field: &'static str,
    },
}

impl EngineError {
    /// Returns the name of the input field responsible for the failure.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInput { field, .. } | Self::DivisionByZero { field } => field,
        }
    }

    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

/// Longest horizon or lifetime either projector accepts (years).
pub const MAX_YEARS: u32 = 1000;

/// Rejects a year count of zero or above [`MAX_YEARS`].
pub(crate) fn ensure_years(field: &'static str, years: u32) -> Result<(), EngineError> {
    if (1..=MAX_YEARS).contains(&years) {
        Ok(())
    } else {
        Err(EngineError::invalid(
            field,
            format!("must be in [1, {MAX_YEARS}], got {years}"),
        ))
    }
}

/// Rejects NaN and infinities.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::invalid(field, format!("must be finite, got {value}")))
    }
}

/// Rejects values outside the closed interval `[lo, hi]`.
pub(crate) fn ensure_in_range(
    field: &'static str,
    value: f64,
    lo: f64,
    hi: f64,
) -> Result<(), EngineError> {
    ensure_finite(field, value)?;
    if (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::invalid(
            field,
            format!("must be in [{lo}, {hi}], got {value}"),
        ))
    }
}

/// Rejects negative values.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), EngineError> {
    ensure_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid(field, format!("must be >= 0, got {value}")))
    }
}
