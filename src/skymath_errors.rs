use thiserror::Error;

/// Failures reported by skymath.
///
/// Free-form location text that no notation matcher accepts (or that decodes outside the
/// geographic range), batch calls whose input sequences disagree in length, and the
/// atmospheric formulas given an argument outside their physical range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkyMathError {
    #[error("Unable to parse coordinate '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("Batch argument '{argument}' has length {found}, expected {expected}")]
    Shape {
        argument: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Parameter '{parameter}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl SkyMathError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        SkyMathError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// `Err(OutOfRange)` unless `min <= value <= max`; NaN is always rejected.
    pub(crate) fn check_range(
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<()> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(SkyMathError::OutOfRange {
                parameter,
                value,
                min,
                max,
            })
        }
    }
}

/// Result alias used by every fallible operation of the crate.
pub type Result<T> = std::result::Result<T, SkyMathError>;
