use thiserror::Error;

/// Rejection reasons for a proposed setpoint. The display text is shown to
/// the user verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Temperature range: {min:.1}°C – {max:.1}°C. Provided: {provided:.1}°C")]
    OutOfRange { min: f64, max: f64, provided: f64 },
    #[error("Temperature must be in 0.1°C increments (e.g., 20.0, 20.1, 20.2)")]
    InvalidGranularity,
}
