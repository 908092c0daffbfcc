use thiserror::Error;

/// Syntactic failures for a typed setpoint. All variants share the same user
/// copy; the variant is kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter a valid number")]
    Empty,
    #[error("Please enter a valid number")]
    TooLong,
    #[error("Please enter a valid number")]
    NotANumber,
    #[error("Please enter a valid number")]
    NotFinite,
}

/// Parses free text into a temperature. Accepts a comma as the decimal
/// separator. Range and precision are not checked here.
pub fn parse_setpoint(raw: &str, max_len: usize) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    if trimmed.chars().count() > max_len {
        return Err(InputError::TooLong);
    }

    let normalized = trimmed.replace(',', ".");
    let value = normalized.parse::<f64>().map_err(|_| InputError::NotANumber)?;

    if !value.is_finite() {
        return Err(InputError::NotFinite);
    }

    Ok(value)
}
