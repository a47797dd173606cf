// ============================================================================
// VALIDATION - Validaciones de formularios en cliente
// ============================================================================

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::AppError;

pub const MIN_PASSWORD_LEN: usize = 6;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

pub fn require_email(email: &str) -> Result<(), AppError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AppError::Validation("Please enter a valid email address".to_string()))
    }
}

pub fn require_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub fn require_non_empty(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{} is required", field)))
    } else {
        Ok(())
    }
}

/// Parsea un número positivo de un input; vacío o inválido → error con el nombre del campo
pub fn parse_positive(value: &str, field: &str) -> Result<f64, AppError> {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() && number > 0.0 => Ok(number),
        _ => Err(AppError::Validation(format!("{} must be a positive number", field))),
    }
}

/// Como `parse_positive` pero acotado a un rango razonable
pub fn parse_in_range(value: &str, field: &str, min: f64, max: f64) -> Result<f64, AppError> {
    let number = parse_positive(value, field)?;
    if number < min || number > max {
        return Err(AppError::Validation(format!(
            "{} must be between {} and {}",
            field, min, max
        )));
    }
    Ok(number)
}
