//! Input checks shared by the create/update operations.
//!
//! The pricing engine never calls these; bad numbers that reach it flow through
//! arithmetically.

use crate::errors::{Error, Result};

/// Trimmed name, rejecting empty or whitespace-only input
pub fn name(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Finite and >= 0
pub fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::validation(field, format!("{value} is not a finite number")));
    }
    if value < 0.0 {
        return Err(Error::validation(field, format!("{value} is negative")));
    }
    Ok(())
}

/// Finite and > 0
pub fn positive(field: &'static str, value: f64) -> Result<()> {
    non_negative(field, value)?;
    if value <= 0.0 {
        return Err(Error::validation(field, "must be greater than zero"));
    }
    Ok(())
}

/// Finite, any sign
pub fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::validation(field, format!("{value} is not a finite number")))
    }
}
