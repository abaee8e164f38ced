//! Validation Utilities
//!
//! Field-level checks shared by every validator: presence and length bounds.

use super::error::{AppError, ErrorName, FieldName};

/// Fail with `FIELD_MISSING` when a required field is absent or blank.
pub fn validate_field_is_not_missing<'a>(
    value: Option<&'a str>,
    field: FieldName,
) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::validation(
            ErrorName::FieldMissing,
            field,
            format!("{} is required", field),
        )),
    }
}

/// Check that `value` has between `min` and `max` characters (inclusive).
pub fn validate_char_length(
    value: &str,
    min: usize,
    max: usize,
    name: ErrorName,
    field: FieldName,
) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::validation(
            name,
            field,
            format!("{} must be {}-{} characters", field, min, max),
        ));
    }
    Ok(())
}
