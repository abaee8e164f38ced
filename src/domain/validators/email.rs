use crate::domain::value_objects::EmailAddress;
use crate::shared::error::{AppError, ErrorName, FieldName};
use crate::shared::random::{ACTIVATION_CODE_MAX, ACTIVATION_CODE_MIN};
use crate::shared::validation::validate_field_is_not_missing;

#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl EmailValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_email_address(&self, raw: Option<&str>) -> Result<EmailAddress, AppError> {
        let raw = validate_field_is_not_missing(raw, FieldName::EmailAddress)?;
        EmailAddress::parse(raw)
    }

    pub fn validate_activation_code(&self, raw: Option<i32>) -> Result<i32, AppError> {
        let code = raw.ok_or_else(|| {
            AppError::validation(
                ErrorName::FieldMissing,
                FieldName::ActivationCode,
                "activation_code is required",
            )
        })?;
        if !(ACTIVATION_CODE_MIN..=ACTIVATION_CODE_MAX).contains(&code) {
            return Err(AppError::validation(
                ErrorName::ActivationCodeInvalidFormat,
                FieldName::ActivationCode,
                "activation_code must be a 5-digit number",
            ));
        }
        Ok(code)
    }
}
