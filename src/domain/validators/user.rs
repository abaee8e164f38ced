use super::EmailValidator;
use crate::domain::value_objects::{EmailAddress, Password, Username};
use crate::shared::error::{AppError, ErrorName, FieldName};
use crate::shared::random::RESET_PASSWORD_CODE_LENGTH;
use crate::shared::validation::{validate_char_length, validate_field_is_not_missing};

pub const DISPLAY_NAME_MAX_LENGTH: usize = 80;
pub const ABOUT_MAX_LENGTH: usize = 2000;

#[derive(Debug)]
pub struct SignUpWithEmailInput {
    pub email_address: EmailAddress,
    pub username: Username,
    pub password: Password,
}

#[derive(Debug)]
pub struct LogInWithEmailInput {
    pub email_address: EmailAddress,
    pub password: Password,
}

#[derive(Debug)]
pub struct LogInWithUsernameInput {
    pub username: Username,
    pub password: Password,
}

#[derive(Debug)]
pub struct ResetPasswordWithCodeInput {
    pub email_address: EmailAddress,
    pub reset_password_code: String,
    pub new_password: Password,
}

/// Profile fields to change; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserInput {
    pub display_name: Option<String>,
    pub about: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UserValidator {
    email_validator: EmailValidator,
}

impl UserValidator {
    pub fn new(email_validator: EmailValidator) -> Self {
        Self { email_validator }
    }

    pub fn validate_username(&self, raw: Option<&str>) -> Result<Username, AppError> {
        let raw = validate_field_is_not_missing(raw, FieldName::Username)?;
        Username::parse(raw)
    }

    pub fn validate_password(
        &self,
        raw: Option<&str>,
        field: FieldName,
    ) -> Result<Password, AppError> {
        let raw = validate_field_is_not_missing(raw, field)?;
        Password::parse(raw, field)
    }

    pub fn validate_sign_up_with_email(
        &self,
        email_address: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<SignUpWithEmailInput, AppError> {
        validate_field_is_not_missing(email_address, FieldName::EmailAddress)?;
        validate_field_is_not_missing(username, FieldName::Username)?;
        validate_field_is_not_missing(password, FieldName::Password)?;

        let username = self.validate_username(username)?;
        let email_address = self.email_validator.validate_email_address(email_address)?;
        let password = self.validate_password(password, FieldName::Password)?;

        Ok(SignUpWithEmailInput {
            email_address,
            username,
            password,
        })
    }

    pub fn validate_log_in_with_email(
        &self,
        email_address: Option<&str>,
        password: Option<&str>,
    ) -> Result<LogInWithEmailInput, AppError> {
        validate_field_is_not_missing(email_address, FieldName::EmailAddress)?;
        validate_field_is_not_missing(password, FieldName::Password)?;

        Ok(LogInWithEmailInput {
            email_address: self.email_validator.validate_email_address(email_address)?,
            password: self.validate_password(password, FieldName::Password)?,
        })
    }

    pub fn validate_log_in_with_username(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<LogInWithUsernameInput, AppError> {
        validate_field_is_not_missing(username, FieldName::Username)?;
        validate_field_is_not_missing(password, FieldName::Password)?;

        Ok(LogInWithUsernameInput {
            username: self.validate_username(username)?,
            password: self.validate_password(password, FieldName::Password)?,
        })
    }

    pub fn validate_send_reset_password_code(
        &self,
        email_address: Option<&str>,
    ) -> Result<EmailAddress, AppError> {
        self.email_validator.validate_email_address(email_address)
    }

    pub fn validate_reset_password_with_code(
        &self,
        email_address: Option<&str>,
        reset_password_code: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<ResetPasswordWithCodeInput, AppError> {
        validate_field_is_not_missing(email_address, FieldName::EmailAddress)?;
        validate_field_is_not_missing(reset_password_code, FieldName::ResetPasswordCode)?;
        validate_field_is_not_missing(new_password, FieldName::NewPassword)?;

        let email_address = self.email_validator.validate_email_address(email_address)?;
        let reset_password_code = self.validate_reset_password_code(reset_password_code)?;
        let new_password = self.validate_password(new_password, FieldName::NewPassword)?;

        Ok(ResetPasswordWithCodeInput {
            email_address,
            reset_password_code,
            new_password,
        })
    }

    pub fn validate_reset_password_code(&self, raw: Option<&str>) -> Result<String, AppError> {
        let raw = validate_field_is_not_missing(raw, FieldName::ResetPasswordCode)?;
        if raw.len() != RESET_PASSWORD_CODE_LENGTH
            || !raw.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(AppError::validation(
                ErrorName::ResetPasswordCodeInvalidFormat,
                FieldName::ResetPasswordCode,
                format!(
                    "reset_password_code must be {} letters or digits",
                    RESET_PASSWORD_CODE_LENGTH
                ),
            ));
        }
        Ok(raw.to_string())
    }

    pub fn validate_update_user(
        &self,
        display_name: Option<&str>,
        about: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<UpdateUserInput, AppError> {
        if let Some(display_name) = display_name {
            validate_char_length(
                display_name,
                1,
                DISPLAY_NAME_MAX_LENGTH,
                ErrorName::DisplayNameInvalidFormat,
                FieldName::DisplayName,
            )?;
        }
        if let Some(about) = about {
            validate_char_length(
                about,
                0,
                ABOUT_MAX_LENGTH,
                ErrorName::AboutInvalidFormat,
                FieldName::About,
            )?;
        }
        if let Some(avatar_url) = avatar_url {
            if !(avatar_url.starts_with("https://") || avatar_url.starts_with("http://")) {
                return Err(AppError::validation(
                    ErrorName::AvatarUrlInvalidFormat,
                    FieldName::AvatarUrl,
                    "avatar_url must be an http(s) URL",
                ));
            }
        }

        Ok(UpdateUserInput {
            display_name: display_name.map(str::to_string),
            about: about.map(str::to_string),
            avatar_url: avatar_url.map(str::to_string),
        })
    }
}
