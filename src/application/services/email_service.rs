//! Email Service
//!
//! Email address ownership, activation and the outgoing notification texts.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::gateways::{EmailGateway, OutgoingEmail};
use crate::domain::{
    ActivationStatus, Email, EmailId, EmailRepository, GlobalValues, User, UserInclude,
    UserRepository, UserState,
};
use crate::shared::error::{AppError, ErrorName, FieldName};
use crate::shared::random;

pub(crate) fn activation_email(globals: &GlobalValues, to_address: &str, code: i32) -> OutgoingEmail {
    OutgoingEmail {
        from_address: globals.email_sender_address.clone(),
        from_name: globals.email_sender_name.clone(),
        to_address: to_address.to_string(),
        subject: format!("Activate your {} email", globals.site_name),
        body: format!("Your activation code is {}.", code),
    }
}

pub(crate) fn reset_password_email(
    globals: &GlobalValues,
    to_address: &str,
    code: &str,
) -> OutgoingEmail {
    OutgoingEmail {
        from_address: globals.email_sender_address.clone(),
        from_name: globals.email_sender_name.clone(),
        to_address: to_address.to_string(),
        subject: format!("Reset your {} password", globals.site_name),
        body: format!("Your reset password code is {}.", code),
    }
}

/// Email service trait
#[async_trait]
pub trait EmailService: Send + Sync {
    async fn get_email(
        &self,
        requesting_user: &User,
        id: EmailId,
        include_user: bool,
    ) -> Result<Email, AppError>;

    async fn get_requesting_user_email(
        &self,
        requesting_user: &User,
        include_user: bool,
    ) -> Result<Email, AppError>;

    /// Mark the email activated and the owner verified.
    async fn activate_email(
        &self,
        requesting_user: &User,
        id: EmailId,
        activation_code: i32,
    ) -> Result<Email, AppError>;

    async fn resend_activation_code(&self, requesting_user: &User) -> Result<Email, AppError>;
}

/// EmailService implementation
pub struct EmailServiceImpl {
    email_repo: Arc<dyn EmailRepository>,
    user_repo: Arc<dyn UserRepository>,
    email_gateway: Arc<dyn EmailGateway>,
    globals: Arc<GlobalValues>,
}

impl EmailServiceImpl {
    pub fn new(
        email_repo: Arc<dyn EmailRepository>,
        user_repo: Arc<dyn UserRepository>,
        email_gateway: Arc<dyn EmailGateway>,
        globals: Arc<GlobalValues>,
    ) -> Self {
        Self {
            email_repo,
            user_repo,
            email_gateway,
            globals,
        }
    }

    fn not_found() -> AppError {
        AppError::not_found(ErrorName::EmailNotFound, "Email not found")
    }

    fn already_activated() -> AppError {
        AppError::conflict(ErrorName::EmailAlreadyActivated, "Email is already activated")
    }
}

#[async_trait]
impl EmailService for EmailServiceImpl {
    async fn get_email(
        &self,
        requesting_user: &User,
        id: EmailId,
        include_user: bool,
    ) -> Result<Email, AppError> {
        let email = self
            .email_repo
            .get_by_id(id, include_user)
            .await?
            .ok_or_else(Self::not_found)?;

        if email.user_id != requesting_user.id {
            return Err(AppError::forbidden(
                ErrorName::AccessDenied,
                "Email belongs to another user",
            ));
        }
        Ok(email)
    }

    async fn get_requesting_user_email(
        &self,
        requesting_user: &User,
        include_user: bool,
    ) -> Result<Email, AppError> {
        self.email_repo
            .get_by_user_id(requesting_user.id, include_user)
            .await?
            .ok_or_else(Self::not_found)
    }

    async fn activate_email(
        &self,
        requesting_user: &User,
        id: EmailId,
        activation_code: i32,
    ) -> Result<Email, AppError> {
        let mut email = self.get_email(requesting_user, id, false).await?;
        if email.is_activated() {
            return Err(Self::already_activated());
        }
        if email.activation.code != activation_code {
            return Err(AppError::validation(
                ErrorName::ActivationCodeIncorrect,
                FieldName::ActivationCode,
                "Activation code is incorrect",
            ));
        }

        email.activation.status = ActivationStatus::Activated;
        let activated = self.email_repo.update(&email).await?;

        let verified = async {
            let mut user = self
                .user_repo
                .get_by_id(requesting_user.id, UserInclude::NONE)
                .await?
                .ok_or_else(|| AppError::not_found(ErrorName::UserNotFound, "User not found"))?;
            user.state = UserState::Verified;
            self.user_repo.update(&user).await
        }
        .await;

        if let Err(err) = verified {
            email.activation.status = ActivationStatus::NotActivated;
            if let Err(revert_err) = self.email_repo.update(&email).await {
                tracing::error!(
                    email_id = %id,
                    error = %revert_err,
                    "Failed to revert email activation"
                );
            }
            return Err(err);
        }

        tracing::info!(user_id = %requesting_user.id, email_id = %id, "Email activated");
        Ok(activated)
    }

    async fn resend_activation_code(&self, requesting_user: &User) -> Result<Email, AppError> {
        let mut email = self.get_requesting_user_email(requesting_user, false).await?;
        if email.is_activated() {
            return Err(Self::already_activated());
        }

        email.activation.code = random::activation_code();
        let email = self.email_repo.update(&email).await?;
        self.email_gateway
            .send(activation_email(
                &self.globals,
                &email.address,
                email.activation.code,
            ))
            .await?;
        Ok(email)
    }
}
