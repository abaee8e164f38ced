//! User Service
//!
//! Sign-up, login, profile and password operations.
//!
//! Sign-up and login write through several repositories. When a later step
//! fails, the rows written by earlier steps are deleted again before the
//! original error is returned.

use std::sync::Arc;

use async_trait::async_trait;

use super::access_token_service::AccessTokenService;
use super::email_service::{activation_email, reset_password_email};
use super::session_service::SessionService;
use crate::domain::gateways::EmailGateway;
use crate::domain::validators::{
    LogInWithEmailInput, LogInWithUsernameInput, ResetPasswordWithCodeInput,
    SignUpWithEmailInput, UpdateUserInput,
};
use crate::domain::{
    AccessToken, Email, EmailAddress, EmailId, EmailRepository, GlobalValues, IdOrName, Password,
    Session, User, UserId, UserInclude, UserRepository,
};
use crate::shared::error::{AppError, ErrorName, FieldName};
use crate::shared::random;
use crate::shared::snowflake::SnowflakeGenerator;

/// A user together with the credentials issued by sign-up or login.
#[derive(Debug, Clone)]
pub struct SignedInUser {
    pub user: User,
    pub session: Session,
    pub access_token: AccessToken,
}

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    async fn sign_up_with_email(
        &self,
        input: SignUpWithEmailInput,
        ip_address: Option<String>,
    ) -> Result<SignedInUser, AppError>;

    async fn log_in_with_email(
        &self,
        input: LogInWithEmailInput,
        ip_address: Option<String>,
    ) -> Result<SignedInUser, AppError>;

    async fn log_in_with_username(
        &self,
        input: LogInWithUsernameInput,
        ip_address: Option<String>,
    ) -> Result<SignedInUser, AppError>;

    /// Another user's private relations are never returned.
    async fn get_user(
        &self,
        requesting_user: &User,
        id_or_username: IdOrName<UserId>,
        include: UserInclude,
    ) -> Result<User, AppError>;

    async fn get_requesting_user(
        &self,
        requesting_user: &User,
        include: UserInclude,
    ) -> Result<User, AppError>;

    async fn update_requesting_user(
        &self,
        requesting_user: &User,
        input: UpdateUserInput,
    ) -> Result<User, AppError>;

    /// Only for accounts that have no password yet.
    async fn create_requesting_user_password(
        &self,
        requesting_user: &User,
        password: Password,
    ) -> Result<User, AppError>;

    async fn send_reset_password_code(&self, email_address: EmailAddress) -> Result<(), AppError>;

    async fn reset_password_with_code(&self, input: ResetPasswordWithCodeInput)
        -> Result<(), AppError>;

    async fn delete_requesting_user(&self, requesting_user: &User) -> Result<(), AppError>;
}

/// UserService implementation
pub struct UserServiceImpl {
    user_repo: Arc<dyn UserRepository>,
    email_repo: Arc<dyn EmailRepository>,
    session_service: Arc<dyn SessionService>,
    access_token_service: Arc<dyn AccessTokenService>,
    email_gateway: Arc<dyn EmailGateway>,
    id_generator: Arc<SnowflakeGenerator>,
    globals: Arc<GlobalValues>,
}

impl UserServiceImpl {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        email_repo: Arc<dyn EmailRepository>,
        session_service: Arc<dyn SessionService>,
        access_token_service: Arc<dyn AccessTokenService>,
        email_gateway: Arc<dyn EmailGateway>,
        id_generator: Arc<SnowflakeGenerator>,
        globals: Arc<GlobalValues>,
    ) -> Self {
        Self {
            user_repo,
            email_repo,
            session_service,
            access_token_service,
            email_gateway,
            id_generator,
            globals,
        }
    }

    fn authentication_failed() -> AppError {
        AppError::unauthorized(
            ErrorName::AuthenticationFailed,
            "Invalid credentials",
        )
    }

    fn user_not_found() -> AppError {
        AppError::not_found(ErrorName::UserNotFound, "User not found")
    }

    async fn load(&self, id: UserId, include: UserInclude) -> Result<User, AppError> {
        self.user_repo
            .get_by_id(id, include)
            .await?
            .ok_or_else(Self::user_not_found)
    }

    /// Delete a half-created account and hand back the error that stopped it.
    async fn compensate(&self, user_id: UserId, err: AppError) -> AppError {
        if let Err(cleanup_err) = self.user_repo.delete(user_id).await {
            tracing::error!(
                user_id = %user_id,
                error = %cleanup_err,
                "Failed to remove partially created user"
            );
        }
        err
    }

    async fn open_session(
        &self,
        user: User,
        ip_address: Option<String>,
    ) -> Result<SignedInUser, AppError> {
        let session = self
            .session_service
            .create_session(user.id, ip_address)
            .await?;
        let access_token = match self
            .access_token_service
            .create_access_token(user.id, session.id)
            .await
        {
            Ok(token) => token,
            Err(err) => {
                if let Err(cleanup_err) = self.session_service.revoke_session(&user, session.id).await
                {
                    tracing::error!(
                        session_id = %session.id,
                        error = %cleanup_err,
                        "Failed to close orphaned session"
                    );
                }
                return Err(err);
            }
        };

        Ok(SignedInUser {
            user,
            session,
            access_token,
        })
    }

    async fn log_in(
        &self,
        user: Option<User>,
        password: &Password,
        ip_address: Option<String>,
    ) -> Result<SignedInUser, AppError> {
        let user = user.ok_or_else(Self::authentication_failed)?;
        let verified = user
            .password_hash
            .as_deref()
            .is_some_and(|hash| password.verify(hash));
        if !verified {
            tracing::debug!(user_id = %user.id, "Login rejected");
            return Err(Self::authentication_failed());
        }

        let signed_in = self.open_session(user, ip_address).await?;
        tracing::info!(user_id = %signed_in.user.id, "User logged in");
        Ok(signed_in)
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn sign_up_with_email(
        &self,
        input: SignUpWithEmailInput,
        ip_address: Option<String>,
    ) -> Result<SignedInUser, AppError> {
        if self
            .user_repo
            .exists_by_username(input.username.as_str())
            .await?
        {
            return Err(AppError::conflict(
                ErrorName::UsernameExists,
                "Username already exists",
            ));
        }
        if self
            .email_repo
            .exists_by_address(input.email_address.as_str())
            .await?
        {
            return Err(AppError::conflict(
                ErrorName::EmailAddressExists,
                "Email address already exists",
            ));
        }

        let password_hash = input.password.hash()?;
        let user = User::new(
            UserId::new(self.id_generator.generate()),
            input.username.into_inner(),
            Some(password_hash),
        );
        let mut user = self.user_repo.create(&user).await?;

        let email = Email::new(
            EmailId::new(self.id_generator.generate()),
            user.id,
            input.email_address.into_inner(),
            random::activation_code(),
        );
        let email = match self.email_repo.create(&email).await {
            Ok(email) => email,
            Err(err) => return Err(self.compensate(user.id, err).await),
        };

        let mail = activation_email(&self.globals, &email.address, email.activation.code);
        if let Err(err) = self.email_gateway.send(mail).await {
            tracing::warn!(user_id = %user.id, error = %err, "Activation email not sent");
        }

        let user_id = user.id;
        user.email = Some(Box::new(email));
        let signed_in = match self.open_session(user, ip_address).await {
            Ok(signed_in) => signed_in,
            // Deleting the user cascades to its email and session rows.
            Err(err) => return Err(self.compensate(user_id, err).await),
        };

        tracing::info!(
            user_id = %signed_in.user.id,
            username = %signed_in.user.username,
            "User signed up"
        );
        Ok(signed_in)
    }

    async fn log_in_with_email(
        &self,
        input: LogInWithEmailInput,
        ip_address: Option<String>,
    ) -> Result<SignedInUser, AppError> {
        let user = match self
            .email_repo
            .get_by_address(input.email_address.as_str(), false)
            .await?
        {
            Some(email) => self.user_repo.get_by_id(email.user_id, UserInclude::NONE).await?,
            None => None,
        };
        self.log_in(user, &input.password, ip_address).await
    }

    async fn log_in_with_username(
        &self,
        input: LogInWithUsernameInput,
        ip_address: Option<String>,
    ) -> Result<SignedInUser, AppError> {
        let user = self
            .user_repo
            .get_by_username(input.username.as_str(), UserInclude::NONE)
            .await?;
        self.log_in(user, &input.password, ip_address).await
    }

    async fn get_user(
        &self,
        requesting_user: &User,
        id_or_username: IdOrName<UserId>,
        include: UserInclude,
    ) -> Result<User, AppError> {
        let user = match id_or_username {
            IdOrName::Id(id) => self.user_repo.get_by_id(id, include).await?,
            IdOrName::Name(username) => {
                self.user_repo.get_by_username(&username, include).await?
            }
        };
        let mut user = user.ok_or_else(Self::user_not_found)?;

        if user.id != requesting_user.id {
            user.email = None;
            user.sessions = None;
            user.access_tokens = None;
        }
        Ok(user)
    }

    async fn get_requesting_user(
        &self,
        requesting_user: &User,
        include: UserInclude,
    ) -> Result<User, AppError> {
        self.load(requesting_user.id, include).await
    }

    async fn update_requesting_user(
        &self,
        requesting_user: &User,
        input: UpdateUserInput,
    ) -> Result<User, AppError> {
        let mut user = self.load(requesting_user.id, UserInclude::NONE).await?;
        if let Some(display_name) = input.display_name {
            user.display_name = Some(display_name);
        }
        if let Some(about) = input.about {
            user.about = Some(about);
        }
        if let Some(avatar_url) = input.avatar_url {
            user.avatar_url = Some(avatar_url);
        }
        self.user_repo.update(&user).await
    }

    async fn create_requesting_user_password(
        &self,
        requesting_user: &User,
        password: Password,
    ) -> Result<User, AppError> {
        let mut user = self.load(requesting_user.id, UserInclude::NONE).await?;
        if user.has_password() {
            return Err(AppError::conflict(
                ErrorName::PasswordExists,
                "User already has a password",
            ));
        }
        user.password_hash = Some(password.hash()?);
        self.user_repo.update(&user).await
    }

    async fn send_reset_password_code(&self, email_address: EmailAddress) -> Result<(), AppError> {
        let email = self
            .email_repo
            .get_by_address(email_address.as_str(), false)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorName::EmailNotFound, "Email not found"))?;
        let mut user = self.load(email.user_id, UserInclude::NONE).await?;

        let code = random::reset_password_code();
        user.reset_password_code = Some(code.clone());
        self.user_repo.update(&user).await?;

        self.email_gateway
            .send(reset_password_email(&self.globals, &email.address, &code))
            .await?;
        tracing::info!(user_id = %user.id, "Reset password code sent");
        Ok(())
    }

    async fn reset_password_with_code(
        &self,
        input: ResetPasswordWithCodeInput,
    ) -> Result<(), AppError> {
        let email = self
            .email_repo
            .get_by_address(input.email_address.as_str(), false)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorName::EmailNotFound, "Email not found"))?;
        let mut user = self.load(email.user_id, UserInclude::NONE).await?;

        if user.reset_password_code.as_deref() != Some(input.reset_password_code.as_str()) {
            return Err(AppError::validation(
                ErrorName::ResetPasswordCodeIncorrect,
                FieldName::ResetPasswordCode,
                "Reset password code is incorrect",
            ));
        }

        user.password_hash = Some(input.new_password.hash()?);
        user.reset_password_code = None;
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.id, "Password reset");
        Ok(())
    }

    async fn delete_requesting_user(&self, requesting_user: &User) -> Result<(), AppError> {
        self.user_repo.delete(requesting_user.id).await?;
        tracing::info!(user_id = %requesting_user.id, "User deleted");
        Ok(())
    }
}
