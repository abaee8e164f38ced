use super::{AccessTokenConverter, Converter, EmailConverter, SessionConverter};
use crate::domain::models::{User, UserState};
use crate::domain::value_objects::UserId;
use crate::infrastructure::entities::UserEntity;

#[derive(Debug, Clone, Copy, Default)]
pub struct UserConverter;

impl Converter for UserConverter {
    type Model = User;
    type Entity = UserEntity;

    fn to_entity(&self, user: &User) -> UserEntity {
        UserEntity {
            id: user.id.value(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            about: user.about.clone(),
            avatar_url: user.avatar_url.clone(),
            state: user.state.as_str().to_string(),
            password_hash: user.password_hash.clone(),
            reset_password_code: user.reset_password_code.clone(),
            created_at: user.created_at,
            modified_at: user.modified_at,
            email: user
                .email
                .as_ref()
                .map(|e| Box::new(EmailConverter.to_entity(&e.pure_copy()))),
            sessions: user.sessions.as_ref().map(|sessions| {
                sessions
                    .iter()
                    .map(|s| SessionConverter.to_entity(&s.pure_copy()))
                    .collect()
            }),
            access_tokens: user.access_tokens.as_ref().map(|tokens| {
                tokens
                    .iter()
                    .map(|t| AccessTokenConverter.to_entity(&t.pure_copy()))
                    .collect()
            }),
        }
    }

    fn to_model(&self, entity: &UserEntity) -> User {
        User {
            id: UserId::new(entity.id),
            username: entity.username.clone(),
            display_name: entity.display_name.clone(),
            about: entity.about.clone(),
            avatar_url: entity.avatar_url.clone(),
            state: UserState::from_db(&entity.state),
            password_hash: entity.password_hash.clone(),
            reset_password_code: entity.reset_password_code.clone(),
            created_at: entity.created_at,
            modified_at: entity.modified_at,
            email: entity
                .email
                .as_ref()
                .map(|e| Box::new(EmailConverter.to_model(&e.pure_copy()))),
            sessions: entity.sessions.as_ref().map(|sessions| {
                sessions
                    .iter()
                    .map(|s| SessionConverter.to_model(&s.pure_copy()))
                    .collect()
            }),
            access_tokens: entity.access_tokens.as_ref().map(|tokens| {
                tokens
                    .iter()
                    .map(|t| AccessTokenConverter.to_model(&t.pure_copy()))
                    .collect()
            }),
        }
    }
}
