use super::{Converter, UserConverter};
use crate::domain::models::AccessToken;
use crate::domain::value_objects::{AccessTokenId, SessionId, UserId};
use crate::infrastructure::entities::AccessTokenEntity;

#[derive(Debug, Clone, Copy, Default)]
pub struct AccessTokenConverter;

impl Converter for AccessTokenConverter {
    type Model = AccessToken;
    type Entity = AccessTokenEntity;

    fn to_entity(&self, token: &AccessToken) -> AccessTokenEntity {
        AccessTokenEntity {
            id: token.id.value(),
            user_id: token.user_id.value(),
            session_id: token.session_id.value(),
            value: token.value.clone(),
            created_at: token.created_at,
            modified_at: token.modified_at,
            user: token
                .user
                .as_ref()
                .map(|u| Box::new(UserConverter.to_entity(&u.pure_copy()))),
        }
    }

    fn to_model(&self, entity: &AccessTokenEntity) -> AccessToken {
        AccessToken {
            id: AccessTokenId::new(entity.id),
            user_id: UserId::new(entity.user_id),
            session_id: SessionId::new(entity.session_id),
            value: entity.value.clone(),
            created_at: entity.created_at,
            modified_at: entity.modified_at,
            user: entity
                .user
                .as_ref()
                .map(|u| Box::new(UserConverter.to_model(&u.pure_copy()))),
        }
    }
}
