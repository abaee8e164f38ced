use super::{Converter, UserConverter};
use crate::domain::models::{Session, SessionState};
use crate::domain::value_objects::{SessionId, UserId};
use crate::infrastructure::entities::SessionEntity;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConverter;

impl Converter for SessionConverter {
    type Model = Session;
    type Entity = SessionEntity;

    fn to_entity(&self, session: &Session) -> SessionEntity {
        SessionEntity {
            id: session.id.value(),
            user_id: session.user_id.value(),
            ip_address: session.ip_address.clone(),
            state: session.state.as_str().to_string(),
            created_at: session.created_at,
            modified_at: session.modified_at,
            user: session
                .user
                .as_ref()
                .map(|u| Box::new(UserConverter.to_entity(&u.pure_copy()))),
        }
    }

    fn to_model(&self, entity: &SessionEntity) -> Session {
        Session {
            id: SessionId::new(entity.id),
            user_id: UserId::new(entity.user_id),
            ip_address: entity.ip_address.clone(),
            state: SessionState::from_db(&entity.state),
            created_at: entity.created_at,
            modified_at: entity.modified_at,
            user: entity
                .user
                .as_ref()
                .map(|u| Box::new(UserConverter.to_model(&u.pure_copy()))),
        }
    }
}
