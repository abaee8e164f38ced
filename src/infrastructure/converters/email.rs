use super::{Converter, UserConverter};
use crate::domain::models::{Activation, ActivationStatus, Email};
use crate::domain::value_objects::{EmailId, UserId};
use crate::infrastructure::entities::EmailEntity;

#[derive(Debug, Clone, Copy, Default)]
pub struct EmailConverter;

impl Converter for EmailConverter {
    type Model = Email;
    type Entity = EmailEntity;

    fn to_entity(&self, email: &Email) -> EmailEntity {
        EmailEntity {
            id: email.id.value(),
            user_id: email.user_id.value(),
            address: email.address.clone(),
            activation_status: email.activation.status.as_str().to_string(),
            activation_code: email.activation.code,
            created_at: email.created_at,
            modified_at: email.modified_at,
            user: email
                .user
                .as_ref()
                .map(|u| Box::new(UserConverter.to_entity(&u.pure_copy()))),
        }
    }

    fn to_model(&self, entity: &EmailEntity) -> Email {
        Email {
            id: EmailId::new(entity.id),
            user_id: UserId::new(entity.user_id),
            address: entity.address.clone(),
            activation: Activation {
                status: ActivationStatus::from_db(&entity.activation_status),
                code: entity.activation_code,
            },
            created_at: entity.created_at,
            modified_at: entity.modified_at,
            user: entity
                .user
                .as_ref()
                .map(|u| Box::new(UserConverter.to_model(&u.pure_copy()))),
        }
    }
}
