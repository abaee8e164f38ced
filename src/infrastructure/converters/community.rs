use super::{Converter, UserConverter};
use crate::domain::models::Community;
use crate::domain::value_objects::{CommunityId, UserId};
use crate::infrastructure::entities::CommunityEntity;

#[derive(Debug, Clone, Copy, Default)]
pub struct CommunityConverter {
    creator_converter: UserConverter,
}

impl CommunityConverter {
    pub fn new(creator_converter: UserConverter) -> Self {
        Self { creator_converter }
    }
}

impl Converter for CommunityConverter {
    type Model = Community;
    type Entity = CommunityEntity;

    fn to_entity(&self, community: &Community) -> CommunityEntity {
        CommunityEntity {
            id: community.id.value(),
            name: community.name.clone(),
            creator_id: community.creator_id.value(),
            creator_username: community.creator_username.clone(),
            created_at: community.created_at,
            modified_at: community.modified_at,
            creator: community
                .creator
                .as_ref()
                .map(|u| Box::new(self.creator_converter.to_entity(&u.pure_copy()))),
        }
    }

    fn to_model(&self, entity: &CommunityEntity) -> Community {
        Community {
            id: CommunityId::new(entity.id),
            name: entity.name.clone(),
            creator_id: UserId::new(entity.creator_id),
            creator_username: entity.creator_username.clone(),
            created_at: entity.created_at,
            modified_at: entity.modified_at,
            creator: entity
                .creator
                .as_ref()
                .map(|u| Box::new(self.creator_converter.to_model(&u.pure_copy()))),
        }
    }
}
