use super::{CommunityConverter, Converter, UserConverter};
use crate::domain::models::CommunityMembership;
use crate::domain::value_objects::{CommunityId, CommunityMembershipId, UserId};
use crate::infrastructure::entities::CommunityMembershipEntity;

#[derive(Debug, Clone, Copy, Default)]
pub struct CommunityMembershipConverter {
    user_converter: UserConverter,
    community_converter: CommunityConverter,
}

impl CommunityMembershipConverter {
    pub fn new(user_converter: UserConverter, community_converter: CommunityConverter) -> Self {
        Self {
            user_converter,
            community_converter,
        }
    }
}

impl Converter for CommunityMembershipConverter {
    type Model = CommunityMembership;
    type Entity = CommunityMembershipEntity;

    fn to_entity(&self, membership: &CommunityMembership) -> CommunityMembershipEntity {
        CommunityMembershipEntity {
            id: membership.id.value(),
            user_id: membership.user_id.value(),
            username: membership.username.clone(),
            community_id: membership.community_id.value(),
            community_name: membership.community_name.clone(),
            created_at: membership.created_at,
            modified_at: membership.modified_at,
            user: membership
                .user
                .as_ref()
                .map(|u| Box::new(self.user_converter.to_entity(&u.pure_copy()))),
            community: membership
                .community
                .as_ref()
                .map(|c| Box::new(self.community_converter.to_entity(&c.pure_copy()))),
        }
    }

    fn to_model(&self, entity: &CommunityMembershipEntity) -> CommunityMembership {
        CommunityMembership {
            id: CommunityMembershipId::new(entity.id),
            user_id: UserId::new(entity.user_id),
            username: entity.username.clone(),
            community_id: CommunityId::new(entity.community_id),
            community_name: entity.community_name.clone(),
            created_at: entity.created_at,
            modified_at: entity.modified_at,
            user: entity
                .user
                .as_ref()
                .map(|u| Box::new(self.user_converter.to_model(&u.pure_copy()))),
            community: entity
                .community
                .as_ref()
                .map(|c| Box::new(self.community_converter.to_model(&c.pure_copy()))),
        }
    }
}
