use super::{CommunityConverter, Converter, UserConverter};
use crate::domain::models::Post;
use crate::domain::value_objects::{CommunityId, PostId, UserId};
use crate::infrastructure::entities::PostEntity;

#[derive(Debug, Clone, Copy, Default)]
pub struct PostConverter {
    author_converter: UserConverter,
    community_converter: CommunityConverter,
}

impl PostConverter {
    pub fn new(author_converter: UserConverter, community_converter: CommunityConverter) -> Self {
        Self {
            author_converter,
            community_converter,
        }
    }
}

impl Converter for PostConverter {
    type Model = Post;
    type Entity = PostEntity;

    fn to_entity(&self, post: &Post) -> PostEntity {
        PostEntity {
            id: post.id.value(),
            author_id: post.author_id.value(),
            author_username: post.author_username.clone(),
            community_id: post.community_id.value(),
            community_name: post.community_name.clone(),
            vote: post.vote,
            content: post.content.clone(),
            created_at: post.created_at,
            modified_at: post.modified_at,
            author: post
                .author
                .as_ref()
                .map(|u| Box::new(self.author_converter.to_entity(&u.pure_copy()))),
            community: post
                .community
                .as_ref()
                .map(|c| Box::new(self.community_converter.to_entity(&c.pure_copy()))),
        }
    }

    fn to_model(&self, entity: &PostEntity) -> Post {
        Post {
            id: PostId::new(entity.id),
            author_id: UserId::new(entity.author_id),
            author_username: entity.author_username.clone(),
            community_id: CommunityId::new(entity.community_id),
            community_name: entity.community_name.clone(),
            vote: entity.vote,
            content: entity.content.clone(),
            created_at: entity.created_at,
            modified_at: entity.modified_at,
            author: entity
                .author
                .as_ref()
                .map(|u| Box::new(self.author_converter.to_model(&u.pure_copy()))),
            community: entity
                .community
                .as_ref()
                .map(|c| Box::new(self.community_converter.to_model(&c.pure_copy()))),
        }
    }
}
