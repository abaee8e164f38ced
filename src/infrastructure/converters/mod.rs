//! Converters
//!
//! Map domain models to persistence entities and back. Related models are
//! converted only when present, always from a pure copy, so a conversion
//! never recurses past one level.

mod access_token;
mod community;
mod community_membership;
mod email;
mod global;
mod post;
mod session;
mod user;

pub use access_token::AccessTokenConverter;
pub use community::CommunityConverter;
pub use community_membership::CommunityMembershipConverter;
pub use email::EmailConverter;
pub use global::GlobalConverter;
pub use post::PostConverter;
pub use session::SessionConverter;
pub use user::UserConverter;

/// Two-way mapping between a model and its entity.
pub trait Converter {
    type Model;
    type Entity;

    fn to_entity(&self, model: &Self::Model) -> Self::Entity;

    fn to_model(&self, entity: &Self::Entity) -> Self::Model;

    fn to_entity_opt(&self, model: Option<&Self::Model>) -> Option<Self::Entity> {
        model.map(|m| self.to_entity(m))
    }

    fn to_model_opt(&self, entity: Option<&Self::Entity>) -> Option<Self::Model> {
        entity.map(|e| self.to_model(e))
    }
}
