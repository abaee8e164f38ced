use sqlx::types::Json;

use super::Converter;
use crate::domain::models::Global;
use crate::domain::value_objects::GlobalId;
use crate::infrastructure::entities::GlobalEntity;

#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalConverter;

impl Converter for GlobalConverter {
    type Model = Global;
    type Entity = GlobalEntity;

    fn to_entity(&self, global: &Global) -> GlobalEntity {
        GlobalEntity {
            id: global.id.value(),
            values: Json(global.values.clone()),
            created_at: global.created_at,
            modified_at: global.modified_at,
        }
    }

    fn to_model(&self, entity: &GlobalEntity) -> Global {
        // The table carries CHECK (id IN (1, 2)).
        let id = GlobalId::from_value(entity.id).unwrap_or_else(|| {
            tracing::warn!(id = entity.id, "Unknown global id, treating as main");
            GlobalId::Main
        });
        Global {
            id,
            values: entity.values.0.clone(),
            created_at: entity.created_at,
            modified_at: entity.modified_at,
        }
    }
}
