//! Difficulty configuration repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::taxonomy::{Difficulty, DifficultyParams};

pub struct DifficultyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DifficultyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: DifficultyParams) -> Result<Difficulty, DbErr> {
        let entity = entity::difficulty_configuration::ActiveModel {
            level: ActiveValue::Set(params.level),
            display_name: ActiveValue::Set(params.display_name),
            sort_order: ActiveValue::Set(params.sort_order),
            description: ActiveValue::Set(params.description),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Difficulty::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Difficulty>, DbErr> {
        Ok(entity::prelude::DifficultyConfiguration::find_by_id(id)
            .one(self.db)
            .await?
            .map(Difficulty::from_entity))
    }

    pub async fn find_by_level(&self, level: &str) -> Result<Option<Difficulty>, DbErr> {
        Ok(entity::prelude::DifficultyConfiguration::find()
            .filter(entity::difficulty_configuration::Column::Level.eq(level))
            .one(self.db)
            .await?
            .map(Difficulty::from_entity))
    }

    /// All levels ordered by `sort_order`.
    pub async fn get_all(&self) -> Result<Vec<Difficulty>, DbErr> {
        Ok(entity::prelude::DifficultyConfiguration::find()
            .order_by_asc(entity::difficulty_configuration::Column::SortOrder)
            .order_by_asc(entity::difficulty_configuration::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Difficulty::from_entity)
            .collect())
    }

    pub async fn update(&self, id: i32, params: DifficultyParams) -> Result<Option<Difficulty>, DbErr> {
        let Some(existing) = entity::prelude::DifficultyConfiguration::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::difficulty_configuration::ActiveModel = existing.into();
        active.level = ActiveValue::Set(params.level);
        active.display_name = ActiveValue::Set(params.display_name);
        active.sort_order = ActiveValue::Set(params.sort_order);
        active.description = ActiveValue::Set(params.description);

        Ok(Some(Difficulty::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::DifficultyConfiguration::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }
}
