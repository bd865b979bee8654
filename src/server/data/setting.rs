//! System setting repository.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::server::model::setting::SystemSetting;

pub struct SettingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SettingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<SystemSetting>, DbErr> {
        Ok(entity::prelude::SystemSetting::find()
            .order_by_asc(entity::system_setting::Column::Key)
            .all(self.db)
            .await?
            .into_iter()
            .map(SystemSetting::from_entity)
            .collect())
    }

    pub async fn find(&self, key: &str) -> Result<Option<SystemSetting>, DbErr> {
        Ok(entity::prelude::SystemSetting::find_by_id(key.to_string())
            .one(self.db)
            .await?
            .map(SystemSetting::from_entity))
    }

    /// Inserts or replaces a setting value.
    ///
    /// The description is only replaced when one is given.
    pub async fn upsert(
        &self,
        key: String,
        value: String,
        description: Option<String>,
    ) -> Result<SystemSetting, DbErr> {
        let mut update_columns = vec![
            entity::system_setting::Column::Value,
            entity::system_setting::Column::UpdatedAt,
        ];
        if description.is_some() {
            update_columns.push(entity::system_setting::Column::Description);
        }

        let entity = entity::prelude::SystemSetting::insert(entity::system_setting::ActiveModel {
            key: ActiveValue::Set(key),
            value: ActiveValue::Set(value),
            description: ActiveValue::Set(description),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::system_setting::Column::Key)
                .update_columns(update_columns)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(SystemSetting::from_entity(entity))
    }
}
