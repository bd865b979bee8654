//! Upload session repository.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use crate::server::model::upload::{Upload, UploadStatus};

pub struct UploadRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UploadRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        id: String,
        user_id: i32,
        filename: String,
        total_size: i64,
        chunk_size: i64,
        total_chunks: i32,
        sha256: String,
    ) -> Result<Upload, DbErr> {
        let entity = entity::upload::ActiveModel {
            id: ActiveValue::Set(id),
            user_id: ActiveValue::Set(user_id),
            filename: ActiveValue::Set(filename),
            total_size: ActiveValue::Set(total_size),
            chunk_size: ActiveValue::Set(chunk_size),
            total_chunks: ActiveValue::Set(total_chunks),
            sha256: ActiveValue::Set(sha256),
            status: ActiveValue::Set(UploadStatus::InProgress.as_str().to_string()),
            stored_path: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            completed_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Upload::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Upload>, DbErr> {
        entity::prelude::Upload::find_by_id(id.to_string())
            .one(self.db)
            .await?
            .map(Upload::from_entity)
            .transpose()
    }

    /// Marks an upload completed and records where the assembled file lives.
    pub async fn mark_completed(&self, id: &str, stored_path: String) -> Result<Option<Upload>, DbErr> {
        let Some(existing) = entity::prelude::Upload::find_by_id(id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::upload::ActiveModel = existing.into();
        active.status = ActiveValue::Set(UploadStatus::Completed.as_str().to_string());
        active.stored_path = ActiveValue::Set(Some(stored_path));
        active.completed_at = ActiveValue::Set(Some(Utc::now()));

        Upload::from_entity(active.update(self.db).await?).map(Some)
    }

    pub async fn mark_failed(&self, id: &str) -> Result<(), DbErr> {
        if let Some(existing) = entity::prelude::Upload::find_by_id(id.to_string())
            .one(self.db)
            .await?
        {
            let mut active: entity::upload::ActiveModel = existing.into();
            active.status = ActiveValue::Set(UploadStatus::Failed.as_str().to_string());
            active.update(self.db).await?;
        }

        Ok(())
    }
}
