//! Chunked upload session model.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::upload::UploadDto;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    InProgress,
    Completed,
    Failed,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::InProgress => "in_progress",
            UploadStatus::Completed => "completed",
            UploadStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in_progress" => Some(UploadStatus::InProgress),
            "completed" => Some(UploadStatus::Completed),
            "failed" => Some(UploadStatus::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub id: String,
    pub user_id: i32,
    pub filename: String,
    pub total_size: i64,
    pub chunk_size: i64,
    pub total_chunks: i32,
    /// Expected SHA-256 of the assembled file, lowercase hex.
    pub sha256: String,
    pub status: UploadStatus,
    pub stored_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Upload {
    pub fn from_entity(entity: entity::upload::Model) -> Result<Self, DbErr> {
        let status = UploadStatus::parse(&entity.status)
            .ok_or_else(|| DbErr::Custom(format!("Unknown upload status '{}'", entity.status)))?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            filename: entity.filename,
            total_size: entity.total_size,
            chunk_size: entity.chunk_size,
            total_chunks: entity.total_chunks,
            sha256: entity.sha256,
            status,
            stored_path: entity.stored_path,
            created_at: entity.created_at,
            completed_at: entity.completed_at,
        })
    }

    pub fn into_dto(self) -> UploadDto {
        UploadDto {
            id: self.id,
            filename: self.filename,
            total_size: self.total_size,
            chunk_size: self.chunk_size,
            total_chunks: self.total_chunks,
            status: self.status.as_str().to_string(),
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }

    /// Expected byte length of chunk `index`; the last chunk holds the remainder.
    pub fn expected_chunk_len(&self, index: i32) -> i64 {
        if index == self.total_chunks - 1 {
            self.total_size - self.chunk_size * (self.total_chunks as i64 - 1)
        } else {
            self.chunk_size
        }
    }
}

#[derive(Debug, Clone)]
pub struct InitUploadParams {
    pub filename: String,
    pub total_size: i64,
    pub chunk_size: Option<i64>,
    pub sha256: String,
}
