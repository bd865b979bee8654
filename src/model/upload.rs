use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct InitUploadDto {
    pub filename: String,
    pub total_size: i64,
    /// Defaults to 5 MiB.
    pub chunk_size: Option<i64>,
    /// Expected SHA-256 of the whole file, hex encoded.
    pub sha256: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UploadDto {
    pub id: String,
    pub filename: String,
    pub total_size: i64,
    pub chunk_size: i64,
    pub total_chunks: i32,
    /// `in_progress`, `completed` or `failed`.
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UploadStatusDto {
    pub upload: UploadDto,
    pub received_chunks: Vec<i32>,
}
