use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct LegalDocumentDto {
    pub id: i32,
    pub document_type: String,
    pub version: String,
    pub title: String,
    /// Markdown source.
    pub content: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub activated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RenderedLegalDocumentDto {
    pub document_type: String,
    pub version: String,
    pub title: String,
    pub html: String,
    pub activated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreateLegalDocumentDto {
    pub document_type: String,
    pub version: String,
    pub title: String,
    pub content: String,
}
