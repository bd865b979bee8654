use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct InstructorApplicationDto {
    pub id: i32,
    pub user_id: i32,
    pub bio: String,
    pub expertise: String,
    pub website: Option<String>,
    /// `pending`, `approved` or `rejected`.
    pub status: String,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SubmitApplicationDto {
    pub bio: String,
    pub expertise: String,
    pub website: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RejectApplicationDto {
    pub reason: String,
}
