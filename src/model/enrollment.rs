use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct EnrollmentDto {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub transaction_id: Option<i32>,
    /// `active` or `revoked`.
    pub status: String,
    pub progress_percent: i32,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UpdateProgressDto {
    pub progress_percent: i32,
}
