use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub name: String,
    /// `student`, `instructor` or `admin`.
    pub role: String,
    pub commission_rate_bps: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SetRoleDto {
    pub role: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SetCommissionRateDto {
    /// Basis points, `null` removes the override.
    pub commission_rate_bps: Option<i32>,
}
