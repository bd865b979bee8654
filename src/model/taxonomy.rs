use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct TagDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TagInputDto {
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct DifficultyDto {
    pub id: i32,
    pub level: String,
    pub display_name: String,
    pub sort_order: i32,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DifficultyInputDto {
    pub level: String,
    pub display_name: String,
    #[serde(default)]
    pub sort_order: i32,
    pub description: Option<String>,
}
