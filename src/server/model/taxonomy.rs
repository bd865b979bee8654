//! Tags and difficulty levels used to classify courses.

use crate::model::taxonomy::{DifficultyDto, DifficultyInputDto, TagDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn from_entity(entity: entity::tag::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
        }
    }

    pub fn into_dto(self) -> TagDto {
        TagDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Difficulty {
    pub id: i32,
    /// Lowercase identifier such as `beginner`.
    pub level: String,
    pub display_name: String,
    pub sort_order: i32,
    pub description: Option<String>,
}

impl Difficulty {
    pub fn from_entity(entity: entity::difficulty_configuration::Model) -> Self {
        Self {
            id: entity.id,
            level: entity.level,
            display_name: entity.display_name,
            sort_order: entity.sort_order,
            description: entity.description,
        }
    }

    pub fn into_dto(self) -> DifficultyDto {
        DifficultyDto {
            id: self.id,
            level: self.level,
            display_name: self.display_name,
            sort_order: self.sort_order,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DifficultyParams {
    pub level: String,
    pub display_name: String,
    pub sort_order: i32,
    pub description: Option<String>,
}

impl From<DifficultyInputDto> for DifficultyParams {
    fn from(dto: DifficultyInputDto) -> Self {
        Self {
            level: dto.level,
            display_name: dto.display_name,
            sort_order: dto.sort_order,
            description: dto.description,
        }
    }
}
