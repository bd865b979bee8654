//! Key/value system settings.

use chrono::{DateTime, Utc};

use crate::model::setting::SystemSettingDto;

/// Setting holding the platform-wide default commission rate in basis points.
pub const DEFAULT_COMMISSION_RATE_KEY: &str = "commission.default_rate_bps";

/// Instructor share used when neither an override nor the setting exists.
pub const FALLBACK_COMMISSION_RATE_BPS: i32 = 7000;

#[derive(Debug, Clone, PartialEq)]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl SystemSetting {
    pub fn from_entity(entity: entity::system_setting::Model) -> Self {
        Self {
            key: entity.key,
            value: entity.value,
            description: entity.description,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> SystemSettingDto {
        SystemSettingDto {
            key: self.key,
            value: self.value,
            description: self.description,
            updated_at: self.updated_at,
        }
    }
}
