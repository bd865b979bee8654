//! System settings with typed access to the values services depend on.

use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::setting::SettingRepository,
    error::AppError,
    model::{
        audit::AuditEntry,
        setting::{SystemSetting, DEFAULT_COMMISSION_RATE_KEY, FALLBACK_COMMISSION_RATE_BPS},
        user::User,
    },
    service::audit::AuditService,
    util::validation::sanitize_text,
};

const KEY_MAX_LEN: usize = 100;

pub struct SettingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SettingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<SystemSetting>, AppError> {
        Ok(SettingRepository::new(self.db).get_all().await?)
    }

    pub async fn get(&self, key: &str) -> Result<SystemSetting, AppError> {
        SettingRepository::new(self.db)
            .find(key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Setting '{}' not found", key)))
    }

    /// Creates or replaces a setting.
    ///
    /// Keys with a typed meaning are validated, e.g. the default commission rate must be
    /// an integer in `0..=10000`.
    pub async fn upsert(
        &self,
        actor: &User,
        key: &str,
        value: &str,
        description: Option<String>,
    ) -> Result<SystemSetting, AppError> {
        let key = key.trim();
        if key.is_empty()
            || key.len() > KEY_MAX_LEN
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(AppError::BadRequest(format!("Invalid setting key '{}'", key)));
        }

        let value = value.trim();
        if key == DEFAULT_COMMISSION_RATE_KEY {
            parse_rate(value).ok_or_else(|| {
                AppError::BadRequest(
                    "Commission rate must be an integer between 0 and 10000".to_string(),
                )
            })?;
        }

        let setting = SettingRepository::new(self.db)
            .upsert(
                key.to_string(),
                value.to_string(),
                description.map(|d| sanitize_text(&d)),
            )
            .await?;

        tracing::info!(key, "Setting updated");

        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(actor.id), "setting.upsert", "system_setting")
                    .entity_id(key)
                    .details(json!({ "value": value })),
            )
            .await?;

        Ok(setting)
    }

    /// Platform-wide commission rate paid to instructors, in basis points.
    ///
    /// Falls back to 7000 when the setting is missing or holds an invalid value.
    pub async fn default_commission_rate_bps(&self) -> Result<i32, AppError> {
        let setting = SettingRepository::new(self.db)
            .find(DEFAULT_COMMISSION_RATE_KEY)
            .await?;

        Ok(match setting {
            Some(setting) => parse_rate(&setting.value).unwrap_or_else(|| {
                tracing::warn!(value = %setting.value, "Invalid default commission rate setting");
                FALLBACK_COMMISSION_RATE_BPS
            }),
            None => FALLBACK_COMMISSION_RATE_BPS,
        })
    }
}

fn parse_rate(value: &str) -> Option<i32> {
    value
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|rate| (0..=10_000).contains(rate))
}
