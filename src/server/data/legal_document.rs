//! Legal document repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::legal::{CreateLegalDocumentParams, LegalDocument};

pub struct LegalDocumentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LegalDocumentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an inactive document version.
    pub async fn create(&self, params: CreateLegalDocumentParams) -> Result<LegalDocument, DbErr> {
        let entity = entity::legal_document::ActiveModel {
            document_type: ActiveValue::Set(params.document_type),
            version: ActiveValue::Set(params.version),
            title: ActiveValue::Set(params.title),
            content: ActiveValue::Set(params.content),
            is_active: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            activated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(LegalDocument::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<LegalDocument>, DbErr> {
        Ok(entity::prelude::LegalDocument::find_by_id(id)
            .one(self.db)
            .await?
            .map(LegalDocument::from_entity))
    }

    pub async fn version_exists(&self, document_type: &str, version: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::LegalDocument::find()
            .filter(entity::legal_document::Column::DocumentType.eq(document_type))
            .filter(entity::legal_document::Column::Version.eq(version))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn find_active(&self, document_type: &str) -> Result<Option<LegalDocument>, DbErr> {
        Ok(entity::prelude::LegalDocument::find()
            .filter(entity::legal_document::Column::DocumentType.eq(document_type))
            .filter(entity::legal_document::Column::IsActive.eq(true))
            .one(self.db)
            .await?
            .map(LegalDocument::from_entity))
    }

    /// Versions of a document type, newest first.
    pub async fn get_by_type(&self, document_type: &str) -> Result<Vec<LegalDocument>, DbErr> {
        Ok(entity::prelude::LegalDocument::find()
            .filter(entity::legal_document::Column::DocumentType.eq(document_type))
            .order_by_desc(entity::legal_document::Column::CreatedAt)
            .order_by_desc(entity::legal_document::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(LegalDocument::from_entity)
            .collect())
    }

    /// Deactivates every version of the type, then activates `id`.
    pub async fn activate(&self, id: i32, document_type: &str) -> Result<Option<LegalDocument>, DbErr> {
        entity::prelude::LegalDocument::update_many()
            .filter(entity::legal_document::Column::DocumentType.eq(document_type))
            .col_expr(
                entity::legal_document::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .exec(self.db)
            .await?;

        let Some(existing) = entity::prelude::LegalDocument::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::legal_document::ActiveModel = existing.into();
        active.is_active = ActiveValue::Set(true);
        active.activated_at = ActiveValue::Set(Some(Utc::now()));

        Ok(Some(LegalDocument::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::LegalDocument::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }
}
