//! Versioned legal documents.

use chrono::{DateTime, Utc};

use crate::model::legal::{CreateLegalDocumentDto, LegalDocumentDto, RenderedLegalDocumentDto};

/// Kinds of legal document the platform publishes.
pub const DOCUMENT_TYPES: [&str; 4] = [
    "terms_of_service",
    "privacy_policy",
    "refund_policy",
    "instructor_agreement",
];

#[derive(Debug, Clone, PartialEq)]
pub struct LegalDocument {
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

impl LegalDocument {
    pub fn from_entity(entity: entity::legal_document::Model) -> Self {
        Self {
            id: entity.id,
            document_type: entity.document_type,
            version: entity.version,
            title: entity.title,
            content: entity.content,
            is_active: entity.is_active,
            created_at: entity.created_at,
            activated_at: entity.activated_at,
        }
    }

    pub fn into_dto(self) -> LegalDocumentDto {
        LegalDocumentDto {
            id: self.id,
            document_type: self.document_type,
            version: self.version,
            title: self.title,
            content: self.content,
            is_active: self.is_active,
            created_at: self.created_at,
            activated_at: self.activated_at,
        }
    }
}

/// Active document with its markdown rendered to HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLegalDocument {
    pub document: LegalDocument,
    pub html: String,
}

impl RenderedLegalDocument {
    pub fn into_dto(self) -> RenderedLegalDocumentDto {
        RenderedLegalDocumentDto {
            document_type: self.document.document_type,
            version: self.document.version,
            title: self.document.title,
            html: self.html,
            activated_at: self.document.activated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLegalDocumentParams {
    pub document_type: String,
    pub version: String,
    pub title: String,
    pub content: String,
}

impl From<CreateLegalDocumentDto> for CreateLegalDocumentParams {
    fn from(dto: CreateLegalDocumentDto) -> Self {
        Self {
            document_type: dto.document_type,
            version: dto.version,
            title: dto.title,
            content: dto.content,
        }
    }
}
