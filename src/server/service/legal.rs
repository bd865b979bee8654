//! Versioned legal documents such as the terms of service.
//!
//! Each document type has any number of versions, at most one of which is active. The
//! active version is served publicly with its markdown rendered to HTML; raw HTML in the
//! source is escaped rather than passed through.

use pulldown_cmark::{html, Event, Options, Parser};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::legal_document::LegalDocumentRepository,
    error::AppError,
    model::{
        audit::AuditEntry,
        legal::{CreateLegalDocumentParams, LegalDocument, RenderedLegalDocument, DOCUMENT_TYPES},
        user::User,
    },
    service::audit::AuditService,
    util::validation::{require_text, sanitize_text},
};

const VERSION_MAX_LEN: usize = 50;
const TITLE_MAX_LEN: usize = 200;

/// Renders markdown to HTML, escaping any embedded HTML.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::all()).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

pub struct LegalService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LegalService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new inactive version of a document.
    ///
    /// # Returns
    /// - `Ok(LegalDocument)` - The inactive version
    /// - `Err(AppError::BadRequest)` - Unknown type, or empty version, title or content
    /// - `Err(AppError::Conflict)` - The version already exists for this type
    pub async fn create(
        &self,
        actor: &User,
        params: CreateLegalDocumentParams,
    ) -> Result<LegalDocument, AppError> {
        let document_type = validate_type(&params.document_type)?;
        let version = require_text("Version", &params.version, 1, VERSION_MAX_LEN)?;
        let title = require_text("Title", &params.title, 1, TITLE_MAX_LEN)?;
        if params.content.trim().is_empty() {
            return Err(AppError::BadRequest("Content is required".to_string()));
        }

        let repo = LegalDocumentRepository::new(self.db);
        if repo.version_exists(&document_type, &version).await? {
            return Err(AppError::Conflict(format!(
                "Version '{}' of '{}' already exists",
                version, document_type
            )));
        }

        let document = repo
            .create(CreateLegalDocumentParams {
                document_type,
                version,
                title,
                content: params.content,
            })
            .await?;

        self.audit(actor, "legal_document.create", &document).await?;

        Ok(document)
    }

    /// Makes a version the only active document of its type.
    pub async fn activate(&self, actor: &User, document_id: i32) -> Result<LegalDocument, AppError> {
        let repo = LegalDocumentRepository::new(self.db);

        let document = repo
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Legal document not found".to_string()))?;

        let activated = repo
            .activate(document.id, &document.document_type)
            .await?
            .ok_or_else(|| AppError::NotFound("Legal document not found".to_string()))?;

        tracing::info!(
            document_type = %activated.document_type,
            version = %activated.version,
            "Legal document activated"
        );

        self.audit(actor, "legal_document.activate", &activated).await?;

        Ok(activated)
    }

    /// Active version of a document type, rendered to HTML.
    pub async fn get_active(&self, document_type: &str) -> Result<RenderedLegalDocument, AppError> {
        let document_type = validate_type(document_type)?;

        let document = LegalDocumentRepository::new(self.db)
            .find_active(&document_type)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No active '{}' document", document_type))
            })?;

        let html = render_markdown(&document.content);

        Ok(RenderedLegalDocument { document, html })
    }

    /// Every version of a document type, newest first.
    pub async fn list(&self, document_type: &str) -> Result<Vec<LegalDocument>, AppError> {
        let document_type = validate_type(document_type)?;

        Ok(LegalDocumentRepository::new(self.db)
            .get_by_type(&document_type)
            .await?)
    }

    /// Deletes an inactive version; the active one must be replaced first.
    pub async fn delete(&self, actor: &User, document_id: i32) -> Result<(), AppError> {
        let repo = LegalDocumentRepository::new(self.db);

        let document = repo
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Legal document not found".to_string()))?;

        if document.is_active {
            return Err(AppError::BadRequest(
                "The active version cannot be deleted".to_string(),
            ));
        }

        repo.delete(document_id).await?;

        self.audit(actor, "legal_document.delete", &document).await?;

        Ok(())
    }

    async fn audit(&self, actor: &User, action: &str, document: &LegalDocument) -> Result<(), AppError> {
        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(actor.id), action, "legal_document")
                    .entity_id(document.id)
                    .details(json!({
                        "document_type": document.document_type,
                        "version": document.version,
                    })),
            )
            .await?;
        Ok(())
    }
}

fn validate_type(document_type: &str) -> Result<String, AppError> {
    let document_type = sanitize_text(document_type);

    if DOCUMENT_TYPES.contains(&document_type.as_str()) {
        Ok(document_type)
    } else {
        Err(AppError::BadRequest(format!(
            "Unknown document type '{}'",
            document_type
        )))
    }
}
