use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError,
    model::{legal::CreateLegalDocumentParams, user::User},
    service::legal::LegalService,
};

mod activate;
mod create;
mod delete;

fn terms(version: &str, content: &str) -> CreateLegalDocumentParams {
    CreateLegalDocumentParams {
        document_type: "terms_of_service".to_string(),
        version: version.to_string(),
        title: "Terms of Service".to_string(),
        content: content.to_string(),
    }
}
