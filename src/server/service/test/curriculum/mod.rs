use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::{curriculum::CurriculumRepository, upload::UploadRepository},
    error::AppError,
    model::{course::LectureParams, user::User},
    service::{course::CourseService, curriculum::CurriculumService},
};

mod create_lecture;
mod delete_lecture;
mod get_curriculum;
mod rename_section;
mod update_lecture;

fn lecture(title: &str, is_preview: bool) -> LectureParams {
    LectureParams {
        title: title.to_string(),
        content: Some("Notes".to_string()),
        video_upload_id: None,
        duration_seconds: 120,
        position: None,
        is_preview,
    }
}
