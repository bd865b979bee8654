pub use super::audit_log::Entity as AuditLog;
pub use super::course::Entity as Course;
pub use super::course_tag::Entity as CourseTag;
pub use super::difficulty_configuration::Entity as DifficultyConfiguration;
pub use super::enrollment::Entity as Enrollment;
pub use super::instructor_application::Entity as InstructorApplication;
pub use super::instructor_payout::Entity as InstructorPayout;
pub use super::lecture::Entity as Lecture;
pub use super::legal_document::Entity as LegalDocument;
pub use super::section::Entity as Section;
pub use super::security_event::Entity as SecurityEvent;
pub use super::system_setting::Entity as SystemSetting;
pub use super::tag::Entity as Tag;
pub use super::transaction::Entity as Transaction;
pub use super::upload::Entity as Upload;
pub use super::user::Entity as User;
