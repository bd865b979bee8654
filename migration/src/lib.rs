pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_table;
mod m20260105_000002_create_difficulty_configuration_table;
mod m20260105_000003_create_course_table;
mod m20260105_000004_create_section_table;
mod m20260105_000005_create_upload_table;
mod m20260105_000006_create_lecture_table;
mod m20260106_000007_create_tag_table;
mod m20260106_000008_create_course_tag_table;
mod m20260107_000009_create_transaction_table;
mod m20260107_000010_create_enrollment_table;
mod m20260107_000011_create_instructor_payout_table;
mod m20260108_000012_create_instructor_application_table;
mod m20260108_000013_create_legal_document_table;
mod m20260108_000014_create_system_setting_table;
mod m20260109_000015_create_audit_log_table;
mod m20260109_000016_create_security_event_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_table::Migration),
            Box::new(m20260105_000002_create_difficulty_configuration_table::Migration),
            Box::new(m20260105_000003_create_course_table::Migration),
            Box::new(m20260105_000004_create_section_table::Migration),
            Box::new(m20260105_000005_create_upload_table::Migration),
            Box::new(m20260105_000006_create_lecture_table::Migration),
            Box::new(m20260106_000007_create_tag_table::Migration),
            Box::new(m20260106_000008_create_course_tag_table::Migration),
            Box::new(m20260107_000009_create_transaction_table::Migration),
            Box::new(m20260107_000010_create_enrollment_table::Migration),
            Box::new(m20260107_000011_create_instructor_payout_table::Migration),
            Box::new(m20260108_000012_create_instructor_application_table::Migration),
            Box::new(m20260108_000013_create_legal_document_table::Migration),
            Box::new(m20260108_000014_create_system_setting_table::Migration),
            Box::new(m20260109_000015_create_audit_log_table::Migration),
            Box::new(m20260109_000016_create_security_event_table::Migration),
        ]
    }
}
