use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Tables are generated from the SeaORM entities with the SQLite backend and created
/// in the order they were added.
///
/// # Example
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(InstructorApplication)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Tables with foreign keys should be added after the tables they reference.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the audit and security event tables.
    ///
    /// Most services write audit entries, so the course and commerce presets include these.
    pub fn with_log_tables(self) -> Self {
        self.with_table(AuditLog).with_table(SecurityEvent)
    }

    /// Adds every table needed for course authoring:
    /// User, DifficultyConfiguration, Course, Section, Upload, Lecture, Tag, CourseTag,
    /// plus the log tables.
    pub fn with_course_tables(self) -> Self {
        self.with_table(User)
            .with_table(DifficultyConfiguration)
            .with_table(Course)
            .with_table(Section)
            .with_table(Upload)
            .with_table(Lecture)
            .with_table(Tag)
            .with_table(CourseTag)
            .with_log_tables()
    }

    /// Adds the course tables plus Transaction, Enrollment, InstructorPayout and
    /// SystemSetting.
    ///
    /// Use this for enrollment, payment, commission and reporting tests.
    pub fn with_commerce_tables(self) -> Self {
        self.with_course_tables()
            .with_table(Transaction)
            .with_table(Enrollment)
            .with_table(InstructorPayout)
            .with_table(SystemSetting)
    }

    /// Adds every table in the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_commerce_tables()
            .with_table(InstructorApplication)
            .with_table(LegalDocument)
    }

    /// Connects to a fresh in-memory SQLite database and creates the configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
