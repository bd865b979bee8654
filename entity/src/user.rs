use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Subject identifier issued by the OAuth2 provider.
    #[sea_orm(unique)]
    pub external_id: String,
    pub email: String,
    pub name: String,
    /// One of `student`, `instructor`, `admin`.
    pub role: String,
    /// Per-instructor commission override in basis points.
    pub commission_rate_bps: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course::Entity")]
    Course,
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollment,
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
    #[sea_orm(has_many = "super::instructor_payout::Entity")]
    InstructorPayout,
    #[sea_orm(has_many = "super::instructor_application::Entity")]
    InstructorApplication,
    #[sea_orm(has_many = "super::upload::Entity")]
    Upload,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl Related<super::instructor_payout::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InstructorPayout.def()
    }
}

impl Related<super::instructor_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InstructorApplication.def()
    }
}

impl Related<super::upload::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Upload.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
