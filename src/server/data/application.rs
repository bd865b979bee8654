//! Instructor application repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    application::{
        ApplicationReview, ApplicationStatus, InstructorApplication, SubmitApplicationParams,
    },
    pagination::{PageRequest, Paginated},
};

pub struct ApplicationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        params: SubmitApplicationParams,
    ) -> Result<InstructorApplication, DbErr> {
        let entity = entity::instructor_application::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            bio: ActiveValue::Set(params.bio),
            expertise: ActiveValue::Set(params.expertise),
            website: ActiveValue::Set(params.website),
            status: ActiveValue::Set(ApplicationStatus::Pending.as_str().to_string()),
            rejection_reason: ActiveValue::Set(None),
            reviewed_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            reviewed_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        InstructorApplication::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<InstructorApplication>, DbErr> {
        entity::prelude::InstructorApplication::find_by_id(id)
            .one(self.db)
            .await?
            .map(InstructorApplication::from_entity)
            .transpose()
    }

    pub async fn has_pending(&self, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::InstructorApplication::find()
            .filter(entity::instructor_application::Column::UserId.eq(user_id))
            .filter(
                entity::instructor_application::Column::Status
                    .eq(ApplicationStatus::Pending.as_str()),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<InstructorApplication>, DbErr> {
        entity::prelude::InstructorApplication::find()
            .filter(entity::instructor_application::Column::UserId.eq(user_id))
            .order_by_desc(entity::instructor_application::Column::CreatedAt)
            .order_by_desc(entity::instructor_application::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(InstructorApplication::from_entity)
            .collect()
    }

    /// Lists applications, oldest first so reviewers work through the queue in order.
    pub async fn get_filtered_paginated(
        &self,
        status: Option<ApplicationStatus>,
        page: PageRequest,
    ) -> Result<Paginated<InstructorApplication>, DbErr> {
        let mut query = entity::prelude::InstructorApplication::find();

        if let Some(status) = status {
            query = query.filter(entity::instructor_application::Column::Status.eq(status.as_str()));
        }

        let paginator = query
            .order_by_asc(entity::instructor_application::Column::CreatedAt)
            .order_by_asc(entity::instructor_application::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(page.page)
            .await?
            .into_iter()
            .map(InstructorApplication::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(items, total, page.page, page.per_page))
    }

    pub async fn review(
        &self,
        id: i32,
        review: ApplicationReview,
    ) -> Result<Option<InstructorApplication>, DbErr> {
        let Some(existing) = entity::prelude::InstructorApplication::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::instructor_application::ActiveModel = existing.into();
        active.status = ActiveValue::Set(review.status.as_str().to_string());
        active.reviewed_by = ActiveValue::Set(Some(review.reviewed_by));
        active.rejection_reason = ActiveValue::Set(review.rejection_reason);
        active.reviewed_at = ActiveValue::Set(Some(Utc::now()));

        InstructorApplication::from_entity(active.update(self.db).await?).map(Some)
    }
}
