use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        analytics, application, audit, auth, course, curriculum, enrollment, health, legal,
        payout, setting, tax, taxonomy, transaction, upload, user,
    },
    service::upload::MAX_CHUNK_SIZE,
    state::AppState,
};

/// Headroom over the largest chunk for the request framing.
const CHUNK_BODY_OVERHEAD: usize = 1024;

#[derive(OpenApi)]
#[openapi(
    info(title = "LMS API", description = "Course marketplace backend"),
    paths(
        health::health,
        auth::login,
        auth::callback,
        auth::logout,
        auth::get_user,
        user::get_users,
        user::set_user_role,
        user::set_user_commission,
        course::get_courses,
        course::get_course,
        course::create_course,
        course::update_course,
        course::delete_course,
        course::publish_course,
        course::archive_course,
        course::get_own_courses,
        curriculum::get_curriculum,
        curriculum::create_section,
        curriculum::update_section,
        curriculum::delete_section,
        curriculum::reorder_sections,
        curriculum::create_lecture,
        curriculum::update_lecture,
        curriculum::delete_lecture,
        taxonomy::get_tags,
        taxonomy::create_tag,
        taxonomy::update_tag,
        taxonomy::delete_tag,
        taxonomy::assign_tag,
        taxonomy::unassign_tag,
        taxonomy::get_difficulties,
        taxonomy::create_difficulty,
        taxonomy::update_difficulty,
        taxonomy::delete_difficulty,
        enrollment::enroll,
        enrollment::unenroll,
        enrollment::get_my_enrollments,
        enrollment::get_progress,
        enrollment::update_progress,
        transaction::checkout,
        transaction::stripe_webhook,
        transaction::refund_transaction,
        transaction::get_transactions,
        transaction::get_my_transactions,
        payout::create_payout,
        payout::process_payout,
        payout::pay_payout,
        payout::fail_payout,
        payout::cancel_payout,
        payout::get_payouts,
        payout::get_own_payouts,
        analytics::get_own_earnings,
        analytics::get_instructor_earnings,
        analytics::get_revenue_summary,
        analytics::get_revenue_by_period,
        analytics::get_top_courses,
        tax::get_annual_reports,
        tax::get_instructor_annual_report,
        tax::get_own_annual_report,
        tax::export_annual_reports,
        tax::export_transactions,
        application::submit_application,
        application::get_own_applications,
        application::get_applications,
        application::approve_application,
        application::reject_application,
        legal::get_legal_document,
        legal::get_legal_documents,
        legal::create_legal_document,
        legal::activate_legal_document,
        legal::delete_legal_document,
        setting::get_settings,
        setting::get_setting,
        setting::upsert_setting,
        audit::get_audit_logs,
        audit::get_security_events,
        upload::init_upload,
        upload::put_chunk,
        upload::get_upload,
        upload::complete_upload,
    ),
    tags(
        (name = health::HEALTH_TAG, description = "Service health"),
        (name = auth::AUTH_TAG, description = "OAuth2 login and session"),
        (name = user::USER_TAG, description = "User administration"),
        (name = course::COURSE_TAG, description = "Catalogue and course authoring"),
        (name = curriculum::CURRICULUM_TAG, description = "Sections and lectures"),
        (name = taxonomy::TAXONOMY_TAG, description = "Tags and difficulty levels"),
        (name = enrollment::ENROLLMENT_TAG, description = "Enrollments and progress"),
        (name = transaction::TRANSACTION_TAG, description = "Checkout, webhooks and refunds"),
        (name = payout::PAYOUT_TAG, description = "Instructor payouts"),
        (name = analytics::ANALYTICS_TAG, description = "Revenue and earnings"),
        (name = tax::TAX_TAG, description = "Annual reports and CSV exports"),
        (name = application::APPLICATION_TAG, description = "Instructor applications"),
        (name = legal::LEGAL_TAG, description = "Versioned legal documents"),
        (name = setting::SETTING_TAG, description = "System settings"),
        (name = audit::AUDIT_TAG, description = "Audit log and security events"),
        (name = upload::UPLOAD_TAG, description = "Chunked file uploads"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .merge(auth_routes())
        .merge(course_routes())
        .merge(commerce_routes())
        .merge(admin_routes())
        .merge(upload_routes())
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", get(auth::login))
        .route("/api/auth/callback", get(auth::callback))
        .route("/api/auth/logout", get(auth::logout))
        .route("/api/auth/user", get(auth::get_user))
        .route("/api/applications", post(application::submit_application))
        .route(
            "/api/applications/mine",
            get(application::get_own_applications),
        )
        .route("/api/legal/{document_type}", get(legal::get_legal_document))
}

fn course_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/courses",
            get(course::get_courses).post(course::create_course),
        )
        .route(
            "/api/courses/{course_id}",
            get(course::get_course)
                .put(course::update_course)
                .delete(course::delete_course),
        )
        .route("/api/courses/{course_id}/publish", post(course::publish_course))
        .route("/api/courses/{course_id}/archive", post(course::archive_course))
        .route("/api/instructor/courses", get(course::get_own_courses))
        .route(
            "/api/courses/{course_id}/curriculum",
            get(curriculum::get_curriculum),
        )
        .route(
            "/api/courses/{course_id}/sections",
            post(curriculum::create_section),
        )
        .route(
            "/api/courses/{course_id}/sections/order",
            put(curriculum::reorder_sections),
        )
        .route(
            "/api/sections/{section_id}",
            put(curriculum::update_section).delete(curriculum::delete_section),
        )
        .route(
            "/api/sections/{section_id}/lectures",
            post(curriculum::create_lecture),
        )
        .route(
            "/api/lectures/{lecture_id}",
            put(curriculum::update_lecture).delete(curriculum::delete_lecture),
        )
        .route("/api/tags", get(taxonomy::get_tags))
        .route("/api/difficulties", get(taxonomy::get_difficulties))
        .route(
            "/api/courses/{course_id}/tags/{tag_id}",
            post(taxonomy::assign_tag).delete(taxonomy::unassign_tag),
        )
        .route(
            "/api/courses/{course_id}/enroll",
            post(enrollment::enroll).delete(enrollment::unenroll),
        )
        .route("/api/enrollments", get(enrollment::get_my_enrollments))
        .route(
            "/api/courses/{course_id}/progress",
            get(enrollment::get_progress).put(enrollment::update_progress),
        )
}

fn commerce_routes() -> Router<AppState> {
    Router::new()
        .route("/api/checkout", post(transaction::checkout))
        .route("/api/webhooks/stripe", post(transaction::stripe_webhook))
        .route("/api/transactions", get(transaction::get_my_transactions))
        .route("/api/instructor/payouts", get(payout::get_own_payouts))
        .route("/api/instructor/earnings", get(analytics::get_own_earnings))
        .route("/api/instructor/tax/{year}", get(tax::get_own_annual_report))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/users", get(user::get_users))
        .route("/api/admin/users/{user_id}/role", put(user::set_user_role))
        .route(
            "/api/admin/users/{user_id}/commission",
            put(user::set_user_commission),
        )
        .route("/api/admin/tags", post(taxonomy::create_tag))
        .route(
            "/api/admin/tags/{tag_id}",
            put(taxonomy::update_tag).delete(taxonomy::delete_tag),
        )
        .route("/api/admin/difficulties", post(taxonomy::create_difficulty))
        .route(
            "/api/admin/difficulties/{difficulty_id}",
            put(taxonomy::update_difficulty).delete(taxonomy::delete_difficulty),
        )
        .route("/api/admin/transactions", get(transaction::get_transactions))
        .route(
            "/api/admin/transactions/export",
            get(tax::export_transactions),
        )
        .route(
            "/api/admin/transactions/{transaction_id}/refund",
            post(transaction::refund_transaction),
        )
        .route(
            "/api/admin/payouts",
            get(payout::get_payouts).post(payout::create_payout),
        )
        .route(
            "/api/admin/payouts/{payout_id}/process",
            post(payout::process_payout),
        )
        .route("/api/admin/payouts/{payout_id}/pay", post(payout::pay_payout))
        .route("/api/admin/payouts/{payout_id}/fail", post(payout::fail_payout))
        .route(
            "/api/admin/payouts/{payout_id}/cancel",
            post(payout::cancel_payout),
        )
        .route(
            "/api/admin/instructors/{instructor_id}/earnings",
            get(analytics::get_instructor_earnings),
        )
        .route(
            "/api/admin/analytics/summary",
            get(analytics::get_revenue_summary),
        )
        .route(
            "/api/admin/analytics/revenue",
            get(analytics::get_revenue_by_period),
        )
        .route(
            "/api/admin/analytics/top-courses",
            get(analytics::get_top_courses),
        )
        .route("/api/admin/tax/{year}", get(tax::get_annual_reports))
        .route(
            "/api/admin/tax/{year}/export",
            get(tax::export_annual_reports),
        )
        .route(
            "/api/admin/tax/{year}/instructors/{instructor_id}",
            get(tax::get_instructor_annual_report),
        )
        .route(
            "/api/admin/applications",
            get(application::get_applications),
        )
        .route(
            "/api/admin/applications/{application_id}/approve",
            post(application::approve_application),
        )
        .route(
            "/api/admin/applications/{application_id}/reject",
            post(application::reject_application),
        )
        .route(
            "/api/admin/legal",
            get(legal::get_legal_documents).post(legal::create_legal_document),
        )
        .route(
            "/api/admin/legal/{document_id}",
            axum::routing::delete(legal::delete_legal_document),
        )
        .route(
            "/api/admin/legal/{document_id}/activate",
            post(legal::activate_legal_document),
        )
        .route("/api/admin/settings", get(setting::get_settings))
        .route(
            "/api/admin/settings/{key}",
            get(setting::get_setting).put(setting::upsert_setting),
        )
        .route("/api/admin/audit-logs", get(audit::get_audit_logs))
        .route(
            "/api/admin/security-events",
            get(audit::get_security_events),
        )
}

fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/api/uploads", post(upload::init_upload))
        .route("/api/uploads/{upload_id}", get(upload::get_upload))
        .route(
            "/api/uploads/{upload_id}/chunks/{index}",
            put(upload::put_chunk)
                .layer(DefaultBodyLimit::max(MAX_CHUNK_SIZE as usize + CHUNK_BODY_OVERHEAD)),
        )
        .route(
            "/api/uploads/{upload_id}/complete",
            post(upload::complete_upload),
        )
}
