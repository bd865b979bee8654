use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{analytics::AnnualTaxReportDto, api::ErrorDto},
    server::{
        controller::analytics::RangeParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::tax::TaxService,
        state::AppState,
    },
};

pub static TAX_TAG: &str = "tax";

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

fn csv_response(filename: String, body: String) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
}

/// Annual reports of every instructor.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/tax/{year}",
    tag = TAX_TAG,
    params(("year" = i32, Path, description = "Calendar year")),
    responses(
        (status = 200, description = "Reports ordered by instructor name", body = Vec<AnnualTaxReportDto>),
        (status = 400, description = "Invalid year", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_annual_reports(
    State(state): State<AppState>,
    session: Session,
    Path(year): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let reports = TaxService::new(&state.db).annual_reports(year).await?;

    let reports_dto: Vec<AnnualTaxReportDto> = reports.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(reports_dto)))
}

#[utoipa::path(
    get,
    path = "/api/admin/tax/{year}/instructors/{instructor_id}",
    tag = TAX_TAG,
    params(
        ("year" = i32, Path, description = "Calendar year"),
        ("instructor_id" = i32, Path, description = "Instructor user ID")
    ),
    responses(
        (status = 200, description = "Annual report", body = AnnualTaxReportDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Instructor not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_instructor_annual_report(
    State(state): State<AppState>,
    session: Session,
    Path((year, instructor_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let report = TaxService::new(&state.db)
        .annual_report(instructor_id, year)
        .await?;

    Ok((StatusCode::OK, Json(report.into_dto())))
}

/// The calling instructor's own annual report.
#[utoipa::path(
    get,
    path = "/api/instructor/tax/{year}",
    tag = TAX_TAG,
    params(("year" = i32, Path, description = "Calendar year")),
    responses(
        (status = 200, description = "Annual report", body = AnnualTaxReportDto),
        (status = 403, description = "Not an instructor", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_own_annual_report(
    State(state): State<AppState>,
    session: Session,
    Path(year): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let report = TaxService::new(&state.db)
        .annual_report(instructor.id, year)
        .await?;

    Ok((StatusCode::OK, Json(report.into_dto())))
}

/// CSV of every instructor's annual report.
#[utoipa::path(
    get,
    path = "/api/admin/tax/{year}/export",
    tag = TAX_TAG,
    params(("year" = i32, Path, description = "Calendar year")),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_annual_reports(
    State(state): State<AppState>,
    session: Session,
    Path(year): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let csv = TaxService::new(&state.db).annual_reports_csv(year).await?;

    Ok(csv_response(format!("tax-report-{}.csv", year), csv))
}

/// CSV of settled transactions completed in `[start, end)`.
#[utoipa::path(
    get,
    path = "/api/admin/transactions/export",
    tag = TAX_TAG,
    params(
        ("start" = chrono::NaiveDate, Query, description = "First day, inclusive"),
        ("end" = chrono::NaiveDate, Query, description = "Last day, exclusive")
    ),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid date range", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_transactions(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let csv = TaxService::new(&state.db)
        .transactions_csv(params.start, params.end)
        .await?;

    Ok(csv_response(
        format!("transactions-{}-{}.csv", params.start, params.end),
        csv,
    ))
}
