use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        transaction::{CheckoutDto, CheckoutResponseDto, RefundDto, TransactionDto, WebhookAckDto},
    },
    server::{
        controller::{client_ip, PaginationParams},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            pagination::PageRequest,
            transaction::{RefundParams, TransactionFilter, TransactionStatus},
        },
        service::transaction::TransactionService,
        state::AppState,
        util::time::start_of_day,
    },
};

pub static TRANSACTION_TAG: &str = "transaction";

const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

#[derive(Deserialize)]
pub struct TransactionQueryParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub status: Option<String>,
    pub user_id: Option<i32>,
    pub course_id: Option<i32>,
    /// Inclusive creation date.
    pub start: Option<NaiveDate>,
    /// Exclusive creation date.
    pub end: Option<NaiveDate>,
}

fn default_entries() -> u64 {
    10
}

impl TransactionQueryParams {
    fn filter(&self) -> Result<TransactionFilter, AppError> {
        let status = match self.status.as_deref() {
            Some(value) => Some(TransactionStatus::parse(value).ok_or_else(|| {
                AppError::BadRequest(format!("Unknown transaction status '{}'", value))
            })?),
            None => None,
        };

        Ok(TransactionFilter {
            status,
            user_id: self.user_id,
            course_id: self.course_id,
            from: self.start.map(start_of_day),
            to: self.end.map(start_of_day),
        })
    }
}

/// Starts the purchase of a paid course.
///
/// Returns the payment intent client secret the frontend uses to collect payment. The
/// enrollment is created once the payment webhook confirms the charge.
#[utoipa::path(
    post,
    path = "/api/checkout",
    tag = TRANSACTION_TAG,
    request_body = CheckoutDto,
    responses(
        (status = 201, description = "Payment intent created", body = CheckoutResponseDto),
        (status = 400, description = "Course is free or owned by the caller", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 409, description = "Already enrolled", body = ErrorDto),
        (status = 502, description = "Payment gateway error", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CheckoutDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let checkout = TransactionService::new(&state.db, state.payment_gateway.as_ref())
        .checkout(&user, payload.course_id)
        .await?;

    Ok((StatusCode::CREATED, Json(checkout.into_dto())))
}

/// Receives payment gateway events.
///
/// The raw body is verified against the `Stripe-Signature` header before it is parsed.
///
/// # Returns
/// - `200 OK` - Event handled or ignored
/// - `400 Bad Request` - Missing or invalid signature, or malformed payload
#[utoipa::path(
    post,
    path = "/api/webhooks/stripe",
    tag = TRANSACTION_TAG,
    request_body(content = String, description = "Raw event JSON", content_type = "application/json"),
    responses(
        (status = 200, description = "Event acknowledged", body = WebhookAckDto),
        (status = 400, description = "Invalid signature or payload", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    TransactionService::new(&state.db, state.payment_gateway.as_ref())
        .handle_webhook(&body, signature, &state.webhook_secret, client_ip(&headers))
        .await?;

    Ok((StatusCode::OK, Json(WebhookAckDto { received: true })))
}

/// Refunds part or all of a transaction.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    post,
    path = "/api/admin/transactions/{transaction_id}/refund",
    tag = TRANSACTION_TAG,
    params(("transaction_id" = i32, Path, description = "Transaction ID")),
    request_body = RefundDto,
    responses(
        (status = 200, description = "Refund recorded", body = TransactionDto),
        (status = 400, description = "Not refundable or invalid amount", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Transaction not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refund_transaction(
    State(state): State<AppState>,
    session: Session,
    Path(transaction_id): Path<i32>,
    Json(payload): Json<RefundDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let transaction = TransactionService::new(&state.db, state.payment_gateway.as_ref())
        .refund(
            &admin,
            RefundParams {
                transaction_id,
                amount_cents: payload.amount_cents,
                reason: payload.reason,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(transaction.into_dto())))
}

/// Lists all transactions, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/transactions",
    tag = TRANSACTION_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)"),
        ("status" = Option<String>, Query, description = "Transaction status"),
        ("user_id" = Option<i32>, Query, description = "Buyer"),
        ("course_id" = Option<i32>, Query, description = "Course"),
        ("start" = Option<NaiveDate>, Query, description = "Created on or after"),
        ("end" = Option<NaiveDate>, Query, description = "Created before")
    ),
    responses(
        (status = 200, description = "Page of transactions", body = PaginatedDto<TransactionDto>),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_transactions(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<TransactionQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let transactions = TransactionService::new(&state.db, state.payment_gateway.as_ref())
        .list(params.filter()?, PageRequest::new(params.page, params.entries))
        .await?;

    Ok((StatusCode::OK, Json(transactions.into_dto(|t| t.into_dto()))))
}

/// Lists the caller's purchases.
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = TRANSACTION_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Page of own transactions", body = PaginatedDto<TransactionDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_transactions(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let transactions = TransactionService::new(&state.db, state.payment_gateway.as_ref())
        .list_for_user(&user, params.page_request())
        .await?;

    Ok((StatusCode::OK, Json(transactions.into_dto(|t| t.into_dto()))))
}
