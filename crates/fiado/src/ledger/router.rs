use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::json;

use super::domain::{DebtId, MemberId, NewDebt, PaymentOverride};
use super::service::{LedgerService, LedgerServiceError};
use super::store::{LedgerStore, StoreError};

/// Router builder exposing HTTP endpoints for the debt lifecycle and scoring.
pub fn ledger_router<S>(service: Arc<LedgerService<S>>) -> Router
where
    S: LedgerStore + 'static,
{
    Router::new()
        .route("/api/v1/debts", post(record_debt_handler::<S>))
        .route("/api/v1/debts/:debt_id/payment", post(settle_handler::<S>))
        .route(
            "/api/v1/debts/:debt_id/partial-payment",
            post(partial_payment_handler::<S>),
        )
        .route(
            "/api/v1/debts/:debt_id/override",
            put(override_handler::<S>).delete(clear_override_handler::<S>),
        )
        .route(
            "/api/v1/members/:member_id/score",
            get(score_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SettleRequest {
    #[serde(default)]
    pub(crate) paid_at: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PartialPaymentRequest {
    pub(crate) paid_amount: f64,
    #[serde(default)]
    pub(crate) paid_at: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverrideRequest {
    pub(crate) was_on_time: bool,
    pub(crate) overridden_by: MemberId,
    #[serde(default)]
    pub(crate) overridden_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub(crate) reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScoreQuery {
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDateTime>,
}

pub(crate) async fn record_debt_handler<S>(
    State(service): State<Arc<LedgerService<S>>>,
    Json(new_debt): Json<NewDebt>,
) -> Response
where
    S: LedgerStore + 'static,
{
    match service.record_debt(new_debt) {
        Ok(debt) => (StatusCode::CREATED, Json(debt)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn settle_handler<S>(
    State(service): State<Arc<LedgerService<S>>>,
    Path(debt_id): Path<String>,
    payload: Option<Json<SettleRequest>>,
) -> Response
where
    S: LedgerStore + 'static,
{
    let Json(payload) = payload.unwrap_or_default();
    match service.settle(&DebtId(debt_id), payload.paid_at) {
        Ok(debt) => (StatusCode::OK, Json(debt)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn partial_payment_handler<S>(
    State(service): State<Arc<LedgerService<S>>>,
    Path(debt_id): Path<String>,
    Json(payload): Json<PartialPaymentRequest>,
) -> Response
where
    S: LedgerStore + 'static,
{
    match service.record_partial_payment(&DebtId(debt_id), payload.paid_amount, payload.paid_at) {
        Ok(settlement) => (StatusCode::OK, Json(settlement)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn override_handler<S>(
    State(service): State<Arc<LedgerService<S>>>,
    Path(debt_id): Path<String>,
    Json(payload): Json<OverrideRequest>,
) -> Response
where
    S: LedgerStore + 'static,
{
    let correction = PaymentOverride {
        was_on_time: payload.was_on_time,
        overridden_by: payload.overridden_by,
        overridden_at: payload
            .overridden_at
            .unwrap_or_else(|| chrono::Local::now().naive_local()),
        reason: payload.reason,
    };

    match service.override_payment(&DebtId(debt_id), correction) {
        Ok(debt) => (StatusCode::OK, Json(debt)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn clear_override_handler<S>(
    State(service): State<Arc<LedgerService<S>>>,
    Path(debt_id): Path<String>,
) -> Response
where
    S: LedgerStore + 'static,
{
    match service.clear_override(&DebtId(debt_id)) {
        Ok(debt) => (StatusCode::OK, Json(debt)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<LedgerService<S>>>,
    Path(member_id): Path<String>,
    Query(query): Query<ScoreQuery>,
) -> Response
where
    S: LedgerStore + 'static,
{
    let member = MemberId(member_id);
    let result = match query.as_of {
        Some(as_of) => service.score_at(&member, as_of),
        None => service.score(&member),
    };

    match result {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: LedgerServiceError) -> Response {
    let status = match &err {
        LedgerServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        LedgerServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        LedgerServiceError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };

    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
