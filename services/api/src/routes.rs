use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use fiado::ledger::{ledger_router, Debt, LedgerService, LedgerStore, MemberId};
use fiado::score::{ScoreDetails, ScoreEngine, ScoreRules};

#[derive(Debug, Deserialize)]
pub(crate) struct ScorePreviewRequest {
    pub(crate) subject_id: MemberId,
    pub(crate) debts: Vec<Debt>,
    /// Partial rule sets merge onto the canonical defaults.
    #[serde(default)]
    pub(crate) rules: Option<ScoreRules>,
    /// Evaluation instant for reproducible previews; defaults to now.
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDateTime>,
}

pub(crate) fn with_ledger_routes<S>(service: Arc<LedgerService<S>>) -> axum::Router
where
    S: LedgerStore + 'static,
{
    ledger_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/score/preview",
            axum::routing::post(score_preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless scoring of a caller-supplied ledger snapshot. Reporting tools
/// use this instead of reimplementing the replay.
pub(crate) async fn score_preview_endpoint(
    Json(payload): Json<ScorePreviewRequest>,
) -> Json<ScoreDetails> {
    let ScorePreviewRequest {
        subject_id,
        debts,
        rules,
        as_of,
    } = payload;

    let engine = ScoreEngine::new(rules.unwrap_or_default());
    let details = match as_of {
        Some(instant) => engine.score_at(&subject_id, &debts, instant),
        None => engine.score(&subject_id, &debts),
    };

    Json(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use chrono::NaiveDate;
    use fiado::ledger::{DebtId, DebtStatus};
    use fiado::score::Classification;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .expect("valid date")
            .and_hms_opt(12, 0, 0)
            .expect("valid time")
    }

    fn paid_debt() -> Debt {
        let due = at(2025, 5, 20);
        Debt {
            id: DebtId("debt-1".to_string()),
            creditor_id: MemberId("ana".to_string()),
            debtor_id: MemberId("bia".to_string()),
            amount: 1000.0,
            original_amount: None,
            status: DebtStatus::Paid,
            due_date: due,
            created_at: at(2025, 5, 1),
            updated_at: Some(due),
            was_partial_payment: false,
            payment_override: None,
        }
    }

    #[tokio::test]
    async fn score_preview_replays_a_snapshot() {
        let request = ScorePreviewRequest {
            subject_id: MemberId("bia".to_string()),
            debts: vec![paid_debt()],
            rules: None,
            as_of: Some(at(2025, 6, 1)),
        };

        let Json(details) = score_preview_endpoint(Json(request)).await;

        assert_eq!(details.score, 507);
        assert_eq!(details.classification, Classification::Ok);
        assert_eq!(details.history.len(), 1);
    }

    #[tokio::test]
    async fn score_preview_accepts_custom_rules() {
        let rules: ScoreRules =
            serde_json::from_str(r#"{"debtor_bonus": {"on_time": 50}}"#).expect("rules parse");
        let request = ScorePreviewRequest {
            subject_id: MemberId("bia".to_string()),
            debts: vec![paid_debt()],
            rules: Some(rules),
            as_of: Some(at(2025, 6, 1)),
        };

        let Json(details) = score_preview_endpoint(Json(request)).await;

        assert_eq!(details.score, 550);
    }

    #[tokio::test]
    async fn score_preview_matches_the_service_path() {
        use crate::infra::InMemoryLedger;
        use fiado::ledger::NewDebt;

        let service = Arc::new(LedgerService::new(
            Arc::new(InMemoryLedger::default()),
            ScoreRules::default(),
        ));
        let due = at(2025, 5, 20);
        let debt = service
            .record_debt(NewDebt {
                creditor_id: MemberId("ana".to_string()),
                debtor_id: MemberId("bia".to_string()),
                amount: 1000.0,
                due_date: due,
                created_at: Some(at(2025, 5, 1)),
            })
            .expect("debt recorded");
        let settled = service.settle(&debt.id, Some(due)).expect("debt settled");

        let via_service = service
            .score_at(&MemberId("bia".to_string()), at(2025, 6, 1))
            .expect("service scores");

        let Json(via_preview) = score_preview_endpoint(Json(ScorePreviewRequest {
            subject_id: MemberId("bia".to_string()),
            debts: vec![settled],
            rules: None,
            as_of: Some(at(2025, 6, 1)),
        }))
        .await;

        assert_eq!(via_service, via_preview);
    }
}
