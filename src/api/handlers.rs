//! HTTP request handlers.
//!
//! Wage handlers are pure calculations over the loaded configuration.
//! Dunning handlers refresh the board snapshot from the store before
//! answering, so every view reflects the store as of the request.

use axum::{
    Form, Json, Router,
    extract::{
        Path, Query, State,
        rejection::{FormRejection, JsonRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_wages;
use crate::dunning::{DunningBoard, EXPORT_MIME_TYPE, RecoveryStore, export_filename};
use crate::error::EngineResult;
use crate::models::{WageForm, WageInputs};

use super::request::{SearchQuery, WageCalculationRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/wages/calculate", post(calculate_handler))
        .route("/wages/calculate/form", post(calculate_form_handler))
        .route("/dunning/summary", get(summary_handler))
        .route("/dunning/records", get(records_handler))
        .route("/dunning/export", get(export_handler))
        .route(
            "/dunning/records/:id/send-next-email",
            post(send_next_email_handler),
        )
        .route("/dunning/records/:id/resolve", post(resolve_handler))
        .with_state(state)
}

/// Logs the outcome of a request and converts errors to API responses.
fn respond(correlation_id: Uuid, action: &str, result: EngineResult<Response>) -> Response {
    match result {
        Ok(response) => {
            info!(correlation_id = %correlation_id, action, "Request completed");
            response
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, action, error = %err, "Request failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse::bad_request(error).into_response()
}

fn wage_response(state: &AppState, inputs: WageInputs) -> EngineResult<Response> {
    let result = calculate_wages(&inputs, state.config().config())?;
    info!(
        calculation_id = %result.calculation_id,
        region = %inputs.region,
        annual_gross = %result.gross.annual,
        annual_net = %result.net.annual,
        warnings = result.audit_trace.warnings.len(),
        "Wage calculation completed"
    );
    Ok((StatusCode::OK, Json(result)).into_response())
}

/// Handler for `POST /wages/calculate`.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<WageCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing wage calculation request");

    match payload {
        Ok(Json(request)) => respond(
            correlation_id,
            "calculate_wages",
            wage_response(&state, request.into()),
        ),
        Err(rejection) => json_rejection(correlation_id, rejection),
    }
}

/// Handler for `POST /wages/calculate/form`.
///
/// Accepts the raw calculator form as `application/x-www-form-urlencoded`.
async fn calculate_form_handler(
    State(state): State<AppState>,
    payload: Result<Form<WageForm>, FormRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing wage form submission");

    let form = match payload {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Form rejected");
            return ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
                .into_response();
        }
    };

    let result = WageInputs::try_from(form).and_then(|inputs| wage_response(&state, inputs));
    respond(correlation_id, "calculate_wages_form", result)
}

/// Fetches a fresh snapshot, installs it on the board, then runs `action`.
///
/// The fetch happens before the board lock is taken, so readers are only
/// blocked while the snapshot is swapped and `action` runs.
fn with_refreshed_board<T, F>(state: &AppState, action: F) -> EngineResult<T>
where
    F: FnOnce(&mut DunningBoard, &dyn RecoveryStore) -> EngineResult<T>,
{
    let records = state.store().fetch_all()?;
    let mut board = state.board_mut()?;
    board.replace_snapshot(records);
    action(&mut board, state.store())
}

/// Handler for `GET /dunning/summary`.
async fn summary_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let result =
        with_refreshed_board(&state, |board, _| Ok(Json(board.summary()).into_response()));
    respond(correlation_id, "dunning_summary", result)
}

/// Handler for `GET /dunning/records?q=…`.
async fn records_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = with_refreshed_board(&state, |board, _| {
        Ok(Json(board.groups(query.text())).into_response())
    });
    respond(correlation_id, "dunning_records", result)
}

/// Handler for `GET /dunning/export`.
async fn export_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = with_refreshed_board(&state, |board, _| {
        let body = board.export_csv()?;
        let disposition = format!(
            "attachment; filename=\"{}\"",
            export_filename(Utc::now().date_naive())
        );
        info!(
            correlation_id = %correlation_id,
            records = board.records().len(),
            "Dunning export generated"
        );
        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, EXPORT_MIME_TYPE.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            body,
        )
            .into_response())
    });
    respond(correlation_id, "dunning_export", result)
}

/// Handler for `POST /dunning/records/:id/send-next-email`.
async fn send_next_email_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, record_id = %id, "Sending next reminder");

    let result = with_refreshed_board(&state, |board, store| board.send_next_email(store, &id))
        .map(|record| Json(record).into_response());
    respond(correlation_id, "send_next_email", result)
}

/// Handler for `POST /dunning/records/:id/resolve`.
async fn resolve_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, record_id = %id, "Resolving payment");

    let result = with_refreshed_board(&state, |board, store| board.resolve(store, &id))
        .map(|record| Json(record).into_response());
    respond(correlation_id, "resolve", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::dunning::InMemoryRecoveryStore;
    use crate::dunning::test_support::sample_records;
    use crate::models::{PaymentRecoveryRecord, WageCalculationResult};
    use axum::body::Body;
    use axum::http::Request;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, OnceLock};
    use tower::ServiceExt;

    /// Records whether the board was locked while a snapshot was fetched.
    #[derive(Default)]
    struct LockObservingStore {
        inner: InMemoryRecoveryStore,
        state: OnceLock<AppState>,
        locked_during_fetch: AtomicBool,
    }

    impl RecoveryStore for LockObservingStore {
        fn fetch_all(&self) -> EngineResult<Vec<PaymentRecoveryRecord>> {
            if self.state.get().is_some_and(AppState::board_is_locked) {
                self.locked_during_fetch.store(true, Ordering::SeqCst);
            }
            self.inner.fetch_all()
        }

        fn send_next_email(&self, id: &str) -> EngineResult<PaymentRecoveryRecord> {
            self.inner.send_next_email(id)
        }

        fn resolve(&self, id: &str) -> EngineResult<PaymentRecoveryRecord> {
            self.inner.resolve(id)
        }
    }

    fn create_test_state() -> AppState {
        let store = InMemoryRecoveryStore::with_records(sample_records()).unwrap();
        AppState::new(ConfigLoader::default(), Arc::new(store))
    }

    async fn body_bytes(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_form_submission_calculates() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/wages/calculate/form")
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from(
                        "hours_per_week=37.5&hourly_rate=7.55&region=standard&pension_contribution_percent=3",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let result: WageCalculationResult =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(
            result.net.annual,
            rust_decimal::Decimal::from_str("13592.03").unwrap()
        );
    }

    #[tokio::test]
    async fn test_non_numeric_form_field_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/wages/calculate/form")
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from("hours_per_week=forty&hourly_rate=12"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
        assert!(error.message.contains("hours_per_week"));
    }

    #[tokio::test]
    async fn test_send_next_email_updates_board() {
        let state = create_test_state();
        let router = create_router(state.clone());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/dunning/records/1001/send-next-email")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let record: PaymentRecoveryRecord =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(record.emails_sent, 1);

        let board = state.board().unwrap();
        let on_board = board.records().iter().find(|r| r.id == "1001").unwrap();
        assert_eq!(on_board.emails_sent, 1);
    }

    #[tokio::test]
    async fn test_fourth_email_returns_409() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/dunning/records/1004/send-next-email")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_snapshot_fetched_without_holding_board_lock() {
        let store = Arc::new(LockObservingStore {
            inner: InMemoryRecoveryStore::with_records(sample_records()).unwrap(),
            ..Default::default()
        });
        let state = AppState::new(ConfigLoader::default(), store.clone());
        let _ = store.state.set(state.clone());

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/dunning/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!store.locked_during_fetch.load(Ordering::SeqCst));
    }
}
