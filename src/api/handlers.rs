//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, LedgerQuery, ProductionRecord, StateResponse};
use crate::engine::LedgerRow;

/// Returns scenario inputs and headline results.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    Json(StateResponse::new(&state.source, &state.outcome))
}

/// Returns the yearly production sequence.
///
/// `GET /production` → 200 + `Vec<ProductionRecord>` JSON
pub async fn get_production(State(state): State<Arc<AppState>>) -> Json<Vec<ProductionRecord>> {
    let records = state
        .outcome
        .production
        .years()
        .map(|(year, production_kwh)| ProductionRecord {
            year,
            production_kwh,
        })
        .collect();
    Json(records)
}

/// Returns ledger rows, optionally filtered by year range.
///
/// `GET /ledger` → 200 + `Vec<LedgerRow>` JSON
/// `GET /ledger?from=N&to=M` → filtered range (inclusive)
/// `GET /ledger?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_ledger(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LedgerQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(1);
    let to = query.to.unwrap_or(u32::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let rows: Vec<LedgerRow> = state
        .outcome
        .roi
        .ledger
        .iter()
        .filter(|r| r.year >= from && r.year <= to)
        .cloned()
        .collect();

    Ok(Json(rows))
}
