use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::aggregation::cohort::resolve_cohort;
use crate::aggregation::job;
use crate::aggregation::window::day_key;
use crate::constants::DATE_INPUT_FORMAT;
use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::store::paths::{collections, dual_collection};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/run", post(manual_run))
        .route("/execution-log/:date", get(get_execution_log))
        .route("/:uid/:date", get(get_user_metrics))
}

#[derive(Debug, Deserialize)]
struct ManualRunRequest {
    /// Target day, `YYYY-MM-DD`; defaults to the previous local day.
    date: Option<String>,
    /// Restrict the run to one user.
    uid: Option<String>,
}

async fn manual_run(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ManualRunRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tz = state.timezone();
    let target_day = match &req.date {
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT).map_err(|_| {
            AppError::bad_request("INVALID_DATE", "date must be formatted as YYYY-MM-DD")
        })?,
        None => job::previous_day(chrono::Utc::now(), tz),
    };

    if let Some(uid) = &req.uid {
        tracing::info!(user_id = %uid, date = %day_key(target_day), "Manual single-user aggregation");
        let metrics = job::compute_and_persist(state.store(), uid, target_day, tz)?;
        return Ok(ok(metrics).into_response());
    }

    tracing::info!(date = %day_key(target_day), "Manual batch aggregation");
    let summary = job::run_for_day(
        state.store(),
        target_day,
        tz,
        state.aggregation_concurrency(),
    )
    .await?;
    Ok(ok(summary).into_response())
}

async fn get_user_metrics(
    State(state): State<AppState>,
    Path((uid, date)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let cohort = resolve_cohort(state.store(), &uid);
    let paths = dual_collection(&uid, cohort, collections::DAILY_METRICS);
    let metrics = state
        .store()
        .get_daily_metrics(&paths, &date)?
        .ok_or_else(|| AppError::not_found("No metrics recorded for this user and day"))?;
    Ok(ok(metrics))
}

async fn get_execution_log(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let log = state
        .store()
        .get_execution_log(&date)?
        .ok_or_else(|| AppError::not_found("No execution log for this day"))?;
    Ok(ok(log))
}
