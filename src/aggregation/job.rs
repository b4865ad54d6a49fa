use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use futures::StreamExt;
use serde::Serialize;

use crate::aggregation::calculator;
use crate::aggregation::window::day_key;
use crate::store::operations::daily_metrics::DailyMetrics;
use crate::store::operations::execution_logs::ExecutionLog;
use crate::store::paths::{collections, dual_collection};
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Ok,
    Error,
}

/// Per-user result of one batch run, returned as-is by the manual trigger.
#[derive(Debug, Clone, Serialize)]
pub struct UserOutcome {
    pub user_id: String,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<DailyMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UserOutcome {
    fn ok(user_id: String, metrics: DailyMetrics) -> Self {
        Self {
            user_id,
            status: OutcomeStatus::Ok,
            metrics: Some(metrics),
            error: None,
        }
    }

    fn error(user_id: String, error: String) -> Self {
        Self {
            user_id,
            status: OutcomeStatus::Error,
            metrics: None,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == OutcomeStatus::Ok
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub date: String,
    pub processed_count: u64,
    pub error_count: u64,
    pub results: Vec<UserOutcome>,
}

/// Previous calendar day relative to `now`, in the app timezone.
pub fn previous_day(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    let local_today = now.with_timezone(&tz).date_naive();
    local_today
        .checked_sub_days(Days::new(1))
        .unwrap_or(local_today)
}

/// Compute one user's metrics and persist them through the dual-schema
/// write path. Shared by the batch loop and the single-user manual trigger.
pub fn compute_and_persist(
    store: &Store,
    user_id: &str,
    target_day: NaiveDate,
    tz: Tz,
) -> Result<DailyMetrics, StoreError> {
    let (cohort, metrics) = calculator::compute(store, user_id, target_day, tz)?;
    let paths = dual_collection(user_id, cohort, collections::DAILY_METRICS);
    store.put_daily_metrics(&paths, &metrics)?;
    Ok(metrics)
}

fn process_user(store: &Store, user_id: &str, target_day: NaiveDate, tz: Tz) -> UserOutcome {
    match compute_and_persist(store, user_id, target_day, tz) {
        Ok(metrics) => UserOutcome::ok(user_id.to_string(), metrics),
        Err(e) => {
            tracing::warn!(user_id, error = %e, "Per-user aggregation failed");
            UserOutcome::error(user_id.to_string(), e.to_string())
        }
    }
}

/// Aggregate every user for `target_day`. One user's failure never aborts
/// the batch; only a failure to enumerate users (or to record the run) is
/// batch-fatal and propagates to the caller.
pub async fn run_for_day(
    store: &Arc<Store>,
    target_day: NaiveDate,
    tz: Tz,
    concurrency: usize,
) -> Result<BatchSummary, StoreError> {
    let date = day_key(target_day);
    let users = store.list_users()?;
    if users.is_empty() {
        tracing::warn!(date = %date, "No users found for aggregation run");
    }

    let results: Vec<UserOutcome> = futures::stream::iter(users.into_iter().map(|profile| {
        let store = Arc::clone(store);
        async move {
            let user_id = profile.id.clone();
            let task = tokio::task::spawn_blocking(move || {
                process_user(&store, &profile.id, target_day, tz)
            });
            match task.await {
                Ok(outcome) => outcome,
                Err(join_err) => {
                    tracing::error!(user_id = %user_id, error = %join_err, "Aggregation task panicked");
                    UserOutcome::error(user_id, join_err.to_string())
                }
            }
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;

    let processed_count = results.iter().filter(|r| r.is_ok()).count() as u64;
    let error_count = results.len() as u64 - processed_count;

    let log = ExecutionLog::completed(
        date.clone(),
        Utc::now().with_timezone(&tz).fixed_offset(),
        processed_count,
        error_count,
    );
    store.put_execution_log(&log)?;

    tracing::info!(
        date = %date,
        processed = processed_count,
        errors = error_count,
        "Aggregation batch finished"
    );

    Ok(BatchSummary {
        date,
        processed_count,
        error_count,
        results,
    })
}

/// Scheduled entry point: aggregate the previous local calendar day.
/// A batch-fatal error is recorded as a failed ExecutionLog (a failure of
/// that write itself is swallowed) and then re-raised to the scheduler.
pub async fn run_scheduled(
    store: &Arc<Store>,
    tz: Tz,
    now: DateTime<Utc>,
    concurrency: usize,
) -> Result<BatchSummary, StoreError> {
    let target_day = previous_day(now, tz);
    match run_for_day(store, target_day, tz, concurrency).await {
        Ok(summary) => Ok(summary),
        Err(e) => {
            let log = ExecutionLog::failed(
                day_key(target_day),
                Utc::now().with_timezone(&tz).fixed_offset(),
                e.to_string(),
            );
            if let Err(log_err) = store.put_execution_log(&log) {
                tracing::error!(error = %log_err, "Failed to record failed aggregation run");
            }
            Err(e)
        }
    }
}
