use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::aggregation::cohort::resolve_cohort;
use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::store::operations::experiment_stats::CohortSnapshot;
use crate::store::paths::Cohort;

pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(cohort_stats))
}

/// Tally cohort membership across all users and persist the snapshot.
async fn cohort_stats(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let store = state.store();
    let users = store.list_users()?;

    let mut control_count = 0u64;
    let mut experiment_count = 0u64;
    for user in &users {
        match resolve_cohort(store, &user.id) {
            Cohort::Control => control_count += 1,
            Cohort::Experiment => experiment_count += 1,
        }
    }

    let total_users = control_count + experiment_count;
    let ratio = |count: u64| {
        if total_users == 0 {
            0.0
        } else {
            count as f64 / total_users as f64
        }
    };

    let snapshot = CohortSnapshot {
        control_count,
        experiment_count,
        total_users,
        control_ratio: ratio(control_count),
        experiment_ratio: ratio(experiment_count),
        generated_at: chrono::Utc::now()
            .with_timezone(&state.timezone())
            .fixed_offset(),
    };
    store.put_cohort_snapshot(&snapshot)?;

    Ok(ok(snapshot))
}
