use crate::store::paths::Cohort;
use crate::store::Store;

/// Classify one user into a cohort from their profile's `app_config` flag.
/// Fail-open: a missing document, a missing flag, or any read error yields
/// `Experiment` — this resolver never returns an error to the caller.
pub fn resolve_cohort(store: &Store, user_id: &str) -> Cohort {
    match store.get_user_profile(user_id) {
        Ok(Some(profile)) => Cohort::from_app_config(profile.app_config),
        Ok(None) => {
            tracing::debug!(user_id, "User profile missing, defaulting to experiment cohort");
            Cohort::Experiment
        }
        Err(e) => {
            tracing::warn!(
                user_id,
                error = %e,
                "User profile unreadable, defaulting to experiment cohort"
            );
            Cohort::Experiment
        }
    }
}
