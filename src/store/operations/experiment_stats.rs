use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::constants::COHORT_SNAPSHOT_KEY;
use crate::store::{Store, StoreError};

/// Snapshot of cohort membership across all users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortSnapshot {
    pub control_count: u64,
    pub experiment_count: u64,
    pub total_users: u64,
    pub control_ratio: f64,
    pub experiment_ratio: f64,
    pub generated_at: DateTime<FixedOffset>,
}

impl Store {
    pub fn put_cohort_snapshot(&self, snapshot: &CohortSnapshot) -> Result<(), StoreError> {
        self.experiment_stats
            .insert(COHORT_SNAPSHOT_KEY.as_bytes(), Self::serialize(snapshot)?)?;
        Ok(())
    }

    pub fn get_cohort_snapshot(&self) -> Result<Option<CohortSnapshot>, StoreError> {
        match self.experiment_stats.get(COHORT_SNAPSHOT_KEY.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }
}
