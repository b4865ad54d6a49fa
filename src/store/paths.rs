//! Dual-schema path resolution.
//!
//! Per-user data exists in two layouts that must both stay queryable:
//! the grouped schema nests collections under a per-cohort data document
//! (`{uid}/{cohort}/data/{collection}`), the legacy schema keeps them as
//! direct children of the user (`{uid}/{collection}`). This module only
//! supplies both candidates; the read/write decision is made per operation
//! by [`with_fallback`].

use serde::{Deserialize, Serialize};

use crate::store::StoreError;

pub mod collections {
    pub const EVENTS: &str = "events";
    pub const APP_SESSIONS: &str = "app_sessions";
    pub const DAILY_METRICS: &str = "daily_metrics";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cohort {
    Control,
    Experiment,
}

impl Cohort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::Experiment => "experiment",
        }
    }

    /// `app_config == 0` 为对照组；其余值（含缺省）一律视为实验组。
    pub fn from_app_config(value: Option<i64>) -> Self {
        match value {
            Some(0) => Self::Control,
            _ => Self::Experiment,
        }
    }
}

impl std::fmt::Display for Cohort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Both candidate collection paths for one (user, cohort, collection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualPath {
    pub grouped: String,
    pub legacy: String,
}

pub fn dual_collection(user_id: &str, cohort: Cohort, collection: &str) -> DualPath {
    DualPath {
        grouped: format!("{user_id}/{}/data/{collection}", cohort.as_str()),
        legacy: format!("{user_id}/{collection}"),
    }
}

/// Try `op` against the grouped path first; on error log and retry against
/// the legacy path. An empty result is a normal result, never a fallback
/// trigger — only genuine `StoreError`s reroute to the legacy schema.
pub fn with_fallback<T>(
    paths: &DualPath,
    mut op: impl FnMut(&str) -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    match op(&paths.grouped) {
        Ok(value) => Ok(value),
        Err(grouped_err) => {
            tracing::warn!(
                grouped = %paths.grouped,
                legacy = %paths.legacy,
                error = %grouped_err,
                "Grouped path failed, retrying legacy path"
            );
            op(&paths.legacy)
        }
    }
}
