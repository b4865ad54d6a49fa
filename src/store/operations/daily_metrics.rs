use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::paths::{with_fallback, DualPath};
use crate::store::{Store, StoreError};

/// Daily per-user metrics record. Written whole by each aggregation run;
/// a re-run for the same day overwrites deterministically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub event_total_count: i64,
    pub event_overdue_count: i64,
    pub event_complete_count: i64,
    pub event_not_finish_count: i64,
    pub event_commit_plan_count: i64,
    pub notif_total_count: i64,
    pub notif_open_count: i64,
    pub notif_dismiss_count: i64,
    pub app_open_count: i64,
    pub app_average_open_time: i64,
    pub app_open_by_notif_count: i64,
    pub chat_total_count: i64,
    pub chat_leave_count: i64,
    pub chat_start_count: i64,
    pub chat_snooze_count: i64,
    /// YYYYMMDD day key this record covers.
    pub date: String,
    pub created_at: DateTime<FixedOffset>,
    pub timezone: String,
}

impl Store {
    /// Upsert one metrics record, grouped path first, legacy on write error.
    pub fn put_daily_metrics(
        &self,
        paths: &DualPath,
        metrics: &DailyMetrics,
    ) -> Result<(), StoreError> {
        let raw = Self::serialize(metrics)?;
        with_fallback(paths, |collection| {
            let key = keys::doc_key(collection, &metrics.date);
            self.daily_metrics.insert(key.as_bytes(), raw.clone())?;
            Ok(())
        })
    }

    /// Point lookup for diagnostics: the grouped document wins when present;
    /// a missing grouped document is also checked against the legacy path,
    /// since writes may have landed there via the fallback.
    pub fn get_daily_metrics(
        &self,
        paths: &DualPath,
        date: &str,
    ) -> Result<Option<DailyMetrics>, StoreError> {
        if let Some(found) = self.read_metrics_doc(&paths.grouped, date)? {
            return Ok(Some(found));
        }
        self.read_metrics_doc(&paths.legacy, date)
    }

    fn read_metrics_doc(
        &self,
        collection: &str,
        date: &str,
    ) -> Result<Option<DailyMetrics>, StoreError> {
        let key = keys::doc_key(collection, date);
        match self.daily_metrics.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }
}
