use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Completed,
    Failed,
}

/// Run-level record for one aggregation day; retried runs overwrite it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionLog {
    pub date: String,
    pub executed_at: DateTime<FixedOffset>,
    pub processed_count: u64,
    pub error_count: u64,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionLog {
    pub fn completed(
        date: String,
        executed_at: DateTime<FixedOffset>,
        processed_count: u64,
        error_count: u64,
    ) -> Self {
        Self {
            date,
            executed_at,
            processed_count,
            error_count,
            status: JobStatus::Completed,
            error: None,
        }
    }

    pub fn failed(date: String, executed_at: DateTime<FixedOffset>, error: String) -> Self {
        Self {
            date,
            executed_at,
            processed_count: 0,
            error_count: 0,
            status: JobStatus::Failed,
            error: Some(error),
        }
    }
}

impl Store {
    pub fn put_execution_log(&self, log: &ExecutionLog) -> Result<(), StoreError> {
        let key = keys::execution_log_key(&log.date);
        self.execution_logs
            .insert(key.as_bytes(), Self::serialize(log)?)?;
        Ok(())
    }

    pub fn get_execution_log(&self, date: &str) -> Result<Option<ExecutionLog>, StoreError> {
        let key = keys::execution_log_key(date);
        match self.execution_logs.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }
}
