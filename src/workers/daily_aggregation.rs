//! Daily metrics aggregation (01:00 app-local time).

use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;

use crate::aggregation::job;
use crate::store::Store;

pub async fn run(store: &Arc<Store>, tz: Tz, concurrency: usize) {
    tracing::info!("Daily aggregation worker running");

    match job::run_scheduled(store, tz, Utc::now(), concurrency).await {
        Ok(summary) => {
            tracing::info!(
                date = %summary.date,
                processed = summary.processed_count,
                errors = summary.error_count,
                "Daily aggregation complete"
            );
        }
        Err(e) => {
            // 已写入 failed 执行日志，这里只向调度器侧报告
            tracing::error!(error = %e, "Daily aggregation run failed");
        }
    }
}
