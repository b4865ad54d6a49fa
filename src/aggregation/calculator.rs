use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use crate::aggregation::cohort::resolve_cohort;
use crate::aggregation::window::{day_key, day_window};
use crate::constants::{CHAT_RESULT_LEAVE, CHAT_RESULT_SNOOZE, CHAT_RESULT_START};
use crate::store::operations::daily_metrics::DailyMetrics;
use crate::store::paths::{collections, dual_collection, Cohort};
use crate::store::{Store, StoreError};

/// Derive one user's daily metrics from the events, chats, notifications and
/// app sessions recorded for `target_day`. Read-only; persisting the result
/// is the caller's job. Returns the resolved cohort alongside the record so
/// the caller can write to the matching schema path.
pub fn compute(
    store: &Store,
    user_id: &str,
    target_day: NaiveDate,
    tz: Tz,
) -> Result<(Cohort, DailyMetrics), StoreError> {
    let cohort = resolve_cohort(store, user_id);
    let (start, end) = day_window(target_day, tz);
    let date = day_key(target_day);

    let event_paths = dual_collection(user_id, cohort, collections::EVENTS);
    let events = store.events_in_window(&event_paths, start, end)?;

    let event_total_count = events.len() as i64;
    let mut event_complete_count = 0i64;
    let mut event_overdue_count = 0i64;
    let mut event_commit_plan_count = 0i64;

    let mut chat_total_count = 0i64;
    let mut chat_start_count = 0i64;
    let mut chat_snooze_count = 0i64;
    let mut chat_leave_count = 0i64;

    let mut notif_total_count = 0i64;
    let mut notif_open_count = 0i64;

    for fetched in &events {
        let event = &fetched.doc;
        if event.is_done {
            event_complete_count += 1;
        }
        // Overdue is judged against the window end, not wall-clock "now":
        // an unfinished event counts once its scheduled time precedes the
        // end of its own day.
        if event.scheduled_start_time < end && !event.is_done {
            event_overdue_count += 1;
        }

        let chats = store.chats_for_event(&fetched.path)?;
        chat_total_count += chats.len() as i64;
        // 每个 event 最多贡献一次 commit_plan，后续 chat 不重复计数
        if chats.iter().any(|c| c.commit_plan) {
            event_commit_plan_count += 1;
        }
        for chat in &chats {
            match chat.result {
                CHAT_RESULT_START => chat_start_count += 1,
                CHAT_RESULT_SNOOZE => chat_snooze_count += 1,
                CHAT_RESULT_LEAVE => chat_leave_count += 1,
                other => {
                    tracing::debug!(user_id, result = other, "Ignoring unknown chat result code");
                }
            }
        }

        let notifications = store.notifications_for_event(&fetched.path)?;
        notif_total_count += notifications.len() as i64;
        notif_open_count += notifications
            .iter()
            .filter(|n| n.opened_time.is_some())
            .count() as i64;
    }

    let session_paths = dual_collection(user_id, cohort, collections::APP_SESSIONS);
    let sessions = store.sessions_on_date(&session_paths, &date)?;

    let app_open_count = sessions.len() as i64;
    let app_open_by_notif_count = sessions.iter().filter(|s| s.opened_by_notification).count() as i64;
    let durations: Vec<i64> = sessions
        .iter()
        .filter_map(|s| s.duration_seconds)
        .filter(|d| *d > 0)
        .collect();
    let app_average_open_time = if durations.is_empty() {
        0
    } else {
        durations.iter().sum::<i64>() / durations.len() as i64
    };

    let metrics = DailyMetrics {
        event_total_count,
        event_overdue_count,
        event_complete_count,
        event_not_finish_count: event_total_count - event_complete_count,
        event_commit_plan_count,
        notif_total_count,
        notif_open_count,
        notif_dismiss_count: notif_total_count - notif_open_count,
        app_open_count,
        app_average_open_time,
        app_open_by_notif_count,
        chat_total_count,
        chat_leave_count,
        chat_start_count,
        chat_snooze_count,
        date,
        created_at: Utc::now().with_timezone(&tz).fixed_offset(),
        timezone: tz.to_string(),
    };

    Ok((cohort, metrics))
}
