use chrono::{DateTime, Days, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::constants::DATE_KEY_FORMAT;

/// UTC half-open interval `[start, end)` covering one calendar day in `tz`,
/// local midnight to next local midnight. Total: 23–25 hours across DST
/// transitions, 24 otherwise.
pub fn day_window(day: NaiveDate, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = day.checked_add_days(Days::new(1)).unwrap_or(day);
    (local_midnight(day, tz), local_midnight(next, tz))
}

/// YYYYMMDD key for one calendar day.
pub fn day_key(day: NaiveDate) -> String {
    day.format(DATE_KEY_FORMAT).to_string()
}

fn local_midnight(day: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = day.and_time(NaiveTime::MIN);
    let local = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        // 秋季回拨：同一本地时刻出现两次，取较早的偏移
        LocalResult::Ambiguous(earliest, _) => earliest,
        // 春季跳变：当天从间隙之后第一个有效时刻开始
        LocalResult::None => match tz.from_local_datetime(&(naive + Duration::hours(1))) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
            LocalResult::None => tz.from_utc_datetime(&naive),
        },
    };
    local.with_timezone(&Utc)
}
