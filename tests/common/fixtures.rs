use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

use proact_backend::store::operations::app_sessions::AppSession;
use proact_backend::store::operations::chats::Chat;
use proact_backend::store::operations::events::Event;
use proact_backend::store::operations::notifications::Notification;
use proact_backend::store::operations::users::UserProfile;
use proact_backend::store::keys;
use proact_backend::store::Store;

pub const TZ: Tz = chrono_tz::Asia::Taipei;

pub fn seed_user(store: &Store, id: &str, app_config: Option<i64>) {
    store
        .put_user_profile(&UserProfile {
            id: id.to_string(),
            app_config,
            created_at: Utc::now(),
        })
        .expect("put user profile");
}

/// Instant at `hour:00` local time on the given day in the app timezone.
pub fn local_instant(y: i32, m: u32, d: u32, hour: u32) -> DateTime<Utc> {
    TZ.with_ymd_and_hms(y, m, d, hour, 0, 0)
        .unwrap()
        .with_timezone(&Utc)
}

/// Insert an event and return its document path, for attaching sub-entities.
pub fn seed_event(
    store: &Store,
    collection: &str,
    id: &str,
    scheduled_start: DateTime<Utc>,
    is_done: bool,
) -> String {
    store
        .put_event(
            collection,
            &Event {
                id: id.to_string(),
                scheduled_start_time: scheduled_start,
                is_done,
                status: "scheduled".to_string(),
            },
        )
        .expect("put event");
    keys::doc_key(collection, id)
}

pub fn seed_chat(store: &Store, event_path: &str, id: &str, commit_plan: bool, result: i64) {
    store
        .put_chat(
            event_path,
            &Chat {
                id: id.to_string(),
                commit_plan,
                result,
            },
        )
        .expect("put chat");
}

pub fn seed_notification(
    store: &Store,
    event_path: &str,
    id: &str,
    opened_time: Option<DateTime<Utc>>,
) {
    store
        .put_notification(
            event_path,
            &Notification {
                id: id.to_string(),
                opened_time,
            },
        )
        .expect("put notification");
}

pub fn seed_session(
    store: &Store,
    collection: &str,
    id: &str,
    date: &str,
    opened_by_notification: bool,
    duration_seconds: Option<i64>,
) {
    store
        .put_app_session(
            collection,
            &AppSession {
                id: id.to_string(),
                date: date.to_string(),
                opened_by_notification,
                duration_seconds,
            },
        )
        .expect("put app session");
}

/// Write raw bytes at a document key, to simulate a corrupt document that
/// makes reads of its collection fail.
pub fn corrupt_doc(tree: &sled::Tree, collection: &str, id: &str) {
    tree.insert(keys::doc_key(collection, id).as_bytes(), b"{not json".as_ref())
        .expect("insert corrupt doc");
}
