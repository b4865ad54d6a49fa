//! Document path keys.
//!
//! Per-user documents live under path-style keys rooted at the user id:
//! legacy `"{uid}/events/{eid}"`, grouped `"{uid}/{cohort}/data/events/{eid}"`.
//! Sub-entity keys extend their parent event's path, so chats and
//! notifications always live in the same schema their event was written to.

pub fn user_key(user_id: &str) -> String {
    user_id.to_string()
}

pub fn doc_key(collection: &str, doc_id: &str) -> String {
    format!("{collection}/{doc_id}")
}

pub fn collection_prefix(collection: &str) -> String {
    format!("{collection}/")
}

pub fn chats_prefix(event_path: &str) -> String {
    format!("{event_path}/chats/")
}

pub fn chat_key(event_path: &str, chat_id: &str) -> String {
    format!("{event_path}/chats/{chat_id}")
}

pub fn notifications_prefix(event_path: &str) -> String {
    format!("{event_path}/notifications/")
}

pub fn notification_key(event_path: &str, notification_id: &str) -> String {
    format!("{event_path}/notifications/{notification_id}")
}

pub fn execution_log_key(date: &str) -> String {
    date.to_string()
}
