use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::paths::{with_fallback, DualPath};
use crate::store::{Store, StoreError};

/// Scheduled task event. Field names match the mobile client's documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "scheduledStartTime")]
    pub scheduled_start_time: DateTime<Utc>,
    #[serde(rename = "isDone", default)]
    pub is_done: bool,
    #[serde(default)]
    pub status: String,
}

/// An event together with the document path it was read from, so chats and
/// notifications can be fetched from the same schema.
#[derive(Debug, Clone)]
pub struct FetchedEvent {
    pub path: String,
    pub doc: Event,
}

impl Store {
    pub fn put_event(&self, collection: &str, event: &Event) -> Result<(), StoreError> {
        let key = keys::doc_key(collection, &event.id);
        self.events
            .insert(key.as_bytes(), Self::serialize(event)?)?;
        Ok(())
    }

    /// Events with `scheduled_start_time` in `[start, end)`, grouped path
    /// first, legacy on error. A corrupt document is a genuine read failure
    /// and propagates (triggering the fallback, or the caller's error path).
    pub fn events_in_window(
        &self,
        paths: &DualPath,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<FetchedEvent>, StoreError> {
        with_fallback(paths, |collection| self.scan_events(collection, start, end))
    }

    fn scan_events(
        &self,
        collection: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<FetchedEvent>, StoreError> {
        let prefix = keys::collection_prefix(collection);
        let mut out = Vec::new();
        for item in self.events.scan_prefix(prefix.as_bytes()) {
            let (key, raw) = item?;
            let doc: Event = Self::deserialize(&raw)?;
            if doc.scheduled_start_time >= start && doc.scheduled_start_time < end {
                out.push(FetchedEvent {
                    path: String::from_utf8_lossy(&key).into_owned(),
                    doc,
                });
            }
        }
        Ok(out)
    }
}
