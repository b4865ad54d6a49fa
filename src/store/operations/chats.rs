use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// Coaching chat outcome attached to one event. `result` is the outcome
/// code: 0 = start, 1 = snooze, 2 = leave; other codes are ignored by the
/// metrics calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    #[serde(default)]
    pub commit_plan: bool,
    #[serde(default)]
    pub result: i64,
}

impl Store {
    pub fn put_chat(&self, event_path: &str, chat: &Chat) -> Result<(), StoreError> {
        let key = keys::chat_key(event_path, &chat.id);
        self.chats.insert(key.as_bytes(), Self::serialize(chat)?)?;
        Ok(())
    }

    pub fn chats_for_event(&self, event_path: &str) -> Result<Vec<Chat>, StoreError> {
        let prefix = keys::chats_prefix(event_path);
        let mut out = Vec::new();
        for item in self.chats.scan_prefix(prefix.as_bytes()) {
            let (_, raw) = item?;
            out.push(Self::deserialize(&raw)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chats_are_scoped_to_their_event() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = Store::open(tmp.path().join("chats.sled").to_str().unwrap()).unwrap();

        let chat = |id: &str| Chat {
            id: id.to_string(),
            commit_plan: false,
            result: 1,
        };
        store.put_chat("u1/events/e1", &chat("c1")).unwrap();
        store.put_chat("u1/events/e1", &chat("c2")).unwrap();
        store.put_chat("u1/events/e2", &chat("c3")).unwrap();

        assert_eq!(store.chats_for_event("u1/events/e1").unwrap().len(), 2);
        assert_eq!(store.chats_for_event("u1/events/e2").unwrap().len(), 1);
        assert!(store.chats_for_event("u1/events/e9").unwrap().is_empty());
    }
}
