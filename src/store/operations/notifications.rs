use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// Push notification attached to one event. Presence of `opened_time`
/// marks it opened; absence marks it dismissed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened_time: Option<DateTime<Utc>>,
}

impl Store {
    pub fn put_notification(
        &self,
        event_path: &str,
        notification: &Notification,
    ) -> Result<(), StoreError> {
        let key = keys::notification_key(event_path, &notification.id);
        self.notifications
            .insert(key.as_bytes(), Self::serialize(notification)?)?;
        Ok(())
    }

    pub fn notifications_for_event(
        &self,
        event_path: &str,
    ) -> Result<Vec<Notification>, StoreError> {
        let prefix = keys::notifications_prefix(event_path);
        let mut out = Vec::new();
        for item in self.notifications.scan_prefix(prefix.as_bytes()) {
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
    fn opened_time_roundtrip() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = Store::open(tmp.path().join("notifs.sled").to_str().unwrap()).unwrap();

        store
            .put_notification(
                "u1/events/e1",
                &Notification {
                    id: "n1".to_string(),
                    opened_time: Some(Utc::now()),
                },
            )
            .unwrap();
        store
            .put_notification(
                "u1/events/e1",
                &Notification {
                    id: "n2".to_string(),
                    opened_time: None,
                },
            )
            .unwrap();

        let notifs = store.notifications_for_event("u1/events/e1").unwrap();
        assert_eq!(notifs.len(), 2);
        assert_eq!(notifs.iter().filter(|n| n.opened_time.is_some()).count(), 1);
    }
}
