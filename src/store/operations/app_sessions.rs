use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::paths::{with_fallback, DualPath};
use crate::store::{Store, StoreError};

/// One app-open session. `date` is the local-day string (YYYYMMDD);
/// a missing or zero duration excludes the session from the average.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSession {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub opened_by_notification: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i64>,
}

impl Store {
    pub fn put_app_session(
        &self,
        collection: &str,
        session: &AppSession,
    ) -> Result<(), StoreError> {
        let key = keys::doc_key(collection, &session.id);
        self.app_sessions
            .insert(key.as_bytes(), Self::serialize(session)?)?;
        Ok(())
    }

    /// Sessions whose `date` equals the target day key, grouped path first,
    /// legacy on error.
    pub fn sessions_on_date(
        &self,
        paths: &DualPath,
        date: &str,
    ) -> Result<Vec<AppSession>, StoreError> {
        with_fallback(paths, |collection| self.scan_sessions(collection, date))
    }

    fn scan_sessions(&self, collection: &str, date: &str) -> Result<Vec<AppSession>, StoreError> {
        let prefix = keys::collection_prefix(collection);
        let mut out = Vec::new();
        for item in self.app_sessions.scan_prefix(prefix.as_bytes()) {
            let (_, raw) = item?;
            let doc: AppSession = Self::deserialize(&raw)?;
            if doc.date == date {
                out.push(doc);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::store::paths::{collections, dual_collection, Cohort};

    use super::*;

    #[test]
    fn date_filter_matches_exact_day_key() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = Store::open(tmp.path().join("sessions.sled").to_str().unwrap()).unwrap();
        let paths = dual_collection("u1", Cohort::Control, collections::APP_SESSIONS);

        let session = |id: &str, date: &str| AppSession {
            id: id.to_string(),
            date: date.to_string(),
            opened_by_notification: false,
            duration_seconds: Some(60),
        };
        store.put_app_session(&paths.grouped, &session("s1", "20240105")).unwrap();
        store.put_app_session(&paths.grouped, &session("s2", "20240106")).unwrap();

        let found = store.sessions_on_date(&paths, "20240105").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "s1");
    }
}
