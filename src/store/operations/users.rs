use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// User profile document. `app_config` is the experiment-group flag:
/// 0 = control, any other value or absent = experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_config: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Store {
    pub fn put_user_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let key = keys::user_key(&profile.id);
        self.users
            .insert(key.as_bytes(), Self::serialize(profile)?)?;
        Ok(())
    }

    pub fn get_user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let key = keys::user_key(user_id);
        match self.users.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    /// Enumerate every user profile. An unreadable profile aborts the listing;
    /// the aggregation job treats that as batch-fatal (§ execution log).
    pub fn list_users(&self) -> Result<Vec<UserProfile>, StoreError> {
        let mut out = Vec::new();
        for item in self.users.iter() {
            let (_, raw) = item?;
            out.push(Self::deserialize(&raw)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> (tempfile::TempDir, Store) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = Store::open(tmp.path().join("users.sled").to_str().unwrap()).unwrap();
        (tmp, store)
    }

    #[test]
    fn profile_roundtrip_preserves_app_config() {
        let (_tmp, store) = open_store();
        let profile = UserProfile {
            id: "u1".to_string(),
            app_config: Some(0),
            created_at: Utc::now(),
        };
        store.put_user_profile(&profile).unwrap();

        let loaded = store.get_user_profile("u1").unwrap().unwrap();
        assert_eq!(loaded.app_config, Some(0));
        assert!(store.get_user_profile("nobody").unwrap().is_none());
    }

    #[test]
    fn list_users_fails_on_corrupt_profile() {
        let (_tmp, store) = open_store();
        store.users.insert(b"bad", b"{not json".as_ref()).unwrap();
        assert!(store.list_users().is_err());
    }
}
