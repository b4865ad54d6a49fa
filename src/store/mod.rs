pub mod keys;
pub mod operations;
pub mod paths;
pub mod trees;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::Db;
use thiserror::Error;

/// sled-backed document store. One tree per collection kind; document keys
/// are path strings mirroring the hierarchical layout (see `keys`).
#[derive(Debug)]
pub struct Store {
    db: Db,
    pub users: sled::Tree,
    pub events: sled::Tree,
    pub chats: sled::Tree,
    pub notifications: sled::Tree,
    pub app_sessions: sled::Tree,
    pub daily_metrics: sled::Tree,
    pub execution_logs: sled::Tree,
    pub experiment_stats: sled::Tree,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("not found: entity={entity}, key={key}")]
    NotFound { entity: String, key: String },
    #[error("validation error: {0}")]
    Validation(String),
}

impl Store {
    pub fn open(sled_path: &str) -> Result<Self, StoreError> {
        let db = sled::open(sled_path)?;
        let users = db.open_tree(trees::USERS)?;
        let events = db.open_tree(trees::EVENTS)?;
        let chats = db.open_tree(trees::CHATS)?;
        let notifications = db.open_tree(trees::NOTIFICATIONS)?;
        let app_sessions = db.open_tree(trees::APP_SESSIONS)?;
        let daily_metrics = db.open_tree(trees::DAILY_METRICS)?;
        let execution_logs = db.open_tree(trees::EXECUTION_LOGS)?;
        let experiment_stats = db.open_tree(trees::EXPERIMENT_STATS)?;

        Ok(Self {
            db,
            users,
            events,
            chats,
            notifications,
            app_sessions,
            daily_metrics,
            execution_logs,
            experiment_stats,
        })
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    pub fn raw_db(&self) -> &Db {
        &self.db
    }

    pub(crate) fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec(value)?)
    }

    pub(crate) fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
