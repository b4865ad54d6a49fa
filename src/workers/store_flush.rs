//! Heartbeat flush (every 5 minutes): push sled's write buffer to disk so a
//! crash between aggregation runs loses at most a few minutes of writes.

use crate::store::Store;

pub async fn run(store: &Store) {
    match store.flush() {
        Ok(()) => tracing::debug!("Store flushed"),
        Err(e) => tracing::warn!(error = %e, "Store flush failed"),
    }
}
