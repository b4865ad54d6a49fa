use std::sync::Arc;
use std::time::Instant;

use chrono_tz::Tz;
use tokio::sync::broadcast;

use crate::config::Config;
use crate::services::coach::CoachProvider;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    coach: Arc<CoachProvider>,
    config: Arc<Config>,
    shutdown_tx: broadcast::Sender<()>,
    started_at: Instant,
}

impl AppState {
    pub fn new(
        store: Arc<Store>,
        coach: Arc<CoachProvider>,
        config: &Config,
        shutdown_tx: broadcast::Sender<()>,
    ) -> Self {
        Self {
            store,
            coach,
            config: Arc::new(config.clone()),
            shutdown_tx,
            started_at: Instant::now(),
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn coach(&self) -> &CoachProvider {
        &self.coach
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn timezone(&self) -> Tz {
        self.config.aggregation.timezone
    }

    pub fn aggregation_concurrency(&self) -> usize {
        self.config.aggregation.concurrency
    }

    pub fn shutdown_rx(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn shutdown_tx(&self) -> &broadcast::Sender<()> {
        &self.shutdown_tx
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_state() -> (tempfile::TempDir, AppState) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut config = Config::from_env();
        config.sled_path = tmp.path().join("state.sled").to_string_lossy().to_string();
        let store = Arc::new(Store::open(&config.sled_path).unwrap());
        let coach = Arc::new(CoachProvider::new(&config.coach));
        let (tx, _) = broadcast::channel(4);
        (tmp, AppState::new(store, coach, &config, tx))
    }

    #[tokio::test]
    async fn shutdown_receiver_can_clone() {
        let (_tmp, state) = build_state();
        let mut rx1 = state.shutdown_rx();
        let mut rx2 = state.shutdown_rx();
        state.shutdown_tx().send(()).unwrap();
        rx1.recv().await.unwrap();
        rx2.recv().await.unwrap();
    }

    #[tokio::test]
    async fn timezone_comes_from_config() {
        let (_tmp, state) = build_state();
        assert_eq!(state.timezone(), state.config().aggregation.timezone);
    }
}
