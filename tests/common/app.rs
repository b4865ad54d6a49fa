use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;
use tokio::sync::broadcast;

use proact_backend::config::{AggregationConfig, CoachConfig, Config, WorkerConfig};
use proact_backend::routes::build_router;
use proact_backend::services::coach::CoachProvider;
use proact_backend::state::AppState;
use proact_backend::store::Store;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
    _temp_dir: TempDir,
}

pub async fn spawn_with_coach(coach_enabled: bool) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("proact-test.sled");

    // 直接构造 Config，避免使用 set_var 造成多线程测试环境变量竞态
    let config = Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path: sled_path.to_string_lossy().to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        worker: WorkerConfig { is_leader: false },
        aggregation: AggregationConfig {
            timezone: chrono_tz::Asia::Taipei,
            concurrency: 4,
        },
        coach: CoachConfig {
            enabled: coach_enabled,
            mock: true,
            api_url: String::new(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 5,
        },
    };

    let store = Arc::new(Store::open(&config.sled_path).expect("open store"));
    let coach = Arc::new(CoachProvider::new(&config.coach));
    let (shutdown_tx, _) = broadcast::channel::<()>(8);

    let state = AppState::new(store, coach, &config, shutdown_tx);

    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        config,
        _temp_dir: temp_dir,
    }
}

pub async fn spawn_test_app() -> TestApp {
    spawn_with_coach(true).await
}
