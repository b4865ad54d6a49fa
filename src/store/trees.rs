pub const USERS: &str = "users";
pub const EVENTS: &str = "events";
pub const CHATS: &str = "chats";
pub const NOTIFICATIONS: &str = "notifications";
pub const APP_SESSIONS: &str = "app_sessions";
pub const DAILY_METRICS: &str = "daily_metrics";
pub const EXECUTION_LOGS: &str = "daily_metrics_execution_log";
pub const EXPERIMENT_STATS: &str = "experiment_stats";
