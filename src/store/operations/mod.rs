pub mod app_sessions;
pub mod chats;
pub mod daily_metrics;
pub mod events;
pub mod execution_logs;
pub mod experiment_stats;
pub mod notifications;
pub mod users;
