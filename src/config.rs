use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use chrono_tz::Tz;

use crate::constants::DEFAULT_AGGREGATION_CONCURRENCY;

#[derive(Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub sled_path: String,
    pub cors_origin: String,
    pub worker: WorkerConfig,
    pub aggregation: AggregationConfig,
    pub coach: CoachConfig,
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub is_leader: bool,
}

#[derive(Debug, Clone)]
pub struct AggregationConfig {
    /// App 的固定运营时区，日报窗口据此换算为 UTC 区间
    pub timezone: Tz,
    pub concurrency: usize,
}

#[derive(Clone)]
pub struct CoachConfig {
    pub enabled: bool,
    pub mock: bool,
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("enable_file_logs", &self.enable_file_logs)
            .field("log_dir", &self.log_dir)
            .field("sled_path", &self.sled_path)
            .field("cors_origin", &self.cors_origin)
            .field("worker", &self.worker)
            .field("aggregation", &self.aggregation)
            .field("coach", &self.coach)
            .finish()
    }
}

impl fmt::Debug for CoachConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoachConfig")
            .field("enabled", &self.enabled)
            .field("mock", &self.mock)
            .field("api_url", &self.api_url)
            .field("api_key", &"***REDACTED***")
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env_or_parse("HOST", IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))),
            port: env_or_parse("PORT", 3000_u16),
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            sled_path: env_or("SLED_PATH", "./data/proact.sled"),
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:5173"),
            worker: WorkerConfig {
                is_leader: env_or_bool("WORKER_LEADER", true),
            },
            aggregation: AggregationConfig {
                timezone: env_or_parse("APP_TIMEZONE", chrono_tz::Asia::Taipei),
                concurrency: env_or_parse(
                    "AGGREGATION_CONCURRENCY",
                    DEFAULT_AGGREGATION_CONCURRENCY,
                ),
            },
            coach: CoachConfig {
                enabled: env_or_bool("COACH_ENABLED", false),
                mock: env_or_bool("COACH_MOCK", true),
                api_url: env_or(
                    "COACH_API_URL",
                    "https://api.openai.com/v1/chat/completions",
                ),
                api_key: env_or("COACH_API_KEY", ""),
                model: env_or("COACH_MODEL", "gpt-4o-mini"),
                timeout_secs: env_or_parse("COACH_TIMEOUT_SECS", 30_u64),
            },
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, OnceLock};

    use super::*;

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn managed_keys() -> &'static [&'static str] {
        &[
            "HOST",
            "PORT",
            "RUST_LOG",
            "APP_TIMEZONE",
            "AGGREGATION_CONCURRENCY",
            "COACH_ENABLED",
            "COACH_MOCK",
            "COACH_TIMEOUT_SECS",
        ]
    }

    fn clear_keys(keys: &[&str]) {
        for key in keys {
            env::remove_var(key);
        }
    }

    #[test]
    fn loads_defaults_when_missing() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.aggregation.timezone, chrono_tz::Asia::Taipei);
        assert_eq!(cfg.aggregation.concurrency, DEFAULT_AGGREGATION_CONCURRENCY);
        assert!(!cfg.coach.enabled);
        assert!(cfg.coach.mock);
    }

    #[test]
    fn parses_timezone_and_concurrency() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("APP_TIMEZONE", "America/New_York");
        env::set_var("AGGREGATION_CONCURRENCY", "4");
        env::set_var("COACH_TIMEOUT_SECS", "42");

        let cfg = Config::from_env();
        assert_eq!(cfg.aggregation.timezone, chrono_tz::America::New_York);
        assert_eq!(cfg.aggregation.concurrency, 4);
        assert_eq!(cfg.coach.timeout_secs, 42);
    }

    #[test]
    fn invalid_values_fall_back() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("PORT", "bad");
        env::set_var("APP_TIMEZONE", "Mars/Olympus_Mons");
        env::set_var("AGGREGATION_CONCURRENCY", "x");

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.aggregation.timezone, chrono_tz::Asia::Taipei);
        assert_eq!(cfg.aggregation.concurrency, DEFAULT_AGGREGATION_CONCURRENCY);
    }

    #[test]
    fn coach_flags_isolation() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("COACH_ENABLED", "true");
        env::set_var("COACH_MOCK", "false");

        let cfg = Config::from_env();
        assert!(cfg.coach.enabled);
        assert!(!cfg.coach.mock);
    }
}
