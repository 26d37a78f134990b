use std::env;
use std::time::Duration;

use serde::Serialize;

use crate::scheduler::ConjunctionPolicy;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

/// Read and parse an env var, falling back to `default` when it is missing
/// or does not parse.
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env_opt(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(key, value = %raw, "unparseable config value, using default");
                default
            }
        },
        None => default,
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    match env_opt(key).map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        Some(v) => {
            tracing::warn!(key, value = %v, "unparseable boolean config value, using default");
            default
        }
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    pub parser: ParserConfig,
    pub search: SearchConfig,
    pub pool: PoolConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            parser: ParserConfig::from_env(),
            search: SearchConfig::from_env(),
            pool: PoolConfig::from_env(),
        }
    }

    /// Print a summary of the effective settings.
    pub fn log_summary(&self) {
        tracing::debug!("Config loaded:");
        tracing::debug!("  parser:  year_field={}", self.parser.allow_year_field);
        tracing::debug!(
            "  search:  max_scan_years={}, conjunction={}",
            self.search.max_scan_years,
            self.search.policy
        );
        tracing::debug!(
            "  pool:    workers={}, shutdown_timeout={:?}",
            self.pool.workers,
            self.pool.shutdown_timeout
        );
    }
}

// ── Parser ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ParserConfig {
    /// Accept an optional year field between day-of-week and the command.
    pub allow_year_field: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            allow_year_field: true,
        }
    }
}

impl ParserConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            allow_year_field: env_bool("CRONPLAN_YEAR_FIELD", defaults.allow_year_field),
        }
    }
}

// ── Search ────────────────────────────────────────────────────

/// Default cap on how many calendar years one search may scan.
pub const DEFAULT_MAX_SCAN_YEARS: u32 = 50;

#[derive(Debug, Clone, Serialize)]
pub struct SearchConfig {
    pub max_scan_years: u32,
    pub policy: ConjunctionPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_scan_years: DEFAULT_MAX_SCAN_YEARS,
            policy: ConjunctionPolicy::And,
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_scan_years: env_parse("CRONPLAN_MAX_SCAN_YEARS", defaults.max_scan_years),
            policy: env_parse("CRONPLAN_CONJUNCTION", defaults.policy),
        }
    }
}

// ── Pool ──────────────────────────────────────────────────────

/// Default number of concurrent parse workers.
pub const DEFAULT_POOL_WORKERS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct PoolConfig {
    pub workers: usize,
    /// How long `shutdown` waits for in-flight work before cancelling it.
    pub shutdown_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_POOL_WORKERS,
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

impl PoolConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let timeout_ms = env_parse(
            "CRONPLAN_SHUTDOWN_TIMEOUT_MS",
            defaults.shutdown_timeout.as_millis() as u64,
        );
        Self {
            workers: env_parse("CRONPLAN_POOL_WORKERS", defaults.workers).max(1),
            shutdown_timeout: Duration::from_millis(timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.parser.allow_year_field);
        assert_eq!(config.search.max_scan_years, 50);
        assert_eq!(config.search.policy, ConjunctionPolicy::And);
        assert_eq!(config.pool.workers, 10);
        assert_eq!(config.pool.shutdown_timeout, Duration::from_secs(5));
    }

    #[test]
    fn env_helpers_fall_back_on_garbage() {
        env::set_var("CRONPLAN_TEST_U32_GARBAGE", "lots");
        assert_eq!(env_parse("CRONPLAN_TEST_U32_GARBAGE", 7u32), 7);

        env::set_var("CRONPLAN_TEST_U32_OK", " 12 ");
        assert_eq!(env_parse("CRONPLAN_TEST_U32_OK", 7u32), 12);

        env::set_var("CRONPLAN_TEST_BOOL_OFF", "off");
        assert!(!env_bool("CRONPLAN_TEST_BOOL_OFF", true));

        env::set_var("CRONPLAN_TEST_BOOL_BAD", "maybe");
        assert!(env_bool("CRONPLAN_TEST_BOOL_BAD", true));

        assert!(env_bool("CRONPLAN_TEST_BOOL_UNSET", true));
    }

    #[test]
    fn conjunction_policy_reads_from_env() {
        env::set_var("CRONPLAN_TEST_POLICY", "or");
        assert_eq!(
            env_parse("CRONPLAN_TEST_POLICY", ConjunctionPolicy::And),
            ConjunctionPolicy::OrWhenBothRestricted
        );
    }
}
