//! Runtime configuration from the environment.
//!
//! Supported variables:
//! - `MEDDIAG_LOG_MODE`: `file`, `stdout` or `auto`
//! - `MEDDIAG_LOG_FILE`: log path in file mode
//! - `MEDDIAG_DIAGNOSIS_DELAY_MS`
//! - `MEDDIAG_REGISTRATION_DELAY_MS`
//! - `MEDDIAG_SUCCESS_RESET_MS`
//! - `MEDDIAG_SEED_DEMO`: preload demo records (`true`/`false`)
//! - `MEDDIAG_SUGGESTER_SEED`: fixed RNG seed for the mock suggester
//!
//! Unparseable values are ignored and the default is kept.

use std::time::Duration;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    File,
    Stdout,
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise.
    Auto,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_mode: LogMode,
    pub log_file: String,
    /// Simulated latency before a diagnosis is produced.
    pub diagnosis_delay: Duration,
    /// Simulated latency before a registration is confirmed.
    pub registration_delay: Duration,
    /// How long the registration success screen stays up.
    pub success_reset: Duration,
    pub seed_demo: bool,
    pub suggester_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_mode: LogMode::Auto,
            log_file: "meddiag.log".to_string(),
            diagnosis_delay: Duration::from_millis(2000),
            registration_delay: Duration::from_millis(1500),
            success_reset: Duration::from_millis(2000),
            seed_demo: true,
            suggester_seed: None,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

fn parse_millis(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_millis)
}

impl AppConfig {
    /// Load config from the process environment (best-effort).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("MEDDIAG_LOG_MODE") {
            cfg.log_mode = LogMode::parse(&v);
        }
        if let Some(v) = lookup("MEDDIAG_LOG_FILE") {
            if !v.trim().is_empty() {
                cfg.log_file = v.trim().to_string();
            }
        }
        if let Some(d) = lookup("MEDDIAG_DIAGNOSIS_DELAY_MS").as_deref().and_then(parse_millis) {
            cfg.diagnosis_delay = d;
        }
        if let Some(d) = lookup("MEDDIAG_REGISTRATION_DELAY_MS")
            .as_deref()
            .and_then(parse_millis)
        {
            cfg.registration_delay = d;
        }
        if let Some(d) = lookup("MEDDIAG_SUCCESS_RESET_MS").as_deref().and_then(parse_millis) {
            cfg.success_reset = d;
        }
        if let Some(b) = lookup("MEDDIAG_SEED_DEMO").as_deref().and_then(parse_bool) {
            cfg.seed_demo = b;
        }
        if let Some(v) = lookup("MEDDIAG_SUGGESTER_SEED") {
            match v.trim().parse::<u64>() {
                Ok(seed) => cfg.suggester_seed = Some(seed),
                Err(_) => tracing::warn!("Ignoring invalid MEDDIAG_SUGGESTER_SEED"),
            }
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg.log_mode, LogMode::Auto);
        assert_eq!(cfg.diagnosis_delay, Duration::from_millis(2000));
        assert_eq!(cfg.registration_delay, Duration::from_millis(1500));
        assert!(cfg.seed_demo);
        assert!(cfg.suggester_seed.is_none());
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("MEDDIAG_LOG_MODE", "stdout"),
            ("MEDDIAG_DIAGNOSIS_DELAY_MS", "0"),
            ("MEDDIAG_SEED_DEMO", "false"),
            ("MEDDIAG_SUGGESTER_SEED", "42"),
        ]));
        assert_eq!(cfg.log_mode, LogMode::Stdout);
        assert_eq!(cfg.diagnosis_delay, Duration::ZERO);
        assert!(!cfg.seed_demo);
        assert_eq!(cfg.suggester_seed, Some(42));
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("MEDDIAG_DIAGNOSIS_DELAY_MS", "soon"),
            ("MEDDIAG_SEED_DEMO", "maybe"),
            ("MEDDIAG_SUGGESTER_SEED", "-1"),
        ]));
        assert_eq!(cfg.diagnosis_delay, Duration::from_millis(2000));
        assert!(cfg.seed_demo);
        assert!(cfg.suggester_seed.is_none());
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
