use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which oracle adapter the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    /// In-process evaluator
    Local,
    /// JSON over HTTP
    Http,
    /// Script run once per request
    Process,
}

/// Which opponent strategy plays the simulated side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    Random,
    Tenpai,
}

/// Runtime settings for one match service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub oracle: OracleKind,
    pub oracle_url: String,
    pub oracle_script: String,
    pub python: String,
    pub oracle_timeout: Duration,
    pub opponent_delay: Duration,
    pub require_tenpai: bool,
    /// `None` draws a seed from the OS.
    pub match_seed: Option<u64>,
    pub opponent: OpponentKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            oracle: OracleKind::Local,
            oracle_url: "http://localhost:8000".to_string(),
            oracle_script: "python/mahjong_checker.py".to_string(),
            python: "python3".to_string(),
            oracle_timeout: Duration::from_millis(5000),
            opponent_delay: Duration::from_millis(1000),
            require_tenpai: false,
            match_seed: None,
            opponent: OpponentKind::Tenpai,
        }
    }
}

impl SessionConfig {
    /// Defaults overridden by `MAHJONG_*` environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup("MAHJONG_ORACLE") {
            cfg.oracle = match v.trim().to_ascii_lowercase().as_str() {
                "local" => OracleKind::Local,
                "http" => OracleKind::Http,
                "process" => OracleKind::Process,
                other => return Err(invalid("MAHJONG_ORACLE", other)),
            };
        }
        if let Some(v) = lookup("MAHJONG_ORACLE_URL") {
            cfg.oracle_url = v;
        }
        if let Some(v) = lookup("MAHJONG_ORACLE_SCRIPT") {
            cfg.oracle_script = v;
        }
        if let Some(v) = lookup("MAHJONG_PYTHON") {
            cfg.python = v;
        }
        if let Some(v) = lookup("MAHJONG_ORACLE_TIMEOUT_MS") {
            cfg.oracle_timeout = Duration::from_millis(parse_u64("MAHJONG_ORACLE_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = lookup("MAHJONG_OPPONENT_DELAY_MS") {
            cfg.opponent_delay = Duration::from_millis(parse_u64("MAHJONG_OPPONENT_DELAY_MS", &v)?);
        }
        if let Some(v) = lookup("MAHJONG_REQUIRE_TENPAI") {
            cfg.require_tenpai = match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => return Err(invalid("MAHJONG_REQUIRE_TENPAI", other)),
            };
        }
        if let Some(v) = lookup("MAHJONG_MATCH_SEED") {
            cfg.match_seed = Some(parse_u64("MAHJONG_MATCH_SEED", &v)?);
        }
        if let Some(v) = lookup("MAHJONG_OPPONENT") {
            cfg.opponent = match v.trim().to_ascii_lowercase().as_str() {
                "random" => OpponentKind::Random,
                "tenpai" => OpponentKind::Tenpai,
                other => return Err(invalid("MAHJONG_OPPONENT", other)),
            };
        }
        Ok(cfg)
    }

    pub fn with_oracle(mut self, oracle: OracleKind) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn with_oracle_timeout(mut self, timeout: Duration) -> Self {
        self.oracle_timeout = timeout;
        self
    }

    pub fn with_opponent_delay(mut self, delay: Duration) -> Self {
        self.opponent_delay = delay;
        self
    }

    pub fn with_require_tenpai(mut self, require: bool) -> Self {
        self.require_tenpai = require;
        self
    }

    pub fn with_match_seed(mut self, seed: u64) -> Self {
        self.match_seed = Some(seed);
        self
    }

    pub fn with_opponent(mut self, opponent: OpponentKind) -> Self {
        self.opponent = opponent;
        self
    }
}

fn invalid(name: &str, value: &str) -> AppError {
    AppError::config(format!("Invalid value for '{name}': '{value}'"))
}

fn parse_u64(name: &str, value: &str) -> Result<u64, AppError> {
    value.trim().parse::<u64>().map_err(|_| invalid(name, value))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::errors::ErrorCode;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let cfg = SessionConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, SessionConfig::default());
        assert_eq!(cfg.oracle_timeout, Duration::from_secs(5));
        assert_eq!(cfg.opponent, OpponentKind::Tenpai);
    }

    #[test]
    fn variables_override_defaults() {
        let cfg = SessionConfig::from_lookup(lookup(&[
            ("MAHJONG_ORACLE", "HTTP"),
            ("MAHJONG_ORACLE_URL", "http://oracle:9000"),
            ("MAHJONG_ORACLE_TIMEOUT_MS", "250"),
            ("MAHJONG_OPPONENT_DELAY_MS", "0"),
            ("MAHJONG_REQUIRE_TENPAI", "yes"),
            ("MAHJONG_MATCH_SEED", "42"),
            ("MAHJONG_OPPONENT", "random"),
        ]))
        .unwrap();
        assert_eq!(cfg.oracle, OracleKind::Http);
        assert_eq!(cfg.oracle_url, "http://oracle:9000");
        assert_eq!(cfg.oracle_timeout, Duration::from_millis(250));
        assert_eq!(cfg.opponent_delay, Duration::ZERO);
        assert!(cfg.require_tenpai);
        assert_eq!(cfg.match_seed, Some(42));
        assert_eq!(cfg.opponent, OpponentKind::Random);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = SessionConfig::from_lookup(lookup(&[("MAHJONG_ORACLE_TIMEOUT_MS", "soon")]))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigError);
        assert!(err.detail().contains("MAHJONG_ORACLE_TIMEOUT_MS"));

        let err = SessionConfig::from_lookup(lookup(&[("MAHJONG_ORACLE", "carrier-pigeon")]))
            .unwrap_err();
        assert!(err.detail().contains("MAHJONG_ORACLE"));
    }
}
