// src/config.rs

use std::env;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;

/// Number of mock questions generated for a multiple-choice set.
pub const DEFAULT_MCQ_QUESTION_COUNT: usize = 50;

/// Number of mock questions generated for a structured or essay set.
pub const DEFAULT_WRITTEN_QUESTION_COUNT: usize = 5;

/// Delay before the tutor's canned reply lands in a chat.
pub const DEFAULT_AI_REPLY_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub rust_log: String,
    pub ai_reply_delay: Duration,
    pub mcq_question_count: usize,
    pub written_question_count: usize,
    /// Malformed variables that fell back to their default. `from_env` runs
    /// before tracing is up, so `main` logs these once the subscriber exists.
    pub ignored_vars: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source. `from_env` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut ignored_vars = Vec::new();

        let bind_address = lookup("BIND_ADDRESS")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let rust_log = lookup("RUST_LOG")
            .unwrap_or_else(|| "info".to_string());

        let ai_reply_delay_ms = parse_or(
            "AI_REPLY_DELAY_MS",
            lookup("AI_REPLY_DELAY_MS"),
            DEFAULT_AI_REPLY_DELAY_MS,
            &mut ignored_vars,
        );
        let mcq_question_count = parse_or(
            "MCQ_QUESTION_COUNT",
            lookup("MCQ_QUESTION_COUNT"),
            DEFAULT_MCQ_QUESTION_COUNT,
            &mut ignored_vars,
        );
        let written_question_count = parse_or(
            "WRITTEN_QUESTION_COUNT",
            lookup("WRITTEN_QUESTION_COUNT"),
            DEFAULT_WRITTEN_QUESTION_COUNT,
            &mut ignored_vars,
        );

        Self {
            bind_address,
            rust_log,
            ai_reply_delay: Duration::from_millis(ai_reply_delay_ms),
            mcq_question_count,
            written_question_count,
            ignored_vars,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            rust_log: "info".to_string(),
            ai_reply_delay: Duration::from_millis(DEFAULT_AI_REPLY_DELAY_MS),
            mcq_question_count: DEFAULT_MCQ_QUESTION_COUNT,
            written_question_count: DEFAULT_WRITTEN_QUESTION_COUNT,
            ignored_vars: Vec::new(),
        }
    }
}

/// Parses a numeric variable, keeping the default when it is missing or
/// malformed. Malformed values are recorded in `ignored`.
fn parse_or<T: FromStr + Copy + std::fmt::Display>(
    key: &str,
    raw: Option<String>,
    default: T,
    ignored: &mut Vec<String>,
) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            ignored.push(format!("Ignoring malformed {}={:?}, using {}", key, raw, default));
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_vars_use_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.mcq_question_count, DEFAULT_MCQ_QUESTION_COUNT);
        assert_eq!(config.ai_reply_delay, Duration::from_millis(DEFAULT_AI_REPLY_DELAY_MS));
        assert!(config.ignored_vars.is_empty());
    }

    #[test]
    fn test_malformed_number_falls_back_and_is_recorded() {
        let config = Config::from_lookup(|key| match key {
            "MCQ_QUESTION_COUNT" => Some("abc".to_string()),
            "WRITTEN_QUESTION_COUNT" => Some(" 8 ".to_string()),
            _ => None,
        });
        assert_eq!(config.mcq_question_count, DEFAULT_MCQ_QUESTION_COUNT);
        assert_eq!(config.written_question_count, 8);
        assert_eq!(config.ignored_vars.len(), 1);
        assert!(config.ignored_vars[0].contains("MCQ_QUESTION_COUNT"));
    }
}
