use crate::board::{ActionTimings, RevealPlan, DEFAULT_SEARCH_DEBOUNCE};
use crate::board::notify::DEFAULT_NOTIFICATION_TTL;
use std::env;
use std::fmt;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub board: BoardConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let board = BoardConfig {
            search_debounce: duration_var("BOARD_SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE)?,
            apply_delay: duration_var(
                "BOARD_APPLY_DELAY_MS",
                ActionTimings::default().apply_delay,
            )?,
            load_more_delay: duration_var(
                "BOARD_LOAD_MORE_DELAY_MS",
                ActionTimings::default().load_more_delay,
            )?,
            notification_ttl: duration_var("BOARD_NOTIFICATION_TTL_MS", DEFAULT_NOTIFICATION_TTL)?,
            fade: duration_var("BOARD_FADE_MS", RevealPlan::default().fade)?,
            reveal_stagger: duration_var("BOARD_REVEAL_STAGGER_MS", RevealPlan::default().stagger)?,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            board,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn duration_var(key: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidDuration { key }),
        Err(_) => Ok(default),
    }
}

/// Timer settings for the presentation adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub search_debounce: Duration,
    pub apply_delay: Duration,
    pub load_more_delay: Duration,
    pub notification_ttl: Duration,
    pub fade: Duration,
    pub reveal_stagger: Duration,
}

impl BoardConfig {
    pub fn action_timings(&self) -> ActionTimings {
        ActionTimings {
            apply_delay: self.apply_delay,
            load_more_delay: self.load_more_delay,
        }
    }

    pub fn reveal_plan(&self) -> RevealPlan {
        RevealPlan {
            fade: self.fade,
            stagger: self.reveal_stagger,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        let timings = ActionTimings::default();
        let reveal = RevealPlan::default();
        Self {
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            apply_delay: timings.apply_delay,
            load_more_delay: timings.load_more_delay,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            fade: reveal.fade,
            reveal_stagger: reveal.stagger,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidDuration { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDuration { key } => {
                write!(f, "{} must be a whole number of milliseconds", key)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
