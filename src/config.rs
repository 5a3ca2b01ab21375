use std::env;
use std::str::FromStr;

use chrono::{Duration, NaiveTime};
use dotenvy::dotenv;
use tracing::warn;

use crate::analytics::AnalyticsConfig;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,

    // Rate limiting
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    // Activity analytics
    pub lunch_start: NaiveTime,
    pub lunch_duration_minutes: i64,
    pub active_gap_seconds: i64,
    pub work_deduction_minutes: i64,
}

/// Optional variable, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

fn parse_clock(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = AnalyticsConfig::default();

        let lunch_start = match env::var("LUNCH_START") {
            Ok(raw) => parse_clock(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Invalid LUNCH_START, expected HH:MM");
                defaults.lunch_start
            }),
            Err(_) => defaults.lunch_start,
        };

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),

            rate_protected_per_min: env_or("RATE_PROTECTED_PER_MIN", 1000),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            lunch_start,
            lunch_duration_minutes: env_or("LUNCH_DURATION_MINUTES", defaults.lunch_duration.num_minutes()),
            active_gap_seconds: env_or("ACTIVE_GAP_SECONDS", defaults.active_gap_threshold.num_seconds()),
            work_deduction_minutes: env_or("WORK_DEDUCTION_MINUTES", defaults.work_deduction.num_minutes()),
        }
    }

    pub fn analytics(&self) -> AnalyticsConfig {
        AnalyticsConfig {
            lunch_start: self.lunch_start,
            lunch_duration: Duration::minutes(self.lunch_duration_minutes.max(0)),
            active_gap_threshold: Duration::seconds(self.active_gap_seconds.max(0)),
            work_deduction: Duration::minutes(self.work_deduction_minutes.max(0)),
        }
    }
}
