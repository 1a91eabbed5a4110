//! Environment configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Separate paths for the weekly ledger and the cumulative totals file
//! - 1.0.0: Initial creation with token, guild, and log level

use anyhow::{Context, Result};

/// Runtime configuration loaded from environment variables (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot token, from `DISCORD_BOT_TOKEN` (required)
    pub discord_token: String,
    /// Guild for instant slash-command registration in development,
    /// from `DISCORD_GUILD_ID` (optional; global registration when unset)
    pub discord_guild_id: Option<String>,
    /// env_logger default filter, from `LOG_LEVEL` (default `info`)
    pub log_level: String,
    /// Weekly ledger path, from `ATTENDANCE_FILE` (default `attendance.json`)
    pub attendance_file: String,
    /// Cumulative totals path, from `ATTENDANCE_TOTALS_FILE`
    /// (default `attendance_totals.json`)
    pub totals_file: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Fails with a descriptive error when `DISCORD_BOT_TOKEN` is missing so
    /// the operator sees the cause instead of a gateway auth failure later.
    pub fn from_env() -> Result<Self> {
        let discord_token = std::env::var("DISCORD_BOT_TOKEN")
            .context("DISCORD_BOT_TOKEN environment variable is not set")?;

        let discord_guild_id = std::env::var("DISCORD_GUILD_ID").ok().filter(|v| !v.is_empty());

        Ok(Config {
            discord_token,
            discord_guild_id,
            log_level: env_or("LOG_LEVEL", "info"),
            attendance_file: env_or("ATTENDANCE_FILE", "attendance.json"),
            totals_file: env_or("ATTENDANCE_TOTALS_FILE", "attendance_totals.json"),
        })
    }
}

/// Read an environment variable, falling back to a default when unset or empty.
fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_unset_uses_default() {
        // Key chosen to never exist in a real environment
        assert_eq!(env_or("CHULSEOK_TEST_UNSET_93147", "fallback"), "fallback");
    }

    #[test]
    fn test_env_or_set_wins() {
        std::env::set_var("CHULSEOK_TEST_SET_93147", "custom.json");
        assert_eq!(env_or("CHULSEOK_TEST_SET_93147", "fallback"), "custom.json");
        std::env::remove_var("CHULSEOK_TEST_SET_93147");
    }

    #[test]
    fn test_env_or_empty_uses_default() {
        std::env::set_var("CHULSEOK_TEST_EMPTY_93147", "");
        assert_eq!(env_or("CHULSEOK_TEST_EMPTY_93147", "fallback"), "fallback");
        std::env::remove_var("CHULSEOK_TEST_EMPTY_93147");
    }
}
