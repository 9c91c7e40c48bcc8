//! Minimal framework config: bot token and log path only.
//! Loaded from the environment: `DISCORD_BOT_TOKEN`, `LOG_FILE`.

use anyhow::Result;
use std::env;

/// Discord framework configuration (connectivity and logging only).
pub struct DiscordConfig {
    pub bot_token: String,
    pub log_file: Option<String>,
}

impl DiscordConfig {
    /// Loads from environment variables: `DISCORD_BOT_TOKEN` required,
    /// `LOG_FILE` optional.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("DISCORD_BOT_TOKEN")
            .map_err(|_| anyhow::anyhow!("DISCORD_BOT_TOKEN not set"))?;
        let log_file = env::var("LOG_FILE").ok();
        Ok(Self {
            bot_token,
            log_file,
        })
    }

    /// Constructs with the given token, everything else unset.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token() {
        let config = DiscordConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.log_file.is_none());
    }
}
