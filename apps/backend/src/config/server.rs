use std::env;
use std::time::Duration;

use crate::domain::rules::DEFAULT_MAX_POINTS;
use crate::error::AppError;

/// Server settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub reply_timeout: Duration,
    pub watchdog_interval: Duration,
    pub default_max_points: u32,
}

/// What a `Session` needs from the server settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub reply_timeout: Duration,
}

/// What a `Lobby` needs from the server settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LobbyConfig {
    pub watchdog_interval: Duration,
    pub default_max_points: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            reply_timeout: Duration::from_millis(5000),
            watchdog_interval: Duration::from_secs(30),
            default_max_points: DEFAULT_MAX_POINTS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; unset variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("HEARTS_HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "HEARTS_PORT", defaults.port)?;
        let reply_ms = parse_var(&lookup, "HEARTS_REPLY_TIMEOUT_MS", 5000u64)?;
        let watchdog_secs = parse_var(&lookup, "HEARTS_WATCHDOG_INTERVAL_SECS", 30u64)?;
        let default_max_points =
            parse_var(&lookup, "HEARTS_DEFAULT_MAX_POINTS", defaults.default_max_points)?;

        if watchdog_secs == 0 {
            return Err(AppError::config(
                "HEARTS_WATCHDOG_INTERVAL_SECS must be greater than 0",
            ));
        }
        if default_max_points == 0 {
            return Err(AppError::config(
                "HEARTS_DEFAULT_MAX_POINTS must be greater than 0",
            ));
        }

        Ok(Self {
            host,
            port,
            reply_timeout: Duration::from_millis(reply_ms),
            watchdog_interval: Duration::from_secs(watchdog_secs),
            default_max_points,
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            reply_timeout: self.reply_timeout,
        }
    }

    pub fn lobby_config(&self) -> LobbyConfig {
        LobbyConfig {
            watchdog_interval: self.watchdog_interval,
            default_max_points: self.default_max_points,
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::config(format!(
                "Environment variable '{name}' has invalid value '{raw}'"
            ))
        }),
    }
}
