//! Configuration handling for the application.
//!
//! Everything is environment-driven with development defaults, so the binary
//! runs out of the box and container platforms can override per deployment.
//! Schedule fields are validated here so the scheduler never has to deal with
//! an out-of-range hour or minute.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Environment variable names. Keeping them public lets tests refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_PUSH_HOUR: &str = "PUSH_HOUR";
pub const ENV_PUSH_MINUTE: &str = "PUSH_MINUTE";
pub const ENV_PUSHPLUS_TOKEN: &str = "PUSHPLUS_TOKEN";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:10000";
const DEFAULT_PUSH_HOUR: u8 = 15;
const DEFAULT_PUSH_MINUTE: u8 = 45;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// One immutable cron rule for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub hour: u8,
    pub minute: u8,
}

impl ScheduleConfig {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ConfigError> {
        if hour > 23 {
            return Err(ConfigError::InvalidValue {
                field: ENV_PUSH_HOUR,
                reason: format!("hour must be 0-23, got {hour}"),
            });
        }
        if minute > 59 {
            return Err(ConfigError::InvalidValue {
                field: ENV_PUSH_MINUTE,
                reason: format!("minute must be 0-59, got {minute}"),
            });
        }
        Ok(Self { hour, minute })
    }
}

/// Application runtime configuration. Read-only after process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    schedule: ScheduleConfig,
    pushplus_token: String,
    fetch_timeout_secs: u64,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let hour = parse_env(ENV_PUSH_HOUR, DEFAULT_PUSH_HOUR)?;
        let minute = parse_env(ENV_PUSH_MINUTE, DEFAULT_PUSH_MINUTE)?;
        let schedule = ScheduleConfig::new(hour, minute)?;
        let pushplus_token = env::var(ENV_PUSHPLUS_TOKEN).unwrap_or_default();
        let fetch_timeout_secs = parse_env(ENV_FETCH_TIMEOUT_SECS, DEFAULT_FETCH_TIMEOUT_SECS)?;
        Ok(Self {
            bind_addr,
            schedule,
            pushplus_token,
            fetch_timeout_secs,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    /// Daily push schedule, local wall-clock time.
    pub fn schedule(&self) -> ScheduleConfig {
        self.schedule
    }

    /// Credential for the pushplus notification channel. May be empty in
    /// development; pushplus then rejects the delivery and the failure is
    /// logged rather than fatal.
    pub fn pushplus_token(&self) -> &str {
        &self.pushplus_token
    }

    /// Uniform timeout applied to every outbound page fetch.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn parse_env<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
            field: key,
            reason: format!("{e}"),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_BIND_ADDR,
            ENV_PUSH_HOUR,
            ENV_PUSH_MINUTE,
            ENV_PUSHPLUS_TOKEN,
            ENV_FETCH_TIMEOUT_SECS,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.schedule(), ScheduleConfig::new(15, 45).unwrap());
        assert_eq!(cfg.pushplus_token(), "");
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_BIND_ADDR, "127.0.0.1:9000");
            env::set_var(ENV_PUSH_HOUR, "7");
            env::set_var(ENV_PUSH_MINUTE, "0");
            env::set_var(ENV_PUSHPLUS_TOKEN, "tok-123");
            env::set_var(ENV_FETCH_TIMEOUT_SECS, "5");
        }
        let cfg = Config::from_env().unwrap();
        clear_env();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:9000");
        assert_eq!(cfg.schedule(), ScheduleConfig::new(7, 0).unwrap());
        assert_eq!(cfg.pushplus_token(), "tok-123");
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn rejects_out_of_range_hour() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_PUSH_HOUR, "24");
        }
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(err.to_string().contains("PUSH_HOUR"));
    }

    #[test]
    fn rejects_out_of_range_minute() {
        let err = ScheduleConfig::new(12, 60).unwrap_err();
        assert!(err.to_string().contains("0-59"));
    }

    #[test]
    fn rejects_unparseable_number() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_PUSH_MINUTE, "soon");
        }
        let result = Config::from_env();
        clear_env();
        assert!(result.is_err());
    }
}
