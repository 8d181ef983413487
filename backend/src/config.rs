//! Service configuration loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `USER_STUB_*` environment variables,
//! and configuration files. Numeric limits carry their defaults in the
//! derive; the remaining optional fields are resolved by the accessors. When
//! `USER_STUB_PORT` is not set, the conventional `PORT` variable is honoured
//! via [`ServiceSettings::with_fallback_port`].

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use user_stub_data::UserCount;

use crate::middleware::rate_limit::{RateLimitConfigError, RateLimitPolicy};

/// Port bound when none is configured.
pub const DEFAULT_PORT: u16 = 3000;
/// Interface bound when none is configured.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Environment name assumed when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "production";
/// Largest count a request may ask for when none is configured.
pub const DEFAULT_MAX_COUNT: usize = 1000;
/// Requests allowed per client per window when none is configured.
pub const DEFAULT_RATE_LIMIT_MAX: u32 = 100;
/// Rate limit window in seconds when none is configured.
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;

/// Conventional variable consulted when no `USER_STUB_PORT` is configured.
pub const FALLBACK_PORT_VAR: &str = "PORT";

const DEVELOPMENT: &str = "development";

/// Errors raised while turning settings into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configured host is not an IP address.
    #[error("invalid host `{host}`: {source}")]
    InvalidHost {
        /// Offending host value.
        host: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// The fallback port variable did not hold a valid port.
    #[error("invalid PORT value `{value}`: {source}")]
    InvalidFallbackPort {
        /// Offending variable value.
        value: String,
        /// Parser failure.
        #[source]
        source: std::num::ParseIntError,
    },
    /// The configured maximum count was zero.
    #[error("max_count must be at least 1")]
    ZeroMaxCount,
    /// The rate limit settings were rejected.
    #[error(transparent)]
    RateLimit(#[from] RateLimitConfigError),
}

/// Configuration values controlling the HTTP service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_STUB")]
pub struct ServiceSettings {
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Interface address to bind.
    pub host: Option<String>,
    /// Deployment environment; `development` enables access logs.
    pub environment: Option<String>,
    /// Largest user count a single request may ask for.
    #[ortho_config(default = 1000)]
    pub max_count: usize,
    /// Requests allowed per client within one window.
    #[ortho_config(default = 100)]
    pub rate_limit_max: u32,
    /// Rate limit window length in seconds.
    #[ortho_config(default = 900)]
    pub rate_limit_window_secs: u64,
    /// Seed for reproducible responses; entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            port: None,
            host: None,
            environment: None,
            max_count: DEFAULT_MAX_COUNT,
            rate_limit_max: DEFAULT_RATE_LIMIT_MAX,
            rate_limit_window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
            seed: None,
        }
    }
}

impl ServiceSettings {
    /// Fill an unset port from the value of [`FALLBACK_PORT_VAR`].
    ///
    /// An explicitly configured port always wins.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidFallbackPort`] when the fallback value is
    /// consulted and is not a valid port number.
    ///
    /// # Examples
    /// ```
    /// use user_stub_api::config::ServiceSettings;
    ///
    /// let settings = ServiceSettings::default()
    ///     .with_fallback_port(Some("8080".to_owned()))
    ///     .expect("valid port");
    /// assert_eq!(settings.port, Some(8080));
    /// ```
    pub fn with_fallback_port(mut self, value: Option<String>) -> Result<Self, ConfigError> {
        if self.port.is_some() {
            return Ok(self);
        }
        if let Some(value) = value {
            let port = value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidFallbackPort { value, source })?;
            self.port = Some(port);
        }
        Ok(self)
    }

    /// Socket address to bind, combining host and port.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidHost`] when the host is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|source| ConfigError::InvalidHost {
            host: host.to_owned(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Configured environment name.
    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Whether the service runs in development mode.
    pub fn is_development(&self) -> bool {
        self.environment().eq_ignore_ascii_case(DEVELOPMENT)
    }

    /// Largest count a single request may ask for.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroMaxCount`] when configured as zero.
    pub fn max_count(&self) -> Result<UserCount, ConfigError> {
        UserCount::new(self.max_count).map_err(|_| ConfigError::ZeroMaxCount)
    }

    /// Rate limit policy built from the configured allowance and window.
    ///
    /// # Errors
    /// Returns [`ConfigError::RateLimit`] when either value is zero or the
    /// window is out of range.
    pub fn rate_limit_policy(&self) -> Result<RateLimitPolicy, ConfigError> {
        let window = Duration::from_secs(self.rate_limit_window_secs);
        Ok(RateLimitPolicy::new(self.rate_limit_max, window)?)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for service configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "USER_STUB_PORT",
        "USER_STUB_HOST",
        "USER_STUB_ENVIRONMENT",
        "USER_STUB_MAX_COUNT",
        "USER_STUB_RATE_LIMIT_MAX",
        "USER_STUB_RATE_LIMIT_WINDOW_SECS",
        "USER_STUB_SEED",
    ];

    fn load_from_empty_args() -> ServiceSettings {
        ServiceSettings::load_from_iter([OsString::from("user-stub-api")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            "0.0.0.0:3000".parse::<SocketAddr>().expect("socket addr")
        );
        assert_eq!(settings.environment(), "production");
        assert!(!settings.is_development());
        assert_eq!(settings.max_count().expect("max count").get(), 1000);
        let policy = settings.rate_limit_policy().expect("policy");
        assert_eq!(policy.max(), 100);
        assert_eq!(policy.window().num_seconds(), 900);
        assert!(settings.seed.is_none());
        assert!(settings.port.is_none());
    }

    #[rstest]
    #[case(None, Some("8080"), 8080)]
    #[case(Some(4000), Some("8080"), 4000)]
    #[case(None, None, DEFAULT_PORT)]
    #[case(None, Some(" 5000 "), 5000)]
    fn fallback_port_applies_only_when_unset(
        #[case] configured: Option<u16>,
        #[case] fallback: Option<&str>,
        #[case] expected: u16,
    ) {
        let settings = ServiceSettings {
            port: configured,
            ..ServiceSettings::default()
        }
        .with_fallback_port(fallback.map(str::to_owned))
        .expect("fallback port");
        assert_eq!(settings.bind_addr().expect("bind addr").port(), expected);
    }

    #[rstest]
    fn invalid_fallback_port_is_reported() {
        let err = ServiceSettings::default()
            .with_fallback_port(Some("http".to_owned()))
            .expect_err("invalid fallback port");
        assert!(matches!(
            err,
            ConfigError::InvalidFallbackPort { ref value, .. } if value == "http"
        ));
    }

    #[rstest]
    fn fallback_port_is_ignored_when_prefixed_port_is_set() {
        let _guard = lock_env([
            ("USER_STUB_PORT", Some("8081".to_owned())),
            ("PORT", Some("9090".to_owned())),
        ]);

        let settings = load_from_empty_args()
            .with_fallback_port(std::env::var(FALLBACK_PORT_VAR).ok())
            .expect("fallback port");
        assert_eq!(settings.port, Some(8081));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USER_STUB_PORT", Some("8080".to_owned())),
            ("USER_STUB_HOST", Some("127.0.0.1".to_owned())),
            ("USER_STUB_ENVIRONMENT", Some("development".to_owned())),
            ("USER_STUB_MAX_COUNT", Some("50".to_owned())),
            ("USER_STUB_RATE_LIMIT_MAX", Some("5".to_owned())),
            ("USER_STUB_RATE_LIMIT_WINDOW_SECS", Some("60".to_owned())),
            ("USER_STUB_SEED", Some("42".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            "127.0.0.1:8080".parse::<SocketAddr>().expect("socket addr")
        );
        assert!(settings.is_development());
        assert_eq!(settings.max_count().expect("max count").get(), 50);
        assert_eq!(settings.rate_limit_policy().expect("policy").max(), 5);
        assert_eq!(settings.seed, Some(42));
    }

    #[rstest]
    fn invalid_host_is_reported() {
        let settings = ServiceSettings {
            host: Some("not-an-ip".to_owned()),
            ..ServiceSettings::default()
        };
        let err = settings.bind_addr().expect_err("invalid host");
        assert!(matches!(err, ConfigError::InvalidHost { ref host, .. } if host == "not-an-ip"));
    }

    #[rstest]
    #[case(0, DEFAULT_RATE_LIMIT_WINDOW_SECS)]
    #[case(DEFAULT_RATE_LIMIT_MAX, 0)]
    fn zero_rate_limit_values_are_rejected(#[case] max: u32, #[case] window: u64) {
        let settings = ServiceSettings {
            rate_limit_max: max,
            rate_limit_window_secs: window,
            ..ServiceSettings::default()
        };
        assert!(matches!(
            settings.rate_limit_policy(),
            Err(ConfigError::RateLimit(_))
        ));
    }

    #[rstest]
    fn zero_max_count_is_rejected() {
        let settings = ServiceSettings {
            max_count: 0,
            ..ServiceSettings::default()
        };
        assert!(matches!(
            settings.max_count(),
            Err(ConfigError::ZeroMaxCount)
        ));
    }
}
