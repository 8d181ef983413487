//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use user_stub_data::UserCount;

use crate::config::{ConfigError, ServiceSettings};
use crate::middleware::rate_limit::RateLimitPolicy;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) access_log: bool,
    pub(crate) max_count: UserCount,
    pub(crate) rate_limit: RateLimitPolicy,
    pub(crate) seed: Option<u64>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl ServerConfig {
    /// Construct a configuration with production defaults for everything but
    /// the listener address and limits.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, max_count: UserCount, rate_limit: RateLimitPolicy) -> Self {
        Self {
            bind_addr,
            access_log: false,
            max_count,
            rate_limit,
            seed: None,
            clock: Arc::new(DefaultClock),
        }
    }

    /// Build a configuration from loaded settings.
    ///
    /// # Errors
    /// Propagates [`ConfigError`] when any setting fails validation.
    pub fn from_settings(settings: &ServiceSettings) -> Result<Self, ConfigError> {
        let config = Self::new(
            settings.bind_addr()?,
            settings.max_count()?,
            settings.rate_limit_policy()?,
        )
        .with_access_log(settings.is_development())
        .with_seed(settings.seed);
        Ok(config)
    }

    /// Enable or disable the development access log.
    #[must_use]
    pub fn with_access_log(mut self, enabled: bool) -> Self {
        self.access_log = enabled;
        self
    }

    /// Use a fixed RNG seed so responses are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the clock feeding uptime and rate-limit windows.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether the access log is enabled.
    #[must_use]
    pub fn access_log(&self) -> bool {
        self.access_log
    }

    /// Configured RNG seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn from_settings_applies_development_mode() {
        let settings = ServiceSettings {
            port: Some(4000),
            environment: Some("development".to_owned()),
            seed: Some(5),
            ..ServiceSettings::default()
        };

        let config = ServerConfig::from_settings(&settings).expect("valid settings");

        assert_eq!(config.bind_addr().port(), 4000);
        assert!(config.access_log());
        assert_eq!(config.seed(), Some(5));
    }

    #[rstest]
    fn from_settings_rejects_invalid_limits() {
        let settings = ServiceSettings {
            rate_limit_max: 0,
            ..ServiceSettings::default()
        };

        assert!(ServerConfig::from_settings(&settings).is_err());
    }
}
