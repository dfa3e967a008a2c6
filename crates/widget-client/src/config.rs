//! Client configuration.

use std::time::Duration;

/// Environment variable overriding [`ClientConfig::timeout`], in milliseconds.
pub const TIMEOUT_ENV: &str = "WIDGET_HTTP_TIMEOUT_MS";

/// HTTP settings for talking to the booking backend.
///
/// The widget makes at most one catalog load and one submission at a time
/// against a single origin, so the pool is kept small.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Ask for gzip/deflate responses.
    pub accept_compressed: bool,
    /// Whole-request timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
    /// Emit per-request `debug!` events.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            accept_compressed: true,
            timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 4,
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Defaults, with the timeout taken from `WIDGET_HTTP_TIMEOUT_MS` when it
    /// holds a positive integer.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(ms) = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
        {
            config.timeout = Duration::from_millis(ms);
        }
        config
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn with_pool(mut self, idle_timeout: Duration, max_idle_per_host: usize) -> Self {
        self.config.pool_idle_timeout = idle_timeout;
        self.config.pool_max_idle_per_host = max_idle_per_host;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
