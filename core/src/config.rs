//! Connection settings for the Warpgate API, read from the environment or
//! built up in code.

use std::env;
use std::time::Duration;

/// Connection settings for the Warpgate admin API.
///
/// Reads from `WARPGATE_HOST`, `WARPGATE_TOKEN` and `WARPGATE_TIMEOUT_SECS`,
/// falling back to a local Warpgate instance with a 30 second timeout.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the admin API, without a trailing slash.
    pub base_url: String,
    /// Sent as `X-Warpgate-Token` when present.
    pub token: Option<String>,
    /// Upper bound on a single request.
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    /// The base URL used when `WARPGATE_HOST` is unset.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8888/@warpgate/admin/api";

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub const TOKEN_HEADER: &'static str = "X-Warpgate-Token";

    /// Build a config from the environment.
    ///
    /// An unparsable `WARPGATE_TIMEOUT_SECS` is ignored in favour of the
    /// default.
    pub fn from_env() -> Self {
        let base_url =
            env::var("WARPGATE_HOST").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_owned());
        let token = env::var("WARPGATE_TOKEN").ok().filter(|t| !t.is_empty());
        let timeout = env::var("WARPGATE_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| parse_timeout(&raw))
            .unwrap_or(Self::DEFAULT_TIMEOUT);
        Self {
            token,
            timeout,
            ..Self::new(base_url)
        }
    }

    /// Build a config from an explicit URL (useful for tests).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: None,
            timeout: Self::DEFAULT_TIMEOUT,
            user_agent: concat!("warpgate-provider/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_timeout(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let cfg = ClientConfig::new(ClientConfig::DEFAULT_BASE_URL);
        assert_eq!(cfg.base_url, "http://localhost:8888/@warpgate/admin/api");
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert!(cfg.token.is_none());
        assert!(cfg.user_agent.starts_with("warpgate-provider/"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let cfg = ClientConfig::new("http://warpgate.internal/api/");
        assert_eq!(cfg.base_url, "http://warpgate.internal/api");
    }

    #[test]
    fn builders_override_fields() {
        let cfg = ClientConfig::new("http://x")
            .with_token("secret")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(cfg.token.as_deref(), Some("secret"));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn timeout_parsing() {
        assert_eq!(parse_timeout("10"), Some(Duration::from_secs(10)));
        assert_eq!(parse_timeout(" 7 "), Some(Duration::from_secs(7)));
        assert_eq!(parse_timeout("0"), None);
        assert_eq!(parse_timeout("soon"), None);
    }
}
