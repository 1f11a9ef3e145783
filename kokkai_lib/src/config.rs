//! Client configuration, with optional overrides from the environment.

use std::path::PathBuf;
use std::time::Duration;

use kokkai_api::{default_user_agent, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Settings for [`crate::DietClient`].
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the API. Endpoint suffixes are appended to it.
    pub base_url: String,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Timeout of each HTTP request.
    pub timeout: Duration,
    /// Pause between consecutive page fetches of one search.
    pub sleep: Duration,
    /// Where page responses are cached. `None` disables caching.
    pub cache_dir: Option<PathBuf>,
    /// Upper bound on pages fetched by one search. `None` means unbounded.
    pub max_pages: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            timeout: DEFAULT_TIMEOUT,
            sleep: Duration::ZERO,
            cache_dir: None,
            max_pages: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `KOKKAI_BASE_URL`, `KOKKAI_USER_AGENT`,
    /// `KOKKAI_TIMEOUT_SECS`, `KOKKAI_SLEEP_SECS`, `KOKKAI_CACHE_DIR` and
    /// `KOKKAI_MAX_PAGES`. Values that do not parse are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            base_url: non_empty("KOKKAI_BASE_URL").unwrap_or(defaults.base_url),
            user_agent: non_empty("KOKKAI_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout: non_empty("KOKKAI_TIMEOUT_SECS")
                .and_then(|v| parse_secs(&v))
                .unwrap_or(defaults.timeout),
            sleep: non_empty("KOKKAI_SLEEP_SECS")
                .and_then(|v| parse_secs(&v))
                .unwrap_or(defaults.sleep),
            cache_dir: non_empty("KOKKAI_CACHE_DIR")
                .map(PathBuf::from)
                .or(defaults.cache_dir),
            max_pages: non_empty("KOKKAI_MAX_PAGES")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|n| *n > 0)
                .or(defaults.max_pages),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
    pub fn with_sleep(mut self, sleep: Duration) -> Self {
        self.sleep = sleep;
        self
    }
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}

fn parse_secs(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}
