//! Configuration for the paper feed client.

use std::time::Duration;

use chrono::FixedOffset;

/// Endpoint configuration constants.
pub mod api {
    use std::time::Duration;

    /// Default feed server (the development server address).
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

    /// Ranked paper list endpoint.
    pub const PAPERS_PATH: &str = "/papers";

    /// Save endpoint.
    pub const SAVE_PAPER_PATH: &str = "/save_paper";

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection pool: max idle connections per host.
    pub const MAX_KEEPALIVE: usize = 4;

    /// Connection pool: idle connection expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Display constants used by the renderer.
pub mod display {
    /// Short numeric date, month first (`10/1/2024`).
    pub const DATE_FORMAT: &str = "%-m/%-d/%Y";

    /// Shown in place of a date that cannot be parsed.
    pub const INVALID_DATE: &str = "Invalid Date";

    /// Initial content of the papers region before the first render.
    pub const PLACEHOLDER_HTML: &str = "<p>Loading papers...</p>";
}

/// Options controlling how paper blocks are rendered.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// strftime pattern for the "Updated" line.
    pub date_format: String,

    /// Offset dates are displayed in. `None` uses the local time zone.
    pub utc_offset: Option<FixedOffset>,

    /// Escape title and abstract text. Disable only for parity checks against
    /// pre-sanitized server content.
    pub escape_html: bool,
}

impl RenderOptions {
    /// Render dates in UTC (deterministic output for snapshots and tests).
    #[must_use]
    pub fn utc() -> Self {
        Self { utc_offset: FixedOffset::east_opt(0), ..Self::default() }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { date_format: display::DATE_FORMAT.to_string(), utc_offset: None, escape_html: true }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the feed server.
    pub base_url: String,

    /// Whole-request timeout. `None` lets a request run until the server answers.
    pub request_timeout: Option<Duration>,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Renderer options.
    pub render: RenderOptions,
}

impl Config {
    /// Create a configuration pointing at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
            connect_timeout: api::CONNECT_TIMEOUT,
            render: RenderOptions::default(),
        }
    }

    /// Create a test configuration against a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            request_timeout: Some(Duration::from_secs(5)),
            connect_timeout: Duration::from_secs(2),
            render: RenderOptions::utc(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `PAPER_FEED_URL` and `PAPER_FEED_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns error if the timeout is not a whole number of seconds.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url =
            std::env::var("PAPER_FEED_URL").unwrap_or_else(|_| api::DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url);

        if let Ok(secs) = std::env::var("PAPER_FEED_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|e| anyhow::anyhow!("PAPER_FEED_TIMEOUT_SECS must be an integer: {e}"))?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// URL of the paper list endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not a valid absolute URL.
    pub fn papers_url(&self) -> Result<url::Url, url::ParseError> {
        self.endpoint(api::PAPERS_PATH)
    }

    /// URL of the save endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not a valid absolute URL.
    pub fn save_paper_url(&self) -> Result<url::Url, url::ParseError> {
        self.endpoint(api::SAVE_PAPER_PATH)
    }

    // Endpoint paths are absolute, so they replace any path on the base URL.
    fn endpoint(&self, path: &str) -> Result<url::Url, url::ParseError> {
        url::Url::parse(&self.base_url)?.join(path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(api::DEFAULT_BASE_URL)
    }
}
