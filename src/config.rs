use crate::error::{AppError, Result};

pub const GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";

/// HTTP timeout for Gamma requests (seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Hard cap the Gamma `/markets` endpoint places on `limit`.
pub const GAMMA_LIMIT_CAP: usize = 1000;

/// The one zone the approximate DST rule supports; anything else gets
/// offset 0 in the timezone formatter.
pub const DEFAULT_TIMEZONE: &str = "America/Toronto";

#[derive(Debug, Clone)]
pub struct Config {
    pub gamma_api_url: String,
    pub log_level: String,
    /// Requested market count for the single capped fetch (FETCH_LIMIT).
    pub fetch_limit: usize,
    /// Lower clamp bound for the fetch limit (FETCH_LIMIT_MIN).
    pub fetch_limit_min: usize,
    /// Upper clamp bound for the fetch limit (FETCH_LIMIT_MAX).
    pub fetch_limit_max: usize,
    /// Category to fetch; drives tag resolution and the keyword fallback
    /// path (CATEGORY_FILTER). None means the default all-markets path.
    pub category_filter: Option<String>,
    /// Target civil zone label stamped on every row (TIMEZONE).
    pub timezone: String,
    /// Optional JSON file replacing the built-in keyword table (KEYWORDS_FILE).
    pub keywords_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            gamma_api_url: std::env::var("GAMMA_API_URL")
                .unwrap_or_else(|_| GAMMA_API_URL.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            fetch_limit: std::env::var("FETCH_LIMIT")
                .unwrap_or_else(|_| "500".to_string())
                .parse::<usize>()
                .map_err(|_| AppError::Config("FETCH_LIMIT must be an integer".to_string()))?,
            fetch_limit_min: std::env::var("FETCH_LIMIT_MIN")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<usize>()
                .unwrap_or(10),
            fetch_limit_max: std::env::var("FETCH_LIMIT_MAX")
                .unwrap_or_else(|_| "1000".to_string())
                .parse::<usize>()
                .unwrap_or(1000),
            category_filter: std::env::var("CATEGORY_FILTER").ok().filter(|s| !s.is_empty()),
            timezone: std::env::var("TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string()),
            keywords_file: std::env::var("KEYWORDS_FILE").ok().filter(|s| !s.is_empty()),
        })
    }

    /// The limit actually sent to Gamma: the requested value clamped to the
    /// configured bounds and the API cap. Read once at run start.
    pub fn effective_limit(&self) -> usize {
        let max = self.fetch_limit_max.min(GAMMA_LIMIT_CAP).max(1);
        let min = self.fetch_limit_min.clamp(1, max);
        self.fetch_limit.clamp(min, max)
    }
}
