// ABOUTME: Configuration for the extraction engine: fetch settings, field limits and cleaning thresholds.
// ABOUTME: EngineBuilder provides a fluent API for constructing Engine instances with custom settings.

use std::collections::HashMap;
use std::time::Duration;

use crate::engine::Engine;
use crate::extractors::registry::ExtractorRegistry;

/// Date format used for `dateApplied`, e.g. `3/14/2025`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Maximum field lengths, in characters, applied by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    pub title: usize,
    pub company: usize,
    pub location: usize,
    pub url: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            title: 100,
            company: 50,
            location: 100,
            url: 500,
        }
    }
}

/// Configuration options for the extraction engine.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub http_client: Option<reqwest::Client>,
    pub headers: HashMap<String, String>,
    pub limits: FieldLimits,
    /// Share of title words that may appear in the company name before the
    /// company is treated as an echo of the title.
    pub company_overlap_ratio: f64,
    pub date_format: String,
    /// Run the generic extractor after a site extractor left gaps.
    pub generic_fallback: bool,
    pub registry: Option<ExtractorRegistry>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("jobtrail/", env!("CARGO_PKG_VERSION")).to_string(),
            http_client: None,
            headers: HashMap::new(),
            limits: FieldLimits::default(),
            company_overlap_ratio: 0.7,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            generic_fallback: true,
            registry: None,
        }
    }
}

/// Builder for constructing Engine instances with custom configuration.
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    opts: Options,
}

impl EngineBuilder {
    /// Create a new EngineBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    pub fn limits(mut self, limits: FieldLimits) -> Self {
        self.opts.limits = limits;
        self
    }

    /// Set the title/company word overlap ratio. Clamped to `0.0..=1.0`.
    pub fn company_overlap_ratio(mut self, ratio: f64) -> Self {
        self.opts.company_overlap_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Set the chrono format string used for `dateApplied`.
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.opts.date_format = format.into();
        self
    }

    pub fn generic_fallback(mut self, enabled: bool) -> Self {
        self.opts.generic_fallback = enabled;
        self
    }

    /// Set a custom extractor registry.
    pub fn registry(mut self, reg: ExtractorRegistry) -> Self {
        self.opts.registry = Some(reg);
        self
    }

    /// Build the Engine with the configured options.
    pub fn build(self) -> Engine {
        Engine::new(self.opts)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert_eq!(opts.limits, FieldLimits::default());
        assert_eq!(opts.limits.url, 500);
        assert_eq!(opts.company_overlap_ratio, 0.7);
        assert_eq!(opts.date_format, DEFAULT_DATE_FORMAT);
        assert!(opts.generic_fallback);
        assert!(opts.user_agent.starts_with("jobtrail/"));
    }

    #[test]
    fn builder_clamps_ratio() {
        let b = EngineBuilder::new().company_overlap_ratio(3.0);
        assert_eq!(b.opts.company_overlap_ratio, 1.0);
        let b = EngineBuilder::new()
            .company_overlap_ratio(-1.0)
            .generic_fallback(false)
            .header("Accept-Language", "en");
        assert_eq!(b.opts.company_overlap_ratio, 0.0);
        assert!(!b.opts.generic_fallback);
        assert_eq!(b.opts.headers.get("Accept-Language").map(String::as_str), Some("en"));
    }
}
