// ABOUTME: The Engine ties fetching, site routing, fallback merging and record cleanup together.
// ABOUTME: Provides extract()/extract_html() for parsed pages and async extract_url() for live URLs.

use std::fmt::Write as _;

use crate::classify;
use crate::dom::Page;
use crate::error::ExtractError;
use crate::extractors::registry::ExtractorRegistry;
use crate::extractors::SiteExtractor;
use crate::normalize::RecordNormalizer;
use crate::options::{EngineBuilder, Options, DEFAULT_DATE_FORMAT};
use crate::record::{JobFields, JobRecord};
use crate::resource::{fetch, FetchOptions};

/// Extraction engine. Cheap to share by reference; holds no per-page state.
#[derive(Debug, Clone)]
pub struct Engine {
    opts: Options,
    http_client: reqwest::Client,
    registry: ExtractorRegistry,
    normalizer: RecordNormalizer,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Engine {
    /// Create a new EngineBuilder for configuring an Engine.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Create a new Engine with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "failed to build configured HTTP client, using defaults");
                    reqwest::Client::new()
                })
        });

        let registry = opts.registry.clone().unwrap_or_default();
        let normalizer = RecordNormalizer::new(opts.limits, opts.company_overlap_ratio);

        Self {
            opts,
            http_client,
            registry,
            normalizer,
        }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Whether `page` looks like a single job posting.
    pub fn is_job_page(&self, page: &Page) -> bool {
        classify::is_job_page(page.url(), page.title(), page.body_text())
    }

    /// Extracts a cleaned record from `page`, stamped with today's date.
    pub fn extract(&self, page: &Page) -> JobRecord {
        self.extract_dated(page, self.today())
    }

    /// Extracts a cleaned record from `page` with an explicit `dateApplied`.
    ///
    /// Never fails: an extractor that errors contributes whatever it found
    /// before the error, and the record falls back to its sentinels.
    pub fn extract_dated(&self, page: &Page, date_applied: impl Into<String>) -> JobRecord {
        let mut record = JobRecord::new(page.url(), date_applied);
        let host = page.host().unwrap_or_default();

        match self.registry.lookup(&host) {
            Some(site) => {
                record.merge(run(site, page));
                if self.opts.generic_fallback && record.is_incomplete() {
                    tracing::debug!(
                        extractor = site.name(),
                        url = page.url(),
                        "site extractor left gaps, running generic fallback"
                    );
                    record.merge(run(self.registry.generic(), page));
                }
            }
            None => record.merge(run(self.registry.generic(), page)),
        }

        self.normalizer.clean(record)
    }

    /// Parses `html` as the document at `url` and extracts a record.
    pub fn extract_html(&self, html: &str, url: &str) -> JobRecord {
        let page = Page::parse(html, url);
        self.extract(&page)
    }

    /// Fetches `url` and parses it into a Page. The page keeps the address
    /// reached after redirects.
    pub async fn fetch_page(&self, url: &str) -> Result<Page, ExtractError> {
        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
        };
        let fetched = fetch(&self.http_client, url, &fetch_opts).await?;
        tracing::debug!(url, final_url = %fetched.final_url, bytes = fetched.body.len(), "fetched page");
        Ok(Page::parse(&fetched.body, &fetched.final_url))
    }

    /// Fetches `url` and extracts a record from it.
    pub async fn extract_url(&self, url: &str) -> Result<JobRecord, ExtractError> {
        let page = self.fetch_page(url).await?;
        if !self.is_job_page(&page) {
            tracing::info!(url = page.url(), "page does not look like a job posting");
        }
        Ok(self.extract(&page))
    }

    /// Today's date in the configured format.
    ///
    /// An invalid format string falls back to `m/d/yyyy`.
    pub fn today(&self) -> String {
        let now = chrono::Local::now();
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.opts.date_format)).is_err() {
            tracing::warn!(format = %self.opts.date_format, "invalid date format, using default");
            out = now.format(DEFAULT_DATE_FORMAT).to_string();
        }
        out
    }
}

/// Runs one extractor, keeping partial results when it fails.
fn run(extractor: &dyn SiteExtractor, page: &Page) -> JobFields {
    let mut fields = JobFields::default();
    if let Err(err) = extractor.extract(page, &mut fields) {
        tracing::warn!(
            extractor = extractor.name(),
            url = page.url(),
            error = %err,
            "extractor failed, keeping partial fields"
        );
    }
    fields
}
