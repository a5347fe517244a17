// ABOUTME: ExtractorRegistry maps hostname fragments to site strategies, in registration order.
// ABOUTME: Hostnames that match nothing are routed to the generic extractor.

use std::sync::Arc;

use crate::extractors::generic::GenericExtractor;
use crate::extractors::glassdoor::GlassdoorExtractor;
use crate::extractors::indeed::IndeedExtractor;
use crate::extractors::linkedin::LinkedInExtractor;
use crate::extractors::naukri::NaukriExtractor;
use crate::extractors::ziprecruiter::ZipRecruiterExtractor;
use crate::extractors::SiteExtractor;

/// Ordered table of `(host fragment, strategy)` pairs plus a fallback.
///
/// A hostname matches an entry when it contains the fragment. The first
/// matching entry wins.
#[derive(Debug, Clone)]
pub struct ExtractorRegistry {
    sites: Vec<(String, Arc<dyn SiteExtractor>)>,
    fallback: Arc<dyn SiteExtractor>,
}

impl ExtractorRegistry {
    /// An empty registry that sends every page to the generic extractor.
    pub fn new() -> Self {
        Self {
            sites: Vec::new(),
            fallback: Arc::new(GenericExtractor),
        }
    }

    /// The built-in job boards.
    pub fn builtin() -> Self {
        let mut reg = Self::new();
        reg.register("linkedin.com", Arc::new(LinkedInExtractor));
        reg.register("indeed.com", Arc::new(IndeedExtractor));
        reg.register("glassdoor.com", Arc::new(GlassdoorExtractor));
        reg.register("ziprecruiter.com", Arc::new(ZipRecruiterExtractor));
        reg.register("naukri.com", Arc::new(NaukriExtractor));
        reg
    }

    /// Adds a strategy for hostnames containing `host_fragment`.
    ///
    /// Entries registered earlier take precedence.
    pub fn register(&mut self, host_fragment: impl Into<String>, extractor: Arc<dyn SiteExtractor>) {
        self.sites
            .push((host_fragment.into().to_lowercase(), extractor));
    }

    /// Replaces the fallback strategy.
    pub fn set_fallback(&mut self, extractor: Arc<dyn SiteExtractor>) {
        self.fallback = extractor;
    }

    /// The site strategy registered for `hostname`, if any.
    pub fn lookup(&self, hostname: &str) -> Option<&dyn SiteExtractor> {
        let host = hostname.trim().to_lowercase();
        if host.is_empty() {
            return None;
        }
        self.sites
            .iter()
            .find(|(fragment, _)| host.contains(fragment.as_str()))
            .map(|(_, ex)| ex.as_ref())
    }

    /// The strategy to run for `hostname`: a site match or the fallback.
    pub fn select_for(&self, hostname: &str) -> &dyn SiteExtractor {
        self.lookup(hostname).unwrap_or_else(|| self.generic())
    }

    /// The fallback strategy.
    pub fn generic(&self) -> &dyn SiteExtractor {
        self.fallback.as_ref()
    }

    /// Returns the number of registered site entries.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Returns true if no site entries are registered.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
