// ABOUTME: Pre-compiled CSS selector cache shared by every extractor.
// ABOUTME: Selector lists are static, so each string is parsed once per process.

//! Selector caching for efficient repeated DOM queries.
//!
//! Every site extractor walks the same ordered selector lists on every page.
//! Parsing is more expensive than matching, so compiled selectors are kept in
//! a process-wide map. Invalid selectors are cached too and keep failing with
//! the same error.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use scraper::Selector;

use crate::error::ExtractError;

/// Compiled selector, or the parser's message for a selector that failed.
type Compiled = Result<Selector, String>;

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Compiled>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

fn compile_uncached(css: &str) -> Compiled {
    Selector::parse(css).map_err(|e| e.to_string())
}

fn into_result(css: &str, compiled: &Compiled) -> Result<Selector, ExtractError> {
    compiled
        .clone()
        .map_err(|msg| ExtractError::selector(css, Some(anyhow::anyhow!(msg))))
}

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns a `Selector` error when the string is not valid CSS.
pub fn get_or_compile(css: &str) -> Result<Selector, ExtractError> {
    {
        let cache = SELECTOR_CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.get(css) {
            return into_result(css, cached);
        }
    }

    let compiled = compile_uncached(css);
    let mut cache = SELECTOR_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let entry = cache.entry(css.to_string()).or_insert(compiled);
    into_result(css, entry)
}

/// Precompiles a batch of selectors into the cache.
///
/// Returns how many of them failed to compile.
pub fn precompile_selectors<I, S>(selectors: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cache = SELECTOR_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let mut failed = 0;
    for css in selectors {
        let css = css.as_ref();
        let entry = cache
            .entry(css.to_string())
            .or_insert_with(|| compile_uncached(css));
        if entry.is_err() {
            failed += 1;
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_selector_is_cached() {
        assert!(get_or_compile("div.jobs-unified-top-card").is_ok());
        assert!(get_or_compile("div.jobs-unified-top-card").is_ok());
    }

    #[test]
    fn invalid_selector_is_an_error_every_time() {
        let first = get_or_compile("[[[invalid").unwrap_err();
        assert!(first.is_selector());
        assert_eq!(first.target, "[[[invalid");

        let second = get_or_compile("[[[invalid").unwrap_err();
        assert!(second.is_selector());
    }

    #[test]
    fn case_insensitive_attribute_selectors_compile() {
        assert!(get_or_compile(r#"[class*="title" i]"#).is_ok());
        assert!(get_or_compile(".company_details .name + *").is_ok());
    }

    #[test]
    fn precompile_counts_failures() {
        let failed = precompile_selectors(["h1", "h2.t-24", "p:::nope"]);
        assert_eq!(failed, 1);
        assert!(get_or_compile("h2.t-24").is_ok());
    }
}
