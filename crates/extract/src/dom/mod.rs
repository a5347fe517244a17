// ABOUTME: DOM access layer for the extractors: the Page wrapper, selector cache and text helpers.
// ABOUTME: Everything here reads the parsed document; nothing mutates it.

//! DOM utilities for job-page extraction.
//!
//! - `page`: the `Page` wrapper and lazy selector-chain queries.
//! - `compiled`: process-wide cache of compiled CSS selectors.
//! - `text`: visible-text, sibling/parent navigation and casing helpers.

pub mod compiled;
pub mod page;
pub mod text;

pub use page::{select_within, text_within, Page};
