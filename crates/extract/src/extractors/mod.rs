// ABOUTME: Site extraction strategies and the registry that routes a hostname to one of them.
// ABOUTME: Each strategy reads a Page and reports what it found as JobFields.

//! Field extraction strategies.
//!
//! A [`SiteExtractor`] knows the markup of one job board. The
//! [`registry::ExtractorRegistry`] picks the strategy for a hostname and falls
//! back to [`generic::GenericExtractor`] for everything else.
//!
//! Submodules:
//! - `registry`: hostname routing table.
//! - `jsonld`: `hiringOrganization` lookup in JSON-LD scripts.
//! - `linkedin`, `indeed`, `glassdoor`, `ziprecruiter`, `naukri`: site strategies.
//! - `generic`: class/id substring heuristics plus page-wide text scans.

use std::fmt;

use crate::dom::Page;
use crate::error::ExtractError;
use crate::patterns::{first_match, JobTypeSet, WORKPLACE_MODES};
use crate::record::JobFields;
use crate::salary::extract_salary_from_description;

pub mod generic;
pub mod glassdoor;
pub mod indeed;
pub mod jsonld;
pub mod linkedin;
pub mod naukri;
pub mod registry;
pub mod ziprecruiter;

/// One extraction strategy.
///
/// `extract` writes whatever it finds into `out`. Returning an error stops
/// the strategy early; fields already written are kept by the caller.
pub trait SiteExtractor: fmt::Debug + Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn extract(&self, page: &Page, out: &mut JobFields) -> Result<(), ExtractError>;
}

/// Runs `find` only while `slot` is still empty.
pub(crate) fn fill_with<F>(slot: &mut Option<String>, find: F) -> Result<(), ExtractError>
where
    F: FnOnce() -> Result<Option<String>, ExtractError>,
{
    if slot.is_none() {
        *slot = find()?.filter(|v| !v.trim().is_empty());
    }
    Ok(())
}

/// Last salary tier: scan the description text for a short salary phrase.
pub(crate) fn salary_from_description(out: &mut JobFields, description: Option<&str>) {
    if out.salary.is_none() {
        out.salary = description.and_then(extract_salary_from_description);
    }
}

/// Adds a workplace mode found in `description` unless `types` already has one.
pub(crate) fn add_workplace_from(types: &mut JobTypeSet, description: Option<&str>) {
    if types.has_workplace() {
        return;
    }
    if let Some(mode) = description.and_then(|d| first_match(&WORKPLACE_MODES, d)) {
        types.push(mode);
    }
}

/// `text[start..end]` widened by up to `pad` characters on both sides.
pub(crate) fn with_context(text: &str, start: usize, end: usize, pad: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(pad)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);
    let to = text[end..]
        .char_indices()
        .nth(pad)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    text[from..to].trim()
}
