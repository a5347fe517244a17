// ABOUTME: Final cleanup of a JobRecord: whitespace collapsing, length caps and URL shortening.
// ABOUTME: Also drops company names that merely echo the job title.

use url::Url;

use crate::dom::text::normalize_whitespace;
use crate::options::FieldLimits;
use crate::record::{JobRecord, UNKNOWN_COMPANY, UNKNOWN_LOCATION, UNKNOWN_TITLE};

const ELLIPSIS: &str = "...";

/// Cleans records before they leave the engine. `clean` is idempotent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordNormalizer {
    limits: FieldLimits,
    overlap_ratio: f64,
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new(FieldLimits::default(), 0.7)
    }
}

impl RecordNormalizer {
    pub fn new(limits: FieldLimits, overlap_ratio: f64) -> Self {
        Self {
            limits,
            overlap_ratio,
        }
    }

    pub fn clean(&self, mut record: JobRecord) -> JobRecord {
        record.title = clean_or(&record.title, UNKNOWN_TITLE);
        record.company = clean_or(&record.company, UNKNOWN_COMPANY);
        record.location = clean_or(&record.location, UNKNOWN_LOCATION);
        record.salary = normalize_whitespace(&record.salary);
        record.experience_level = normalize_whitespace(&record.experience_level);
        record.job_type = normalize_whitespace(&record.job_type);
        record.notes = normalize_whitespace(&record.notes);

        record.title = truncate(&record.title, self.limits.title);
        record.company = truncate(&record.company, self.limits.company);
        record.location = truncate(&record.location, self.limits.location);
        record.url = shorten_url(&record.url, self.limits.url);

        if record.has_company()
            && record.has_title()
            && company_echoes_title(&record.company, &record.title, self.overlap_ratio)
        {
            tracing::debug!(company = %record.company, title = %record.title, "company echoes title, discarding");
            record.company = UNKNOWN_COMPANY.to_string();
        }

        record
    }
}

/// Cleans `record` with the default limits and overlap ratio.
pub fn clean(record: JobRecord) -> JobRecord {
    RecordNormalizer::default().clean(record)
}

fn clean_or(value: &str, sentinel: &str) -> String {
    let cleaned = normalize_whitespace(value);
    if cleaned.is_empty() {
        sentinel.to_string()
    } else {
        cleaned
    }
}

/// Caps `value` at `max` characters, ending with "..." when cut.
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut out: String = value.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Drops query and fragment from an overlong URL, or hard-truncates it when
/// it has no usable origin.
fn shorten_url(url: &str, max: usize) -> String {
    if url.chars().count() <= max {
        return url.to_string();
    }
    match Url::parse(url) {
        Ok(parsed) if parsed.origin().is_tuple() => {
            format!("{}{}", parsed.origin().ascii_serialization(), parsed.path())
        }
        _ => url.chars().take(max).collect(),
    }
}

/// True when the company name repeats most of the title's longer words.
fn company_echoes_title(company: &str, title: &str, ratio: f64) -> bool {
    let title_lower = title.to_lowercase();
    let title_words: Vec<&str> = title_lower.split_whitespace().collect();
    if title_words.len() <= 2 || company.split_whitespace().count() <= 2 {
        return false;
    }
    let company_lower = company.to_lowercase();
    let matches = title_words
        .iter()
        .filter(|w| w.chars().count() > 3 && company_lower.contains(*w))
        .count();
    matches as f64 > title_words.len() as f64 * ratio
}
