// ABOUTME: Fallback strategy for unknown sites: class/id substring heuristics with length limits.
// ABOUTME: When no element qualifies, salary, experience and job type are scanned from the page text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::text::visible_text;
use crate::dom::Page;
use crate::error::ExtractError;
use crate::extractors::{add_workplace_from, fill_with, SiteExtractor};
use crate::patterns::{
    first_match, JobTypeSet, DESCRIPTION_JOB_TYPES, LOOSE_SALARY, YEARS_OF_EXPERIENCE,
};
use crate::record::JobFields;
use crate::salary::extract_salary_from_description;

const TITLE: &[&str] = &[
    "h1",
    "h2",
    r#"[class*="title" i]"#,
    r#"[class*="position" i]"#,
    r#"[class*="job-name" i]"#,
    r#"[class*="jobTitle" i]"#,
];

const COMPANY: &[&str] = &[
    r#"[class*="company" i]"#,
    r#"[class*="employer" i]"#,
    r#"[class*="organization" i]"#,
    r#"[id*="company" i]"#,
    r#"[id*="employer" i]"#,
];

const LOCATION: &[&str] = &[
    r#"[class*="location" i]"#,
    r#"[class*="address" i]"#,
    r#"[class*="region" i]"#,
    r#"[id*="location" i]"#,
];

const SALARY: &[&str] = &[
    r#"[class*="salary" i]"#,
    r#"[class*="compensation" i]"#,
    r#"[class*="pay" i]"#,
    r#"[id*="salary" i]"#,
];

const EXPERIENCE: &[&str] = &[
    r#"[class*="experience" i]"#,
    r#"[class*="level" i]"#,
    r#"[id*="experience" i]"#,
];

const JOB_TYPE: &[&str] = &[
    r#"[class*="job-type" i]"#,
    r#"[class*="employment-type" i]"#,
    r#"[id*="job-type" i]"#,
];

const MAX_TITLE: usize = 100;
const MAX_COMPANY: usize = 50;
const MAX_LOCATION: usize = 100;

const SALARY_MARKERS: &[&str] = &["$", "€", "£", "¥", "₹", "/yr", "/hour", "per year", "salary"];
const EXPERIENCE_MARKERS: &[&str] = &["year", "yr", "junior", "senior", "mid", "entry"];
const JOB_TYPE_MARKERS: &[&str] = &[
    "full-time",
    "part-time",
    "contract",
    "permanent",
    "temporary",
    "intern",
];

static LABELED_JOB_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:job|employment)\s+type\s*:?\s*(full[- ]time|part[- ]time|contract|temporary|permanent|internship)",
    )
    .unwrap()
});

#[derive(Debug, Default, Clone, Copy)]
pub struct GenericExtractor;

impl SiteExtractor for GenericExtractor {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn extract(&self, page: &Page, out: &mut JobFields) -> Result<(), ExtractError> {
        fill_with(&mut out.title, || page.first_text(TITLE, shorter_than(MAX_TITLE)))?;
        fill_with(&mut out.company, || page.first_text(COMPANY, shorter_than(MAX_COMPANY)))?;
        fill_with(&mut out.location, || page.first_text(LOCATION, shorter_than(MAX_LOCATION)))?;
        fill_with(&mut out.location, || location_span(page))?;

        let body = page.body_text();

        fill_with(&mut out.salary, || {
            Ok(page
                .first_text(SALARY, |t| SALARY_MARKERS.iter().any(|m| t.contains(m)))?
                .or_else(|| extract_salary_from_description(body))
                .or_else(|| first_match(&LOOSE_SALARY, body)))
        })?;

        fill_with(&mut out.experience_level, || {
            Ok(page
                .first_text(EXPERIENCE, |t| contains_any(t, EXPERIENCE_MARKERS))?
                .or_else(|| first_match(&YEARS_OF_EXPERIENCE, body)))
        })?;

        if out.job_type.is_none() {
            let mut types = JobTypeSet::new();
            if let Some(kind) = page.first_text(JOB_TYPE, |t| contains_any(t, JOB_TYPE_MARKERS))? {
                types.push(kind);
            } else if let Some(kind) = body_job_type(body) {
                types.push(kind);
            }
            add_workplace_from(&mut types, Some(body));
            out.job_type = types.into_value();
        }
        Ok(())
    }
}

fn shorter_than(max: usize) -> impl Fn(&str) -> bool {
    move |t: &str| t.chars().count() < max
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    let lower = text.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

/// A `<span>` whose text starts with "Location".
fn location_span(page: &Page) -> Result<Option<String>, ExtractError> {
    Ok(page
        .select("span")?
        .iter()
        .map(visible_text)
        .find(|t| t.starts_with("Location") && t.chars().count() < MAX_LOCATION))
}

fn body_job_type(body: &str) -> Option<String> {
    if let Some(caps) = LABELED_JOB_TYPE.captures(body) {
        if let Some(kind) = first_match(&DESCRIPTION_JOB_TYPES, &caps[1]) {
            return Some(kind);
        }
    }
    first_match(&DESCRIPTION_JOB_TYPES, body)
}
