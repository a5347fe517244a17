// ABOUTME: Indeed job page strategy: header selectors plus job-details section items.
// ABOUTME: Falls back to labeled lines and pattern scans over the job description.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::text::{capitalize_first, parent_text, visible_text};
use crate::dom::Page;
use crate::error::ExtractError;
use crate::extractors::{fill_with, salary_from_description, with_context, SiteExtractor};
use crate::patterns::{first_match, EXPERIENCE_LEVELS};
use crate::record::JobFields;

const TITLE: &[&str] = &[
    ".jobsearch-JobInfoHeader-title",
    "h1.icl-u-xs-mb--xs",
    r#"[data-testid="jobsearch-JobInfoHeader-title"]"#,
    r#"[data-testid="simpler-jobTitle"]"#,
    ".css-dpa6rd",
];

const COMPANY: &[&str] = &[
    ".jobsearch-InlineCompanyRating-companyName",
    ".jobsearch-EmployerInfoContainer .icl-u-lg-mr--sm",
    r#"[data-testid="company-name"]"#,
    ".jobsearch-JobInfoHeader-companyName",
    ".jobsearch-JobInfoHeader-companyNameSimple",
    ".css-88a4u1",
    ".companyName",
];

const LOCATION: &[&str] = &[
    ".jobsearch-JobInfoHeader-location",
    r#"[data-testid="jobsearch-JobInfoHeader-companyLocation"]"#,
    ".jobsearch-JobInfoHeader-subtitle .jobsearch-JobInfoHeader-text",
    ".companyLocation",
    ".company_location",
    ".css-xb6x8x",
    ".css-5qwe7c",
];

const SECTION_VALUE: &str =
    r#"[data-testid="jobsearch-JobDescriptionSection-item"] [data-testid="jobsearch-JobDescriptionSection-value"]"#;

const JOB_TYPE_ITEMS: &[&str] = &[
    SECTION_VALUE,
    ".jobsearch-JobDescriptionSection-sectionItem",
    ".jobDetails-term",
    ".css-1hj9xh6",
];

const EXPERIENCE_ITEMS: &[&str] = &[
    ".jobsearch-JobDescriptionSection-sectionItem",
    ".css-9thgde",
    "#jobDetailsSection",
];

const SALARY_ITEMS: &[&str] = &[
    SECTION_VALUE,
    ".jobsearch-JobMetadataHeader-item",
    ".css-5zy3wn",
    ".css-1hj9xh6",
];

const DESCRIPTION: &[&str] = &["#jobDescriptionText", ".jobsearch-jobDescriptionText"];

/// Employment types Indeed shows verbatim in its section items.
const KNOWN_TYPES: &[&str] = &[
    "Full-time",
    "Part-time",
    "Contract",
    "Temporary",
    "Permanent",
    "Internship",
    "Fresher",
    "Remote",
    "Hybrid",
    "On-site",
];

static JOB_TYPE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)job\s*type\s*:\s*([^,;.\n]+)").unwrap());
static EXPERIENCE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)experience\s*:\s*([^,.;\n]+)").unwrap());
static SALARY_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)salary\s*:\s*([^.]*\b(?:year|month|annum|lpa)\b[^.]*)").unwrap()
});
static SALARY_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[₹$€£¥]|(?i:per\s+(?:year|month|annum))|LPA").unwrap());

const PERIOD: &str = r"(?:per\s+year|per\s+month|per\s+annum|a\s+year|a\s+month|/year|/month|/annum)";

/// Salary shapes Indeed renders, most specific first.
static SALARY_SHAPES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"₹\s*[\d,]+\s*-\s*₹\s*[\d,]+\s*{}", PERIOD),
        format!(r"\$\s*[\d,]+\s*-\s*\$\s*[\d,]+\s*{}", PERIOD),
        format!(r"€\s*[\d,]+\s*-\s*€\s*[\d,]+\s*{}", PERIOD),
        r"[₹$€£¥]\s*[\d,]+\s*-\s*[₹$€£¥]\s*[\d,]+".to_string(),
        format!(r"[\d,]+\s*-\s*[\d,]+\s*{}", PERIOD),
        r"[\d.]+\s*-\s*[\d.]+\s*LPA".to_string(),
        format!(r"[₹$€£¥]\s*[\d,]+\s*{}", PERIOD),
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
    .collect()
});

#[derive(Debug, Default, Clone, Copy)]
pub struct IndeedExtractor;

impl SiteExtractor for IndeedExtractor {
    fn name(&self) -> &'static str {
        "indeed"
    }

    fn extract(&self, page: &Page, out: &mut JobFields) -> Result<(), ExtractError> {
        fill_with(&mut out.title, || page.first_nonempty(TITLE))?;
        fill_with(&mut out.company, || page.first_nonempty(COMPANY))?;
        fill_with(&mut out.location, || page.first_text(LOCATION, |t| !t.contains("reviews")))?;

        let description = page.first_nonempty(DESCRIPTION)?;
        let description = description.as_deref();

        fill_with(&mut out.job_type, || job_type(page, description))?;
        fill_with(&mut out.experience_level, || experience(page, description))?;
        fill_with(&mut out.salary, || salary(page, description))?;
        salary_from_description(out, description);
        Ok(())
    }
}

fn job_type(page: &Page, description: Option<&str>) -> Result<Option<String>, ExtractError> {
    for css in JOB_TYPE_ITEMS {
        for el in page.select(css)? {
            let text = visible_text(&el);
            if parent_text(&el).to_lowercase().contains("job type") && !text.is_empty() {
                return Ok(Some(text));
            }
            if let Some(known) = KNOWN_TYPES.iter().find(|k| text.contains(*k)) {
                return Ok(Some(known.to_string()));
            }
        }
    }

    let Some(text) = description else {
        return Ok(None);
    };
    if let Some(caps) = JOB_TYPE_LABEL.captures(text) {
        let value = caps[1].trim();
        if !value.is_empty() {
            return Ok(Some(capitalize_first(value)));
        }
    }
    let lower = text.to_lowercase();
    Ok(KNOWN_TYPES
        .iter()
        .find(|k| lower.contains(&k.to_lowercase()))
        .map(|k| k.to_string()))
}

fn experience(page: &Page, description: Option<&str>) -> Result<Option<String>, ExtractError> {
    for text in page.texts(EXPERIENCE_ITEMS) {
        let lower = text?.to_lowercase();
        if lower.contains("experience") || lower.contains("seniority") {
            if let Some(level) = first_match(&EXPERIENCE_LEVELS, &lower) {
                return Ok(Some(level));
            }
        }
    }

    let Some(text) = description else {
        return Ok(None);
    };
    if let Some(caps) = EXPERIENCE_LABEL.captures(text) {
        let value = caps[1].trim();
        if !value.is_empty() {
            return Ok(Some(value.to_string()));
        }
    }
    Ok(first_match(&EXPERIENCE_LEVELS, &text.to_lowercase()))
}

fn salary(page: &Page, description: Option<&str>) -> Result<Option<String>, ExtractError> {
    for css in SALARY_ITEMS {
        for el in page.select(css)? {
            let text = visible_text(&el);
            if text.is_empty() {
                continue;
            }
            if SALARY_HINT.is_match(&text) {
                return Ok(Some(text));
            }
            let labeled = parent_text(&el).to_lowercase().contains("salary");
            if labeled && SALARY_SHAPES.iter().any(|re| re.is_match(&text)) {
                return Ok(Some(text));
            }
        }
    }

    let Some(text) = description else {
        return Ok(None);
    };
    if let Some(caps) = SALARY_LABEL.captures(text) {
        let value = caps[1].trim();
        if !value.is_empty() {
            return Ok(Some(value.to_string()));
        }
    }
    Ok(SALARY_SHAPES
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| with_context(text, m.start(), m.end(), 10).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(html: &str) -> JobFields {
        let page = Page::parse(html, "https://www.indeed.com/viewjob?jk=1");
        let mut out = JobFields::default();
        IndeedExtractor.extract(&page, &mut out).unwrap();
        out
    }

    #[test]
    fn header_fields_skip_review_counts() {
        let out = run(r#"
            <h1 class="jobsearch-JobInfoHeader-title">Warehouse Associate</h1>
            <div data-testid="company-name">Globex</div>
            <div class="companyLocation">1,204 reviews</div>
            <div class="companyLocation">Reno, NV 89501</div>
        "#);
        assert_eq!(out.title.as_deref(), Some("Warehouse Associate"));
        assert_eq!(out.company.as_deref(), Some("Globex"));
        assert_eq!(out.location.as_deref(), Some("Reno, NV 89501"));
    }

    #[test]
    fn section_items_give_type_experience_and_salary() {
        let out = run(r#"
            <div id="jobDetailsSection">
              <div data-testid="jobsearch-JobDescriptionSection-item">
                <h3>Pay</h3>
                <div data-testid="jobsearch-JobDescriptionSection-value">$18 - $22 an hour</div>
              </div>
              <div data-testid="jobsearch-JobDescriptionSection-item">
                <h3>Job type</h3>
                <div data-testid="jobsearch-JobDescriptionSection-value">Full-time</div>
              </div>
            </div>
            <div class="jobsearch-JobDescriptionSection-sectionItem">Experience: 2 to 4 years</div>
        "#);
        assert_eq!(out.job_type.as_deref(), Some("Full-time"));
        assert_eq!(out.salary.as_deref(), Some("$18 - $22 an hour"));
        assert_eq!(out.experience_level.as_deref(), Some("2-4 years experience"));
    }

    #[test]
    fn description_labels() {
        let out = run(r#"
            <div id="jobDescriptionText">
              <p>Job Type: contract, 6 months</p>
              <p>Experience: 3 years of forklift operation; required.</p>
              <p>Salary: 40,000 to 45,000 per year. Benefits include dental.</p>
            </div>
        "#);
        assert_eq!(out.job_type.as_deref(), Some("Contract"));
        assert_eq!(out.experience_level.as_deref(), Some("3 years of forklift operation"));
        assert_eq!(out.salary.as_deref(), Some("40,000 to 45,000 per year"));
    }

    #[test]
    fn description_salary_keeps_context() {
        let out = run(r#"
            <div id="jobDescriptionText">We offer ₹4,00,000 - ₹6,00,000 per annum and growth.</div>
        "#);
        assert_eq!(out.salary.as_deref(), Some("We offer ₹4,00,000 - ₹6,00,000 per annum and growt"));
    }
}
