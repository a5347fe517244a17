// ABOUTME: ZipRecruiter job page strategy, including FAQ salary answers and company detail notes.
// ABOUTME: Employment type tokens such as FULL_TIME are rendered as Full-Time.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::text::{next_element_sibling, title_case_token, visible_text};
use crate::dom::Page;
use crate::error::ExtractError;
use crate::extractors::jsonld::hiring_organization;
use crate::extractors::{add_workplace_from, fill_with, salary_from_description, SiteExtractor};
use crate::patterns::{first_match, JobTypeSet, YEARS_OF_EXPERIENCE, YEAR_COUNTS};
use crate::record::JobFields;

const TITLE: &[&str] = &[
    ".job_header h1.job_title",
    ".job_title",
    ".hiring_job_title",
    "h1.job-title",
    r#"[data-test="job-title"]"#,
    ".jobTitle",
];

const COMPANY: &[&str] = &[
    ".job_header .job_company",
    ".job_company",
    ".hiring_company",
    ".company_name",
    ".companyName",
    r#"[data-test="company-name"]"#,
];

const LOCATION: &[&str] = &[
    ".job_header .job_location",
    ".job_location",
    ".hiring_location",
    ".location",
    ".jobLocation",
];

const ADDRESS_CITY: &[&str] = &[".company_details .name + *"];

const SALARY: &[&str] = &[
    ".job_benefits_list .salary",
    ".job_salary",
    ".estimated_salary",
    ".salaryOnly",
    ".compensation",
    r#"[data-test="salary"]"#,
];

const FAQ: &[&str] = &[".faq_question, .faq_answer"];

const JOB_TYPE: &[&str] = &[
    ".job_benefits_list .employment_type",
    ".job_employment",
    ".employment_type",
    r#"[data-test="job-type"]"#,
    r#"[data-test="employment-type"]"#,
];

const DESCRIPTION: &[&str] = &[".job_description", ".jobDescriptionSection"];

const DETAIL_HEADINGS: &str = ".company_details h3.additional_text";

static FAQ_PAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\$\s*[\d,.]+\s*(?:to|[-–—])\s*\$?\s*[\d,.]+|pays?\s+\$\s*[\d,.]+").unwrap()
});
static PAYS_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^pays?\s+").unwrap());
static EMPLOYMENT_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Employment\s+Type:\s+([A-Z_]+)").unwrap());
static QUALIFICATIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)(?:qualifications|requirements).*?\d+\+?\s*years?").unwrap());

#[derive(Debug, Default, Clone, Copy)]
pub struct ZipRecruiterExtractor;

impl SiteExtractor for ZipRecruiterExtractor {
    fn name(&self) -> &'static str {
        "ziprecruiter"
    }

    fn extract(&self, page: &Page, out: &mut JobFields) -> Result<(), ExtractError> {
        fill_with(&mut out.title, || page.first_nonempty(TITLE))?;
        fill_with(&mut out.company, || {
            Ok(page.first_nonempty(COMPANY)?.map(|c| strip_at(&c)))
        })?;
        fill_with(&mut out.company, || hiring_organization(page))?;
        fill_with(&mut out.location, || page.first_nonempty(LOCATION))?;
        fill_with(&mut out.location, || page.first_nonempty(ADDRESS_CITY))?;
        fill_with(&mut out.salary, || page.first_nonempty(SALARY))?;
        fill_with(&mut out.salary, || faq_salary(page))?;

        let description = page.first_nonempty(DESCRIPTION)?;
        let description = description.as_deref();

        if out.job_type.is_none() {
            let mut types = JobTypeSet::new();
            if let Some(kind) = page.first_nonempty(JOB_TYPE)? {
                types.push(kind);
            } else if let Some(caps) = description.and_then(|d| EMPLOYMENT_TYPE.captures(d)) {
                types.push(title_case_token(&caps[1]));
            }
            add_workplace_from(&mut types, description);
            out.job_type = types.into_value();
        }

        fill_with(&mut out.experience_level, || Ok(description.and_then(experience)))?;
        salary_from_description(out, description);

        detail_notes(page, out)
    }
}

fn strip_at(company: &str) -> String {
    company.strip_prefix("at ").unwrap_or(company).trim().to_string()
}

fn faq_salary(page: &Page) -> Result<Option<String>, ExtractError> {
    for text in page.texts(FAQ) {
        let text = text?;
        if !text.contains('$') {
            continue;
        }
        if let Some(m) = FAQ_PAY.find(&text) {
            return Ok(Some(PAYS_PREFIX.replace(m.as_str(), "").trim().to_string()));
        }
    }
    Ok(None)
}

/// Years required by the qualifications section, else any experience phrase.
fn experience(description: &str) -> Option<String> {
    if let Some(section) = QUALIFICATIONS.find(description) {
        return first_match(&YEAR_COUNTS, section.as_str());
    }
    first_match(&YEARS_OF_EXPERIENCE, description)
}

fn detail_notes(page: &Page, out: &mut JobFields) -> Result<(), ExtractError> {
    let headings = page.select(DETAIL_HEADINGS)?;
    for (label, key) in [("Industry", "Industry"), ("Posted date", "Posted date")] {
        let value = headings
            .iter()
            .filter(|h| visible_text(h).contains(key))
            .filter_map(next_element_sibling)
            .map(|el| visible_text(&el))
            .find(|t| !t.is_empty());
        if let Some(value) = value {
            out.note(label, &value);
        }
    }
    if let Some(benefits) = page.first_nonempty(&[".job_benefits_list .benefits"])? {
        out.note("Benefits", &benefits);
    }
    Ok(())
}
