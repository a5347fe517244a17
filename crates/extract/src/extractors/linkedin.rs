// ABOUTME: LinkedIn job page strategy covering both the logged-in and the public job view layouts.
// ABOUTME: Salary goes through four tiers: criteria labels, salary selectors, insight rows, description text.

use crate::dom::text::visible_text;
use crate::dom::{text_within, Page};
use crate::error::ExtractError;
use crate::extractors::{fill_with, salary_from_description, SiteExtractor};
use crate::patterns::{first_match, JobTypeSet, JOB_TYPE_TAGS, SENIORITY_PHRASES};
use crate::record::JobFields;
use crate::salary::{is_definitely_salary, is_likely_salary};

const TITLE: &[&str] = &[
    ".job-details-jobs-unified-top-card__job-title",
    ".t-24.t-bold.inline h1",
    ".topcard__title",
    ".jobs-unified-top-card__job-title",
    "h1.t-24",
];

const COMPANY: &[&str] = &[
    ".job-details-jobs-unified-top-card__company-name a",
    ".job-details-jobs-unified-top-card__company-name",
    ".topcard__org-name-link",
    ".jobs-unified-top-card__company-name",
    r#"a[data-tracking-control-name="public_jobs_topcard_company-name"]"#,
];

const LOCATION: &[&str] = &[
    ".job-details-jobs-unified-top-card__bullet",
    ".job-details-jobs-unified-top-card__primary-description-container .tvm__text:first-child",
    ".topcard__flavor--bullet",
    ".jobs-unified-top-card__bullet",
    ".job-details-jobs-unified-top-card__workplace-type",
];

const JOB_TYPE: &[&str] = &[
    ".job-details-jobs-unified-top-card__workplace-type",
    ".jobs-unified-top-card__workplace-type",
    ".job-details-preferences-and-skills__pill",
    r#".job-criteria__item [data-test-job-criteria-label="Working pattern"]"#,
];

const CRITERIA_ITEM: &str = ".description__job-criteria-item, .job-criteria__item";
const CRITERIA_LABEL: &str = ".description__job-criteria-subheader, .job-criteria__subheader";
const CRITERIA_VALUE: &str = ".description__job-criteria-text, .job-criteria__text";

const SALARY: &[&str] = &[
    ".salary-top-card__salary-range",
    ".job-details-jobs-unified-top-card__salary-info",
    ".compensation",
    r#"[data-test="compensation"]"#,
    ".job-details-jobs-unified-top-card__salary-details",
    ".jobs-unified-top-card__salary-details",
    ".jobs-details-jobs-unified-top-card__compensation-text",
    "span.jobs-details-job-summary__text--salary",
];

const INSIGHT: &[&str] = &[".job-details-jobs-unified-top-card__job-insight"];

const DESCRIPTION: &[&str] = &[
    ".jobs-description__content",
    ".jobs-description-content__text",
    "#job-details",
];

/// Words that mark a top-card bullet as company stats rather than a place.
const LOCATION_NOISE: &[&str] = &["employees", "followers", "applicants"];

#[derive(Debug, Default, Clone, Copy)]
pub struct LinkedInExtractor;

impl SiteExtractor for LinkedInExtractor {
    fn name(&self) -> &'static str {
        "linkedin"
    }

    fn extract(&self, page: &Page, out: &mut JobFields) -> Result<(), ExtractError> {
        fill_with(&mut out.title, || page.first_nonempty(TITLE))?;
        fill_with(&mut out.company, || page.first_nonempty(COMPANY))?;
        fill_with(&mut out.location, || {
            page.first_text(LOCATION, |t| !LOCATION_NOISE.iter().any(|w| t.contains(w)))
        })?;

        if out.job_type.is_none() {
            let mut types = JobTypeSet::new();
            for text in page.texts(JOB_TYPE) {
                if let Some(tag) = first_match(&JOB_TYPE_TAGS, &text?) {
                    types.push(tag);
                }
            }
            out.job_type = types.into_value();
        }

        let criteria = criteria(page)?;
        let description = page.first_nonempty(DESCRIPTION)?;

        fill_with(&mut out.experience_level, || {
            Ok(labeled(&criteria, &["experience", "seniority"])
                .or_else(|| description.as_deref().and_then(|d| first_match(&SENIORITY_PHRASES, d))))
        })?;

        fill_with(&mut out.salary, || {
            if let Some(v) = labeled(&criteria, &["salary", "compensation", "pay"]) {
                return Ok(Some(v));
            }
            if let Some(v) = page.first_text(SALARY, is_likely_salary)? {
                return Ok(Some(v));
            }
            page.first_text(INSIGHT, is_definitely_salary)
        })?;
        salary_from_description(out, description.as_deref());

        company_notes(page, out)
    }
}

/// `(lower-cased label, value)` pairs from the job criteria list.
fn criteria(page: &Page) -> Result<Vec<(String, String)>, ExtractError> {
    let mut pairs = Vec::new();
    for item in page.select(CRITERIA_ITEM)? {
        let label = text_within(&item, CRITERIA_LABEL)?;
        let value = text_within(&item, CRITERIA_VALUE)?;
        if let (Some(label), Some(value)) = (label, value) {
            pairs.push((label.to_lowercase(), value));
        }
    }
    Ok(pairs)
}

fn labeled(criteria: &[(String, String)], keys: &[&str]) -> Option<String> {
    criteria
        .iter()
        .find(|(label, _)| keys.iter().any(|k| label.contains(k)))
        .map(|(_, value)| value.clone())
}

/// Company size and industry, when the company card is on the page.
fn company_notes(page: &Page, out: &mut JobFields) -> Result<(), ExtractError> {
    let size = page
        .select(".jobs-company__inline-information")?
        .iter()
        .map(visible_text)
        .find(|t| t.contains("employee"));
    if let Some(size) = size {
        out.note("Company Size", &size);
    }

    let industry = page.select(".t-14.mt5")?.into_iter().find_map(|el| {
        let text = visible_text(&el);
        if text.is_empty() || text.contains("employee") || text.contains("LinkedIn") {
            return None;
        }
        el.text().map(str::trim).find(|line| !line.is_empty()).map(str::to_string)
    });
    if let Some(industry) = industry {
        out.note("Industry", &industry);
    }
    Ok(())
}
