// ABOUTME: Glassdoor job page strategy with a JSON-LD fallback for the employer name.
// ABOUTME: Job type combines labeled detail rows, description keywords and the workplace badge.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::Page;
use crate::error::ExtractError;
use crate::extractors::jsonld::hiring_organization;
use crate::extractors::{add_workplace_from, fill_with, salary_from_description, SiteExtractor};
use crate::patterns::{first_match, JobTypeSet, DESCRIPTION_JOB_TYPES, JOB_TYPE_TAGS, YEARS_OF_EXPERIENCE};
use crate::record::JobFields;

const TITLE: &[&str] = &[
    ".jobDetails_jobDetailsHeader__Hd9M3 h1",
    "h1#jd-job-title",
    ".job-title",
    ".jobViewMinimal .title",
    ".css-1j389vi",
    ".css-17x2pwl",
    r#"[data-test="job-title"]"#,
];

const COMPANY: &[&str] = &[
    ".EmployerProfile_employerNameHeading__bXBYr h4",
    ".employer-name",
    ".jobViewMinimal .employer",
    ".css-16nw49e",
    ".css-1cjhpv5",
    r#"[data-test="employer-name"]"#,
];

const LOCATION: &[&str] = &[
    r#".JobDetails_locationAndPay__XGFmY [data-test="location"]"#,
    ".location",
    ".jobViewMinimal .location",
    ".css-56kyx5",
    ".css-1v5elnn",
    r#"[data-test="location"]"#,
];

const SALARY: &[&str] = &[
    ".JobCard_salaryEstimate__QpbTW",
    "#jd-salary",
    r#"[data-test="detailSalary"]"#,
    ".salary",
    ".compensation",
    ".css-1bluz6i",
];

const DETAIL_ROWS: &[&str] = &[".jobDetails .d-flex", r#"[data-test*="Type"]"#, ".job-info"];

const DESCRIPTION: &[&str] = &[
    ".JobDetails_jobDescription__uW_fK",
    ".jobDescriptionContent",
    r#"[data-test="jobDesc"]"#,
];

const WORKPLACE: &[&str] = &[r#"[data-test="workplace-type"]"#, ".workplace-type", ".remote-status"];

/// Trailing "(Glassdoor est.)" style annotations.
static TRAILING_NOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*$").unwrap());

#[derive(Debug, Default, Clone, Copy)]
pub struct GlassdoorExtractor;

impl SiteExtractor for GlassdoorExtractor {
    fn name(&self) -> &'static str {
        "glassdoor"
    }

    fn extract(&self, page: &Page, out: &mut JobFields) -> Result<(), ExtractError> {
        fill_with(&mut out.title, || page.first_nonempty(TITLE))?;
        fill_with(&mut out.company, || page.first_nonempty(COMPANY))?;
        fill_with(&mut out.company, || hiring_organization(page))?;
        fill_with(&mut out.location, || page.first_nonempty(LOCATION))?;
        fill_with(&mut out.salary, || {
            Ok(page
                .first_nonempty(SALARY)?
                .map(|s| TRAILING_NOTE.replace(&s, "").trim().to_string()))
        })?;

        let description = page.first_nonempty(DESCRIPTION)?;
        let description = description.as_deref();

        fill_with(&mut out.experience_level, || {
            Ok(description.and_then(|d| first_match(&YEARS_OF_EXPERIENCE, d)))
        })?;

        if out.job_type.is_none() {
            let mut types = JobTypeSet::new();
            let labeled = page.first_text(DETAIL_ROWS, |t| {
                t.contains("Job Type") || t.contains("Employment Type")
            })?;
            match labeled.as_deref().and_then(value_after_colon) {
                Some(value) => types.push(value),
                None => {
                    if let Some(kind) = description.and_then(|d| first_match(&DESCRIPTION_JOB_TYPES, d)) {
                        types.push(kind);
                    }
                }
            }
            if let Some(badge) = page.first_nonempty(WORKPLACE)? {
                types.push(first_match(&JOB_TYPE_TAGS, &badge).unwrap_or(badge));
            }
            add_workplace_from(&mut types, description);
            out.job_type = types.into_value();
        }

        salary_from_description(out, description);
        Ok(())
    }
}

fn value_after_colon(text: &str) -> Option<&str> {
    text.split_once(':')
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(html: &str) -> JobFields {
        let page = Page::parse(html, "https://www.glassdoor.com/job-listing/x");
        let mut out = JobFields::default();
        GlassdoorExtractor.extract(&page, &mut out).unwrap();
        out
    }

    #[test]
    fn header_and_salary_estimate() {
        let out = run(r#"
            <div class="jobDetails_jobDetailsHeader__Hd9M3"><h1>QA Analyst</h1></div>
            <div data-test="employer-name">Initech</div>
            <div data-test="location">Remote</div>
            <div data-test="detailSalary">$70K - $90K (Glassdoor est.)</div>
        "#);
        assert_eq!(out.title.as_deref(), Some("QA Analyst"));
        assert_eq!(out.company.as_deref(), Some("Initech"));
        assert_eq!(out.location.as_deref(), Some("Remote"));
        assert_eq!(out.salary.as_deref(), Some("$70K - $90K"));
    }

    #[test]
    fn company_from_json_ld() {
        let out = run(r#"
            <script type="application/ld+json">{"hiringOrganization":{"name":"Umbrella"}}</script>
            <h1 id="jd-job-title">Chemist</h1>
        "#);
        assert_eq!(out.company.as_deref(), Some("Umbrella"));
    }

    #[test]
    fn job_type_and_experience_from_details() {
        let out = run(r#"
            <div class="jobDetails"><div class="d-flex">Employment Type: Full-time</div></div>
            <div class="workplace-type">Hybrid</div>
            <div class="jobDescriptionContent">
              You have 4+ years of experience shipping web apps. Part-time options exist.
            </div>
        "#);
        assert_eq!(out.job_type.as_deref(), Some("Full-time, Hybrid"));
        assert_eq!(out.experience_level.as_deref(), Some("4 years experience"));
    }

    #[test]
    fn job_type_from_description_with_workplace() {
        let out = run(r#"
            <div data-test="jobDesc">
              This is a contract role with a hybrid schedule. Entry-level applicants welcome.
            </div>
        "#);
        assert_eq!(out.job_type.as_deref(), Some("Contract, Hybrid"));
        assert_eq!(out.experience_level.as_deref(), Some("Entry-level"));
    }
}
