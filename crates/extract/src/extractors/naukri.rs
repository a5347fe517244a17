// ABOUTME: Naukri job page strategy with Indian salary formats and multi-city locations.
// ABOUTME: Company address, website, rating and skills are collected as notes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::text::{normalize_whitespace, visible_text};
use crate::dom::{select_within, text_within, Page};
use crate::error::ExtractError;
use crate::extractors::{add_workplace_from, fill_with, salary_from_description, SiteExtractor};
use crate::patterns::{first_match, JobTypeSet, DESCRIPTION_JOB_TYPES};
use crate::record::JobFields;

const TITLE: &[&str] = &[
    ".styles_jd-header-title__rZwM1",
    ".naukri-header-title",
    ".jd-header-title",
    "h1[title]",
    ".jobTitle",
];

const COMPANY: &[&str] = &[
    ".styles_jd-header-comp-name__MvqAI a",
    ".styles_jd-header-comp-name__MvqAI",
    ".companyInfo a",
    ".jd-header-comp-name",
    ".company-name",
    r#"[title*="Careers"]"#,
];

const LOCATION: &[&str] = &[
    ".styles_jhc__location__W_pVs",
    ".location",
    ".locality",
    ".styles_jhc__loc___Du2H",
    ".jd-location",
];

const SALARY: &[&str] = &[
    ".styles_jhc__salary__jdfEC",
    ".salary",
    ".ctc",
    ".compensation",
    r#"[class*="salary"]"#,
];

const EXPERIENCE: &[&str] = &[
    ".styles_jhc__exp__k_giM",
    ".experience",
    ".exp",
    r#"[class*="exp"]"#,
];

const DESCRIPTION: &[&str] = &[".job-desc", ".jd-desc", ".styles_detail__U2rw4", ".jobDescription"];

const COMPANY_INFO: &str = ".styles_comp-info-detail__sO7Aw";

const RATING: &[&str] = &[
    ".styles_rating-wrapper__jPmOo",
    ".rating",
    ".company-rating",
    r#"[class*="rating"]"#,
];

const SKILLS: &[&str] = &[".key-skill", ".skills", ".tags", r#"[class*="skill"]"#, r#"[class*="tag"]"#];

static LAKH_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([\d.]+)[-\s]*(?:to)?[-\s]*([\d.]+)?\s*(?:Lacs?|Lakhs?)").unwrap()
});
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?").unwrap());

#[derive(Debug, Default, Clone, Copy)]
pub struct NaukriExtractor;

impl SiteExtractor for NaukriExtractor {
    fn name(&self) -> &'static str {
        "naukri"
    }

    fn extract(&self, page: &Page, out: &mut JobFields) -> Result<(), ExtractError> {
        fill_with(&mut out.title, || page.first_nonempty(TITLE))?;
        fill_with(&mut out.company, || {
            Ok(page
                .first_nonempty(COMPANY)?
                .map(|c| c.replacen(" Careers", "", 1).trim().to_string()))
        })?;
        fill_with(&mut out.location, || {
            Ok(page.first_nonempty(LOCATION)?.map(|l| shorten_locations(&l)))
        })?;
        fill_with(&mut out.salary, || {
            Ok(page.first_nonempty(SALARY)?.map(|s| format_salary(&s)))
        })?;
        fill_with(&mut out.experience_level, || page.first_nonempty(EXPERIENCE))?;

        let description = page.first_nonempty(DESCRIPTION)?;
        let description = description.as_deref();

        if out.job_type.is_none() {
            let mut types = JobTypeSet::new();
            if let Some(kind) = description.and_then(|d| first_match(&DESCRIPTION_JOB_TYPES, d)) {
                types.push(kind);
            }
            add_workplace_from(&mut types, description);
            out.job_type = types.into_value();
        }
        salary_from_description(out, description);

        company_notes(page, out)
    }
}

/// Drops "Jobs in" link text and folds three or more cities into `First +N more`.
fn shorten_locations(raw: &str) -> String {
    let cleaned = normalize_whitespace(&raw.replace("Jobs in", ""));
    let parts: Vec<&str> = cleaned.split(',').collect();
    if parts.len() <= 2 {
        return cleaned;
    }
    format!("{} +{} more", parts[0].trim(), parts.len() - 1)
}

/// Removes the rupee icon text and rewrites Lac/Lakh amounts as `₹A - B Lakhs P.A.`.
fn format_salary(raw: &str) -> String {
    let cleaned = normalize_whitespace(&raw.replacen('₹', "", 1));
    if !(cleaned.contains("Lac") || cleaned.contains("Lakh")) {
        return cleaned;
    }
    let Some(caps) = LAKH_RANGE.captures(&cleaned) else {
        return cleaned;
    };
    let Ok(min) = caps[1].parse::<f64>() else {
        return cleaned;
    };
    match caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok()) {
        Some(max) => format!("₹{} - {} Lakhs P.A.", min, max),
        None => format!("₹{} Lakhs P.A.", min),
    }
}

fn company_notes(page: &Page, out: &mut JobFields) -> Result<(), ExtractError> {
    let details = page.select(COMPANY_INFO)?;

    let mut address = None;
    let mut website = None;
    for detail in &details {
        let label = text_within(detail, "label")?.unwrap_or_default();
        if address.is_none() && label.contains("Address") {
            address = text_within(detail, "span")?;
        }
        if website.is_none() && label.contains("Link") {
            website = select_within(detail, "span a")?
                .iter()
                .find_map(|a| a.value().attr("href"))
                .map(|href| page.resolve(href));
        }
    }
    if let Some(address) = address {
        out.note("Company Address", &address);
    }
    if let Some(website) = website {
        out.note("Company Website", &website);
    }

    for text in page.texts(RATING) {
        let text = text?;
        if let Some(m) = LEADING_NUMBER.find(&text) {
            out.note("Company Rating", m.as_str());
            break;
        }
    }

    for css in SKILLS {
        let skills: Vec<String> = page
            .select(css)?
            .iter()
            .map(visible_text)
            .filter(|s| !s.is_empty())
            .collect();
        if !skills.is_empty() {
            out.note("Skills", &skills.join(", "));
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(html: &str) -> JobFields {
        let page = Page::parse(html, "https://www.naukri.com/job-listings-x");
        let mut out = JobFields::default();
        NaukriExtractor.extract(&page, &mut out).unwrap();
        out
    }

    #[test]
    fn locations_are_shortened() {
        assert_eq!(shorten_locations("Jobs in Pune"), "Pune");
        assert_eq!(shorten_locations("Pune, Mumbai"), "Pune, Mumbai");
        assert_eq!(
            shorten_locations("Bengaluru, Hyderabad, Chennai, Pune"),
            "Bengaluru +3 more"
        );
    }

    #[test]
    fn lakh_salaries_are_reformatted() {
        assert_eq!(format_salary("₹ 5-8 Lacs PA"), "₹5 - 8 Lakhs P.A.");
        assert_eq!(format_salary("12.50 Lacs"), "₹12.5 Lakhs P.A.");
        assert_eq!(format_salary("Not disclosed"), "Not disclosed");
    }

    #[test]
    fn header_fields() {
        let out = run(r#"
            <h1 class="styles_jd-header-title__rZwM1" title="SDE II">SDE II</h1>
            <div class="styles_jd-header-comp-name__MvqAI"><a href="/c">Infosys Careers</a></div>
            <span class="styles_jhc__location__W_pVs">Jobs in <a>Pune</a>, <a>Noida</a>, <a>Delhi</a></span>
            <div class="styles_jhc__salary__jdfEC"><i>₹</i> 10-15 Lacs P.A.</div>
            <div class="styles_jhc__exp__k_giM">3 - 6 years</div>
            <div class="styles_detail__U2rw4">Full time role. Hybrid work model in Pune.</div>
        "#);
        assert_eq!(out.title.as_deref(), Some("SDE II"));
        assert_eq!(out.company.as_deref(), Some("Infosys"));
        assert_eq!(out.location.as_deref(), Some("Pune +2 more"));
        assert_eq!(out.salary.as_deref(), Some("₹10 - 15 Lakhs P.A."));
        assert_eq!(out.experience_level.as_deref(), Some("3 - 6 years"));
        assert_eq!(out.job_type.as_deref(), Some("Full-time, Hybrid"));
    }

    #[test]
    fn company_info_notes() {
        let out = run(r#"
            <div class="styles_comp-info-detail__sO7Aw"><label>Address:</label><span>Plot 44, Hinjewadi</span></div>
            <div class="styles_comp-info-detail__sO7Aw"><label>Link:</label><span><a href="/company/acme">acme</a></span></div>
            <div class="styles_rating-wrapper__jPmOo">4.1 (2.3k Reviews)</div>
            <a class="key-skill">Java</a><a class="key-skill">Spring</a>
        "#);
        assert_eq!(
            out.notes,
            vec![
                "Company Address: Plot 44, Hinjewadi".to_string(),
                "Company Website: https://www.naukri.com/company/acme".to_string(),
                "Company Rating: 4.1".to_string(),
                "Skills: Java, Spring".to_string(),
            ]
        );
    }
}
