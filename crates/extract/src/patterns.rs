// ABOUTME: Shared regex families for job type, workplace mode and experience detection.
// ABOUTME: Patterns are ordered; the first one that matches decides the value.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// One entry of an ordered pattern family.
///
/// `label` replaces the matched text when set. Otherwise numeric captures named
/// `lo`/`hi` are rendered as years of experience, and failing that the raw
/// match is returned.
pub struct Pattern {
    re: Regex,
    label: Option<&'static str>,
}

impl Pattern {
    fn new(re: &str, label: Option<&'static str>) -> Self {
        Self {
            re: Regex::new(re).unwrap(),
            label,
        }
    }

    fn describe(&self, caps: &Captures<'_>) -> String {
        if let Some(label) = self.label {
            return label.to_string();
        }
        match (caps.name("lo"), caps.name("hi")) {
            (Some(lo), Some(hi)) => format!("{}-{} years experience", lo.as_str(), hi.as_str()),
            (Some(lo), None) => format!("{} years experience", lo.as_str()),
            _ => caps
                .get(0)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
        }
    }
}

fn family(specs: &[(&str, Option<&'static str>)]) -> Vec<Pattern> {
    specs
        .iter()
        .map(|(re, label)| Pattern::new(re, *label))
        .collect()
}

/// Runs `patterns` in order against `text`, returning the first description.
pub fn first_match(patterns: &[Pattern], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|p| p.re.captures(text).map(|caps| p.describe(&caps)))
        .filter(|s| !s.is_empty())
}

/// Job type tags read from short pill/badge texts. One tag per text.
pub static JOB_TYPE_TAGS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    family(&[
        (r"(?i)remote|work from home|\bwfh\b", Some("Remote")),
        (r"(?i)hybrid", Some("Hybrid")),
        (r"(?i)on-?site|in-?office", Some("On-site")),
        (r"(?i)full-?time", Some("Full-time")),
        (r"(?i)part-?time", Some("Part-time")),
        (r"(?i)contract", Some("Contract")),
        (r"(?i)intern(?:ship)?", Some("Internship")),
        (r"(?i)temporary", Some("Temporary")),
    ])
});

/// Employment types searched for inside long description text.
pub static DESCRIPTION_JOB_TYPES: Lazy<Vec<Pattern>> = Lazy::new(|| {
    family(&[
        (r"(?i)\bfull[- ]time\b", Some("Full-time")),
        (r"(?i)\bpart[- ]time\b", Some("Part-time")),
        (r"(?i)\bcontract\b", Some("Contract")),
        (r"(?i)\btemporary\b", Some("Temporary")),
        (r"(?i)\bpermanent\b", Some("Permanent")),
        (r"(?i)\bfreelance\b", Some("Freelance")),
        (r"(?i)\binternship\b", Some("Internship")),
    ])
});

/// Workplace modes searched for inside long description or body text.
pub static WORKPLACE_MODES: Lazy<Vec<Pattern>> = Lazy::new(|| {
    family(&[
        (r"(?i)remote work|work from home|\bwfh\b|fully remote", Some("Remote")),
        (r"(?i)\bhybrid\b", Some("Hybrid")),
        (r"(?i)\bon-?site\b|\bin-?office\b|\bin office\b", Some("On-site")),
    ])
});

/// True when `text` already names a workplace mode.
pub fn mentions_workplace(text: &str) -> bool {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)remote|hybrid|on-?site|in-?office").unwrap());
    RE.is_match(text)
}

/// Seniority and year-count phrases, most specific first. Raw matches are kept.
pub static SENIORITY_PHRASES: Lazy<Vec<Pattern>> = Lazy::new(|| {
    family(&[
        (r"(?i)\b(?:entry[- ]level|fresher|fresh graduate)\b", None),
        (r"(?i)\bno experience\b", None),
        (r"(?i)\b0[- ]?(?:year|yr)s? experience\b", None),
        (r"(?i)\b(?:1|one)[- ]?(?:year|yr)s? experience\b", None),
        (r"(?i)\b(?:2|two)[- ]?(?:year|yr)s? experience\b", None),
        (r"(?i)\b(?:3|three)[- ]?(?:year|yr)s? experience\b", None),
        (r"(?i)\b(?:4|four)[- ]?(?:year|yr)s? experience\b", None),
        (r"(?i)\b(?:5|five)[- ]?(?:year|yr)s? experience\b", None),
        (r"(?i)\b(?:1|one)[- ]?(?:to|–|-)[- ]?(?:2|two)[- ]?(?:year|yr)s? experience\b", None),
        (r"(?i)\b(?:2|two)[- ]?(?:to|–|-)[- ]?(?:3|three)[- ]?(?:year|yr)s? experience\b", None),
        (r"(?i)\b(?:3|three)[- ]?(?:to|–|-)[- ]?(?:5|five)[- ]?(?:year|yr)s? experience\b", None),
        (r"(?i)\b(?:5|five)[- ]?(?:to|–|-)[- ]?(?:8|eight)[- ]?(?:year|yr)s? experience\b", None),
        (r"(?i)\b(?:8|eight)[- ]?(?:to|–|-)[- ]?(?:10|ten)[- ]?(?:year|yr)s? experience\b", None),
        (r"(?i)\b(?:10|ten)\+[- ]?(?:year|yr)s? experience\b", None),
        (r"(?i)\bjunior\b", None),
        (r"(?i)\bmid[- ]level\b", None),
        (r"(?i)\bsenior\b", None),
        (r"(?i)\bprincipal\b", None),
        (r"(?i)\blead\b", None),
    ])
});

/// Year-count requirements with captures, then seniority words.
pub static YEARS_OF_EXPERIENCE: Lazy<Vec<Pattern>> = Lazy::new(|| {
    family(&[
        (
            r"(?i)(?P<lo>\d+)\+?\s*(?:to|[-–—])\s*(?P<hi>\d+)\+?\s*years?\s+(?:of\s+)?experience",
            None,
        ),
        (r"(?i)(?P<lo>\d+)\+?\s*years?\s+(?:of\s+)?experience", None),
        (r"(?i)minimum\s+(?:of\s+)?(?P<lo>\d+)\+?\s*years?\s+experience", None),
        (r"(?i)(?P<lo>\d+)\+?\s*years?\s+minimum", None),
        (
            r"(?i)experience\s*:\s*(?P<lo>\d+)\+?\s*(?:to|[-–—])\s*(?P<hi>\d+)\+?\s*years?",
            None,
        ),
        (r"(?i)experience\s*:\s*(?P<lo>\d+)\+?\s*years?", None),
        (r"(?i)entry[- ]level", None),
        (r"(?i)junior[- ]level", None),
        (r"(?i)mid[- ]level", None),
        (r"(?i)senior[- ]level", None),
        (r"(?i)\bexperienced\b", None),
        (r"(?i)\bfresher\b", None),
        (r"(?i)no experience", None),
    ])
});

/// Experience levels with canonical labels, then bare year counts.
pub static EXPERIENCE_LEVELS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    family(&[
        (r"(?i)entry[- ]level", Some("Entry Level")),
        (r"(?i)\bjunior\b", Some("Junior")),
        (r"(?i)mid[- ]level", Some("Mid Level")),
        (r"(?i)\bsenior\b", Some("Senior")),
        (r"(?i)\bprincipal\b", Some("Principal")),
        (r"(?i)\blead\b", Some("Lead")),
        (r"(?i)\bfresher\b", Some("Fresher")),
        (r"(?i)\b0[- ]years?\b", Some("0 years experience")),
        (r"(?i)no experience", Some("No experience required")),
        (r"(?i)(?P<lo>\d+)\+?\s*(?:-|to)\s*(?P<hi>\d+)\+?\s*years?", None),
        (r"(?i)(?P<lo>\d+)\+?\s*years?", None),
    ])
});

/// Bare year counts: "3-5 years", "2+ years".
pub static YEAR_COUNTS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    family(&[
        (r"(?i)(?P<lo>\d+)\+?\s*(?:to|[-–—])\s*(?P<hi>\d+)\+?\s*years?", None),
        (r"(?i)(?P<lo>\d+)\+?\s*years?", None),
    ])
});

/// Pay phrases found in free page text that have no currency-specific shape.
pub static LOOSE_SALARY: Lazy<Vec<Pattern>> = Lazy::new(|| {
    family(&[
        (r"(?i)[\d,]+\s*-\s*[\d,]+\s+(?:per\s+hour|/hour|/hr|an\s+hour)", None),
        (r"(?i)[\d,]+k?\s*-\s*[\d,]+k?\s+(?:per\s+year|/year|/yr|a\s+year|annually)", None),
        (r"(?i)[\d,]+k\s*-\s*[\d,]+k", None),
    ])
});

/// Collects job type tags into a de-duplicated, comma-joined composite.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JobTypeSet {
    tags: Vec<String>,
}

impl JobTypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `tag` unless an equal tag (ignoring case) is already present.
    pub fn push(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            return;
        }
        self.tags.push(tag.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// True when one of the tags already names a workplace mode.
    pub fn has_workplace(&self) -> bool {
        self.tags.iter().any(|t| mentions_workplace(t))
    }

    /// The composite value, or `None` when nothing was collected.
    pub fn into_value(self) -> Option<String> {
        if self.tags.is_empty() {
            None
        } else {
            Some(self.tags.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_families_compile() {
        for fam in [
            &*JOB_TYPE_TAGS,
            &*DESCRIPTION_JOB_TYPES,
            &*WORKPLACE_MODES,
            &*SENIORITY_PHRASES,
            &*YEARS_OF_EXPERIENCE,
            &*EXPERIENCE_LEVELS,
            &*YEAR_COUNTS,
            &*LOOSE_SALARY,
        ] {
            assert!(!fam.is_empty());
        }
    }

    #[test]
    fn job_type_tags_take_first_pattern() {
        assert_eq!(first_match(&JOB_TYPE_TAGS, "Hybrid").as_deref(), Some("Hybrid"));
        assert_eq!(
            first_match(&JOB_TYPE_TAGS, "Full-time · Remote").as_deref(),
            Some("Remote")
        );
        assert_eq!(first_match(&JOB_TYPE_TAGS, "Mid-Senior level"), None);
    }

    #[test]
    fn years_of_experience_formats_ranges() {
        assert_eq!(
            first_match(&YEARS_OF_EXPERIENCE, "You bring 3-5 years of experience with Go.").as_deref(),
            Some("3-5 years experience")
        );
        assert_eq!(
            first_match(&YEARS_OF_EXPERIENCE, "At least 7+ years experience required").as_deref(),
            Some("7 years experience")
        );
        assert_eq!(
            first_match(&YEARS_OF_EXPERIENCE, "This is a senior-level role").as_deref(),
            Some("senior-level")
        );
    }

    #[test]
    fn seniority_phrases_keep_raw_text() {
        assert_eq!(
            first_match(&SENIORITY_PHRASES, "Great for an Entry-Level candidate").as_deref(),
            Some("Entry-Level")
        );
        assert_eq!(
            first_match(&SENIORITY_PHRASES, "needs 2 years experience and senior mindset").as_deref(),
            Some("2 years experience")
        );
    }

    #[test]
    fn experience_levels_use_labels_then_numbers() {
        assert_eq!(
            first_match(&EXPERIENCE_LEVELS, "experience: mid-level").as_deref(),
            Some("Mid Level")
        );
        assert_eq!(
            first_match(&EXPERIENCE_LEVELS, "experience 2 to 4 years").as_deref(),
            Some("2-4 years experience")
        );
    }

    #[test]
    fn year_counts_and_loose_salary() {
        assert_eq!(
            first_match(&YEAR_COUNTS, "Qualifications: 4 to 6 years in retail").as_deref(),
            Some("4-6 years experience")
        );
        assert_eq!(
            first_match(&LOOSE_SALARY, "Pay is 18 - 22 per hour").as_deref(),
            Some("18 - 22 per hour")
        );
        assert_eq!(first_match(&LOOSE_SALARY, "Team of 10 - 12 people"), None);
    }

    #[test]
    fn workplace_modes() {
        assert_eq!(
            first_match(&WORKPLACE_MODES, "We support remote work across the EU").as_deref(),
            Some("Remote")
        );
        assert_eq!(
            first_match(&WORKPLACE_MODES, "This is an on-site role").as_deref(),
            Some("On-site")
        );
        assert!(mentions_workplace("Full-time, Hybrid"));
        assert!(!mentions_workplace("Full-time"));
    }

    #[test]
    fn job_type_set_dedupes_and_joins() {
        let mut set = JobTypeSet::new();
        set.push("Remote");
        set.push("Full-time");
        set.push("remote");
        set.push(" ");
        assert!(set.has_workplace());
        assert_eq!(set.into_value().as_deref(), Some("Remote, Full-time"));
        assert_eq!(JobTypeSet::new().into_value(), None);
    }
}
