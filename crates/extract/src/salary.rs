// ABOUTME: Salary heuristics: a loose "likely" check, a strict "definitely" check and a description scanner.
// ABOUTME: Broad selectors are filtered by the loose check; non-salary-specific containers need the strict one.

//! Salary validation.
//!
//! Two tiers of confidence are used while searching a page:
//! - [`is_likely_salary`] screens text from selectors that usually hold pay
//!   information but sometimes hold other numbers.
//! - [`is_definitely_salary`] screens text from containers that are not
//!   salary-specific at all (job "insight" rows and the like).
//!
//! [`extract_salary_from_description`] pulls a short salary phrase out of a
//! long description. Every string accepted by the strict check is also
//! accepted by the loose one.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use once_cell::sync::Lazy;
use regex::Regex;

/// Longest phrase [`extract_salary_from_description`] will return.
pub const MAX_SALARY_PHRASE_CHARS: usize = 100;

static CURRENCY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[$€£¥₹]").unwrap());
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());
static K_NOTATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\d+k(?:-\d+k)?").unwrap());
static LPA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\d+(?:\.\d+)?\s*lpa").unwrap());
static LPA_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\d+(?:\.\d+)?\s*-\s*\d+(?:\.\d+)?\s*lpa").unwrap());
static EXPLICIT_LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)salary|compensation").unwrap());
static NUMERIC_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\d+\s*-\s*\d+|\d+k\s*-\s*\d+k").unwrap());

/// Pay keywords. "pay" needs a neighbouring space so "paypal" or "repay" don't count.
static PAY_KEYWORDS: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .build(["salary", "compensation", "pay ", " pay", "wage"])
        .unwrap()
});

static PERIOD_PHRASES: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .build([
            "per year", "per annum", "annually", "/yr", "a year", "per hour", "hourly", "/hr",
            "an hour", "per month", "monthly", "/mo", "a month",
        ])
        .unwrap()
});

/// Loose check: the text is probably a salary.
///
/// Requires a digit plus one of: a currency symbol, a pay keyword, a time
/// period phrase, `80k`-style shorthand, or LPA notation.
pub fn is_likely_salary(text: &str) -> bool {
    if !DIGIT_RE.is_match(text) {
        return false;
    }
    CURRENCY_RE.is_match(text)
        || PAY_KEYWORDS.is_match(text)
        || PERIOD_PHRASES.is_match(text)
        || K_NOTATION_RE.is_match(text)
        || LPA_RE.is_match(text)
}

/// Strict check: the text is a salary beyond reasonable doubt.
///
/// True for a currency symbol with a digit, an explicit salary/compensation
/// label next to a numeric range, or an LPA range.
pub fn is_definitely_salary(text: &str) -> bool {
    if CURRENCY_RE.is_match(text) && DIGIT_RE.is_match(text) {
        return true;
    }
    if EXPLICIT_LABEL_RE.is_match(text) && NUMERIC_RANGE_RE.is_match(text) {
        return true;
    }
    LPA_RANGE_RE.is_match(text)
}

const YEARLY: &str = r"(?:per\s+year|per\s+annum|/year|/yr|a\s+year|annually)";
const HOURLY: &str = r"(?:per\s+hour|/hour|/hr|an\s+hour)";
const MONTHLY: &str = r"(?:per\s+month|monthly|/month|/mo|a\s+month)";

/// High-precision salary phrases, most specific first.
static DESCRIPTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let mut specs = Vec::new();
    for period in [YEARLY, HOURLY, MONTHLY] {
        specs.push(format!(r"\$\s*[\d,]+\s*-\s*\$\s*[\d,]+\s*{}", period));
    }
    for period in [YEARLY, HOURLY, MONTHLY] {
        specs.push(format!(r"\$\s*[\d,]+\s*{}", period));
    }
    for period in [YEARLY, HOURLY, MONTHLY] {
        specs.push(format!(r"[€£¥₹]\s*[\d,]+\s*-\s*[€£¥₹]\s*[\d,]+\s*{}", period));
    }
    specs.extend(
        [
            r"₹\s*[\d,.]+\s*-\s*₹\s*[\d,.]+\s*(?:lakhs|lakh|lpa)",
            r"₹\s*[\d,.]+\s*(?:lakhs|lakh|lpa)",
            r"salary\s*:\s*[$₹€£¥]\s*[\d,]+\s*-\s*[$₹€£¥]\s*[\d,]+",
            r"compensation\s*:\s*[$₹€£¥]\s*[\d,]+\s*-\s*[$₹€£¥]\s*[\d,]+",
            r"salary\s+range\s*:\s*[$₹€£¥]\s*[\d,]+\s*-\s*[$₹€£¥]\s*[\d,]+",
            r"\$\s*[\d,]+k\s*-\s*\$\s*[\d,]+k",
            r"\$\s*[\d,]+k",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    specs
        .iter()
        .map(|s| Regex::new(&format!("(?i){}", s)).unwrap())
        .collect()
});

/// Extracts a short salary phrase from free text, or `None`.
///
/// Patterns are tried in order; the first match shorter than
/// [`MAX_SALARY_PHRASE_CHARS`] characters wins.
pub fn extract_salary_from_description(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    DESCRIPTION_PATTERNS.iter().find_map(|re| {
        re.find(text)
            .map(|m| m.as_str().trim())
            .filter(|s| s.chars().count() < MAX_SALARY_PHRASE_CHARS)
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likely_requires_a_digit() {
        assert!(!is_likely_salary("$ competitive"));
        assert!(!is_likely_salary("Salary negotiable"));
        assert!(!is_likely_salary(""));
    }

    #[test]
    fn likely_accepts_each_signal() {
        assert!(is_likely_salary("$120,000"));
        assert!(is_likely_salary("Pay range 40 to 50"));
        assert!(is_likely_salary("Base wage 18"));
        assert!(is_likely_salary("45 per hour"));
        assert!(is_likely_salary("80k-100k"));
        assert!(is_likely_salary("12 LPA"));
    }

    #[test]
    fn likely_rejects_unrelated_numbers() {
        assert!(!is_likely_salary("1,234 applicants"));
        assert!(!is_likely_salary("Posted 3 days ago"));
    }

    #[test]
    fn definitely_needs_strong_evidence() {
        assert!(is_definitely_salary("€55,000"));
        assert!(is_definitely_salary("Salary 90-120"));
        assert!(is_definitely_salary("Compensation: 80k - 95k"));
        assert!(is_definitely_salary("8.5 - 12 LPA"));
        assert!(!is_definitely_salary("45 per hour"));
        assert!(!is_definitely_salary("80k-100k"));
        assert!(!is_definitely_salary("Salary competitive"));
    }

    #[test]
    fn currency_and_digit_is_always_definite() {
        for sample in ["$1", "₹ 5,00,000", "£30k", "¥4000000 yearly", "about €9"] {
            assert!(is_definitely_salary(sample), "{sample}");
        }
    }

    #[test]
    fn definitely_implies_likely() {
        let samples = [
            "$90,000 - $120,000",
            "Salary 90-120",
            "Compensation: 80k - 95k",
            "8.5 - 12 LPA",
            "₹ 12,00,000",
            "salary: 10 - 20",
            "COMPENSATION 100k-150k",
        ];
        for sample in samples {
            assert!(is_definitely_salary(sample), "{sample}");
            assert!(is_likely_salary(sample), "{sample}");
        }
    }

    #[test]
    fn extracts_labeled_range() {
        let got = extract_salary_from_description("Salary: $90,000 - $120,000").unwrap();
        assert!(got.contains("$90,000"));
        assert!(got.contains("$120,000"));
        assert!(got.chars().count() < MAX_SALARY_PHRASE_CHARS);
    }

    #[test]
    fn prefers_range_with_period() {
        let text = "The base pay is $95,000 - $130,000 per year plus equity. Bonus $5,000 annually.";
        assert_eq!(
            extract_salary_from_description(text).as_deref(),
            Some("$95,000 - $130,000 per year")
        );
    }

    #[test]
    fn extracts_hourly_and_lakh_forms() {
        assert_eq!(
            extract_salary_from_description("Pay: $25 /hr, weekly").as_deref(),
            Some("$25 /hr")
        );
        assert_eq!(
            extract_salary_from_description("CTC ₹ 8 - ₹ 12 lakhs depending on skills").as_deref(),
            Some("₹ 8 - ₹ 12 lakhs")
        );
        assert_eq!(
            extract_salary_from_description("Budget of $120k - $150k").as_deref(),
            Some("$120k - $150k")
        );
    }

    #[test]
    fn no_salary_in_prose() {
        assert_eq!(extract_salary_from_description("We are a great place to work"), None);
        assert_eq!(extract_salary_from_description(""), None);
    }
}
