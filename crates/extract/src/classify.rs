// ABOUTME: Decides whether a page is a job posting from its URL, title and body text.
// ABOUTME: A job-like URL is enough on its own; otherwise both content and title must look job-related.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use once_cell::sync::Lazy;

const URL_KEYWORDS: &[&str] = &[
    "/job/",
    "/jobs/",
    "/career",
    "/careers",
    "/apply",
    "/application",
    "position",
    "vacancy",
    "opening",
    "/posting/",
    "employment",
];

const CONTENT_KEYWORDS: &[&str] = &[
    "apply now",
    "job description",
    "qualifications",
    "responsibilities",
    "requirements",
    "submit application",
    "about the role",
    "about this role",
    "what you'll do",
    "who you are",
    "experience required",
    "post a resume",
    "upload resume",
    "education requirements",
];

const TITLE_KEYWORDS: &[&str] = &[
    "job",
    "career",
    "position",
    "opening",
    "opportunity",
    "employment",
    "vacancy",
    "hiring",
    "recruitment",
];

fn matcher(keywords: &[&str]) -> AhoCorasick {
    AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostFirst)
        .build(keywords)
        .unwrap()
}

static URL_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| matcher(URL_KEYWORDS));
static CONTENT_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| matcher(CONTENT_KEYWORDS));
static TITLE_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| matcher(TITLE_KEYWORDS));

/// Returns true when the page looks like a job posting.
///
/// Matching ignores case. The result is `url_match || (content_match && title_match)`.
pub fn is_job_page(url: &str, title: &str, body_text: &str) -> bool {
    if URL_MATCHER.is_match(url) {
        return true;
    }
    CONTENT_MATCHER.is_match(body_text) && TITLE_MATCHER.is_match(title)
}
