// ABOUTME: Text helpers for reading element content the way a page reader would see it.
// ABOUTME: Skips script/style payloads and normalizes whitespace runs.

use scraper::node::Node;
use scraper::ElementRef;

/// Elements whose text never shows up on the rendered page.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Normalizes whitespace in a string by collapsing runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the whitespace-normalized visible text of an element.
///
/// Text nodes are joined with a space so adjacent inline blocks such as
/// `<li>Full-time</li><li>Remote</li>` stay separate words.
pub fn visible_text(el: &ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    collect_text(el, &mut parts);
    normalize_whitespace(&parts.join(" "))
}

fn collect_text<'a>(el: &ElementRef<'a>, out: &mut Vec<&'a str>) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push(&**text),
            Node::Element(element) => {
                if INVISIBLE_TAGS.contains(&element.name()) {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(&child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// Raw text of an element, including script bodies. Used for JSON-LD payloads.
pub fn raw_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Visible text of the element's parent, or empty when it has none.
pub fn parent_text(el: &ElementRef<'_>) -> String {
    el.parent()
        .and_then(ElementRef::wrap)
        .map(|parent| visible_text(&parent))
        .unwrap_or_default()
}

/// The next sibling that is an element, skipping text and comments.
pub fn next_element_sibling<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Title-cases an enum-style token: "FULL_TIME" -> "Full-Time".
///
/// Underscores become hyphens and every word start is upper-cased.
pub fn title_case_token(raw: &str) -> String {
    let lowered = raw.replace('_', "-").to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut at_word_start = true;
    for c in lowered.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = !c.is_alphanumeric();
        }
    }
    out
}

/// Upper-cases only the first character: "full-time" -> "Full-time".
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
