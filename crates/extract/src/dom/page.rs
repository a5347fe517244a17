// ABOUTME: Page wraps a parsed HTML document with its URL, title and visible body text.
// ABOUTME: It is the read-only DOM interface every extractor queries through.

use scraper::{ElementRef, Html};
use url::Url;

use crate::dom::compiled::get_or_compile;
use crate::dom::text::visible_text;
use crate::error::ExtractError;

/// A parsed page as seen by the extractors.
///
/// Extractors only ever read from a `Page`; nothing here mutates the document.
pub struct Page {
    url: String,
    parsed_url: Option<Url>,
    html: Html,
    title: String,
    body_text: String,
}

impl Page {
    /// Parses `html` as the document found at `url`.
    ///
    /// `url` does not have to be valid: an unparseable address simply has no
    /// hostname and routes to the generic extractor.
    pub fn parse(html: &str, url: &str) -> Self {
        let html = Html::parse_document(html);
        let title = select_in_doc(&html, "title")
            .ok()
            .and_then(|els| els.first().map(visible_text))
            .unwrap_or_default();
        let body_text = select_in_doc(&html, "body")
            .ok()
            .and_then(|els| els.first().map(visible_text))
            .unwrap_or_default();

        Self {
            url: url.to_string(),
            parsed_url: Url::parse(url).ok(),
            html,
            title,
            body_text,
        }
    }

    /// The page address exactly as given.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Lower-cased hostname, if the URL parsed and has one.
    pub fn host(&self) -> Option<String> {
        self.parsed_url
            .as_ref()
            .and_then(|u| u.host_str())
            .map(|h| h.to_lowercase())
    }

    /// Text of the `<title>` element.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Visible text of `<body>`, whitespace-normalized.
    pub fn body_text(&self) -> &str {
        &self.body_text
    }

    /// The underlying parsed document.
    pub fn document(&self) -> &Html {
        &self.html
    }

    /// Resolves a possibly relative `href` against the page URL.
    pub fn resolve(&self, href: &str) -> String {
        match &self.parsed_url {
            Some(base) => base
                .join(href)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| href.to_string()),
            None => href.to_string(),
        }
    }

    /// All elements matching `css`, in document order.
    pub fn select(&self, css: &str) -> Result<Vec<ElementRef<'_>>, ExtractError> {
        select_in_doc(&self.html, css)
    }

    /// Visible text of every element matched by `selectors`, evaluated lazily.
    ///
    /// Selectors are tried left to right and a selector is only compiled and
    /// queried once the previous one's matches have all been consumed, so
    /// callers that stop early never touch later selectors.
    pub fn texts<'p>(
        &'p self,
        selectors: &'p [&'p str],
    ) -> impl Iterator<Item = Result<String, ExtractError>> + 'p {
        selectors.iter().flat_map(move |css| {
            let batch: Box<dyn Iterator<Item = Result<String, ExtractError>> + 'p> =
                match self.select(css) {
                    Ok(els) => Box::new(els.into_iter().map(|el| Ok(visible_text(&el)))),
                    Err(e) => Box::new(std::iter::once(Err(e))),
                };
            batch
        })
    }

    /// First non-empty text among `selectors` that `accept` agrees with.
    ///
    /// Empty matches are skipped rather than ending the search.
    pub fn first_text<F>(&self, selectors: &[&str], accept: F) -> Result<Option<String>, ExtractError>
    where
        F: Fn(&str) -> bool,
    {
        for text in self.texts(selectors) {
            let text = text?;
            if !text.is_empty() && accept(&text) {
                return Ok(Some(text));
            }
        }
        Ok(None)
    }

    /// First non-empty text among `selectors`, with no extra filter.
    pub fn first_nonempty(&self, selectors: &[&str]) -> Result<Option<String>, ExtractError> {
        self.first_text(selectors, |_| true)
    }

    /// First non-empty value of `attr` on elements matching `css`.
    pub fn first_attr(&self, css: &str, attr: &str) -> Result<Option<String>, ExtractError> {
        Ok(self
            .select(css)?
            .into_iter()
            .filter_map(|el| el.value().attr(attr).map(str::trim))
            .find(|v| !v.is_empty())
            .map(str::to_string))
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("url", &self.url)
            .field("title", &self.title)
            .field("body_len", &self.body_text.len())
            .finish()
    }
}

fn select_in_doc<'a>(html: &'a Html, css: &str) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    let sel = get_or_compile(css)?;
    Ok(html.select(&sel).collect())
}

/// All descendants of `el` matching `css`.
pub fn select_within<'a>(el: &ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    let sel = get_or_compile(css)?;
    Ok(el.select(&sel).collect())
}

/// Visible text of the first descendant of `el` matching `css`, if non-empty.
pub fn text_within(el: &ElementRef<'_>, css: &str) -> Result<Option<String>, ExtractError> {
    Ok(select_within(el, css)?
        .first()
        .map(visible_text)
        .filter(|t| !t.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head><title>Backend Engineer - Careers</title></head>
        <body>
            <h1 class="empty">   </h1>
            <h1 class="job">  Backend   Engineer </h1>
            <div class="empty-box"></div>
            <p class="company">Acme Corp</p>
            <a class="site" href="/about">About</a>
            <script>window.__data = {"salary": "$1"};</script>
        </body>
        </html>
    "#;

    fn page() -> Page {
        Page::parse(SAMPLE_HTML, "https://Jobs.Example.com/job/42?ref=x")
    }

    #[test]
    fn title_host_and_body() {
        let page = page();
        assert_eq!(page.title(), "Backend Engineer - Careers");
        assert_eq!(page.host().as_deref(), Some("jobs.example.com"));
        assert!(page.body_text().contains("Acme Corp"));
        assert!(!page.body_text().contains("__data"));
    }

    #[test]
    fn unparseable_url_has_no_host() {
        let page = Page::parse("<p>x</p>", "not a url");
        assert!(page.host().is_none());
        assert_eq!(page.url(), "not a url");
        assert_eq!(page.resolve("/a"), "/a");
    }

    #[test]
    fn first_text_skips_empty_matches_within_selector() {
        let page = page();
        let text = page.first_nonempty(&["h1"]).unwrap();
        assert_eq!(text.as_deref(), Some("Backend Engineer"));
    }

    #[test]
    fn first_text_skips_empty_first_selector() {
        let page = page();
        let text = page.first_nonempty(&["div.empty-box", "p.company"]).unwrap();
        assert_eq!(text.as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn first_text_applies_filter() {
        let page = page();
        let text = page
            .first_text(&["h1", "p.company"], |t| t.contains("Corp"))
            .unwrap();
        assert_eq!(text.as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn first_text_stops_before_invalid_later_selector() {
        let page = page();
        let text = page.first_nonempty(&["p.company", "[[[broken"]).unwrap();
        assert_eq!(text.as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn first_text_surfaces_invalid_selector_when_reached() {
        let page = page();
        let err = page.first_nonempty(&["p.missing", "[[[broken"]).unwrap_err();
        assert!(err.is_selector());
    }

    #[test]
    fn resolve_and_attr() {
        let page = page();
        let href = page.first_attr("a.site", "href").unwrap().unwrap();
        assert_eq!(page.resolve(&href), "https://jobs.example.com/about");
    }
}
