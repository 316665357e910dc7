// src/extract/dom.rs
// =============================================================================
// A stricter link extractor built on the `scraper` crate.
//
// scraper parses the page into a real DOM with html5ever (the same parser
// engine Firefox's Servo uses), so it copes with things the anchor scanner
// doesn't:
// - markup inside the link text (<a href="x/"><b>x</b>/</a>)
// - unquoted attributes (<a href=x/>)
// - HTML entities, which are decoded in both href and text
//
// It applies exactly the same filtering rules through LinkFilter, so
// switching parsers never changes which kinds of links are kept.
//
// Anchors with no text are skipped before filtering. Apache's IconsAreLinks
// wraps the folder icon in its own <a href="logs/"> ahead of the named link;
// letting that one through would claim the href with an empty name.
// =============================================================================

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

use super::{DirLink, LinkExtractor, LinkFilter};

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("link selector is valid"));

/// Extracts listing links from a fully parsed HTML document
#[derive(Debug, Clone, Copy, Default)]
pub struct DomExtractor;

impl DomExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LinkExtractor for DomExtractor {
    fn extract(&self, page: &str, page_url: &Url) -> Vec<DirLink> {
        let document = Html::parse_document(page);

        let mut filter = LinkFilter::new(page_url);
        for element in document.select(&LINK_SELECTOR) {
            if let Some(href) = element.value().attr("href") {
                let text: String = element.text().collect();
                if text.trim().is_empty() {
                    continue;
                }
                filter.push(href, &text);
            }
        }
        filter.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<DirLink> {
        let base = Url::parse("https://mirror.local/archive/").unwrap();
        DomExtractor::new().extract(html, &base)
    }

    #[test]
    fn test_same_filtering_as_anchor_scanner() {
        let html = r#"
            <a href="../">Parent</a>
            <a href="?C=N">Name</a>
            <a href="/abs/">Abs</a>
            <a href="http://other.example/">Other</a>
            <a href="child/">Child</a>
            <a href="child/">Child again</a>
        "#;
        let links = extract(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "Child");
        assert_eq!(links[0].url.as_str(), "https://mirror.local/archive/child/");
    }

    #[test]
    fn test_nested_markup_in_text() {
        let links = extract(r#"<a href="logs/"><img src="folder.gif"> <b>logs</b>/</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "logs");
        assert!(links[0].is_dir);
    }

    #[test]
    fn test_entities_are_decoded() {
        let links = extract(r#"<a href="a&amp;b.txt">a&amp;b.txt</a>"#);
        assert_eq!(links[0].name, "a&b.txt");
        assert_eq!(links[0].url.as_str(), "https://mirror.local/archive/a&b.txt");
    }

    #[test]
    fn test_unquoted_href() {
        let links = extract("<a href=raw.log>raw.log</a>");
        assert_eq!(links.len(), 1);
        assert!(!links[0].is_dir);
    }

    #[test]
    fn test_icon_links_do_not_steal_the_name() {
        let html = r#"
<table>
<tr><td valign="top"><a href="logs/"><img src="/icons/folder.gif" alt="[DIR]"></a></td><td><a href="logs/">logs/</a></td><td>2024-01-01 10:00</td></tr>
<tr><td valign="top"><a href="run.txt"><img src="/icons/text.gif" alt="[TXT]"></a></td><td><a href="run.txt">run.txt</a></td><td>2024-01-01 10:01</td></tr>
</table>"#;
        let base = Url::parse("https://mirror.local/archive/").unwrap();
        let dom: Vec<_> = extract(html).into_iter().map(|l| (l.name, l.is_dir)).collect();
        let anchor: Vec<_> = crate::extract::AnchorScanner::new()
            .extract(html, &base)
            .into_iter()
            .map(|l| (l.name, l.is_dir))
            .collect();

        assert_eq!(dom, vec![("logs".to_string(), true), ("run.txt".to_string(), false)]);
        assert_eq!(dom, anchor);
    }
}
