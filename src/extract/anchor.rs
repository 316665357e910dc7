// src/extract/anchor.rs
// =============================================================================
// The default link extractor: a single pass over the page picking out
// <a ...>text</a> elements.
//
// Directory listings are machine-generated and very regular, e.g. Apache:
//
//   <tr><td><a href="build-42/">build-42/</a></td><td>2024-01-01 10:00</td></tr>
//
// or nginx:
//
//   <a href="must-gather.tar.gz">must-gather.tar.gz</a>   01-Jan-2024 10:00  1M
//
// so we don't need a DOM. Each match is turned into a tagged element (tag
// name, attribute map, inner text) and handed to the shared LinkFilter.
//
// Limits: the inner text must not contain markup (an <img> inside the
// anchor makes that anchor invisible to this scanner). Malformed pages just
// produce fewer links; use the DOM extractor if that matters.
// =============================================================================

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::{DirLink, LinkExtractor, LinkFilter};

// <a attrs>text</a>, tag name case-insensitive, text free of markup
static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<(a)\s+([^>]*)>([^<]*)</a\s*>"#).expect("anchor pattern is valid")
});

// name="value" or name='value'
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("attribute pattern is valid")
});

/// One anchor element as seen by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorTag {
    pub tag: String,
    /// Attribute names are lowercased; the first occurrence of a name wins
    pub attrs: HashMap<String, String>,
    pub text: String,
}

impl AnchorTag {
    pub fn href(&self) -> Option<&str> {
        self.attrs.get("href").map(String::as_str)
    }
}

/// Extracts listing links with a tagged scan over anchor elements
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorScanner;

impl AnchorScanner {
    pub fn new() -> Self {
        Self
    }

    /// Every well-formed anchor in the page, in document order
    pub fn scan(page: &str) -> Vec<AnchorTag> {
        ANCHOR_RE
            .captures_iter(page)
            .map(|caps| AnchorTag {
                tag: caps[1].to_ascii_lowercase(),
                attrs: parse_attrs(&caps[2]),
                text: caps[3].to_string(),
            })
            .collect()
    }
}

impl LinkExtractor for AnchorScanner {
    fn extract(&self, page: &str, page_url: &Url) -> Vec<DirLink> {
        let mut filter = LinkFilter::new(page_url);
        for anchor in Self::scan(page) {
            // <a name="..."> bookmarks carry no href
            if let Some(href) = anchor.href() {
                filter.push(href, &anchor.text);
            }
        }
        filter.finish()
    }
}

fn parse_attrs(raw: &str) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    for caps in ATTR_RE.captures_iter(raw) {
        let name = caps[1].to_ascii_lowercase();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        attrs.entry(name).or_insert(value);
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<DirLink> {
        let base = Url::parse("http://mirror.local/logs/run-1/").unwrap();
        AnchorScanner::new().extract(html, &base)
    }

    #[test]
    fn test_only_children_survive_filtering() {
        let html = r#"
            <a href="../">Parent</a>
            <a href="?C=N">Name</a>
            <a href="/abs/">Abs</a>
            <a href="http://other.example/">Other</a>
            <a href="child/">Child</a>
        "#;
        let links = extract(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "Child");
    }

    #[test]
    fn test_duplicate_anchor_yields_one_link() {
        let html = r#"<a href="x/">X</a><a href="x/">X</a>"#;
        let links = extract(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "X");
    }

    #[test]
    fn test_apache_listing() {
        let html = r#"
<html><head><title>Index of /logs/run-1</title></head><body>
<h1>Index of /logs/run-1</h1>
<table>
<tr><th><a href="?C=N;O=D">Name</a></th><th><a href="?C=M;O=A">Last modified</a></th></tr>
<tr><td><a href="/logs/">Parent Directory</a></td></tr>
<tr><td><a href="must-gather/">must-gather/</a></td><td>2024-01-01 10:00</td></tr>
<tr><td><a href="junit.xml">junit.xml</a></td><td>2024-01-01 10:01</td></tr>
</table></body></html>
"#;
        let links = extract(html);
        assert_eq!(links.len(), 2);

        assert_eq!(links[0].name, "must-gather");
        assert!(links[0].is_dir);
        assert_eq!(links[0].url.as_str(), "http://mirror.local/logs/run-1/must-gather/");

        assert_eq!(links[1].name, "junit.xml");
        assert!(!links[1].is_dir);
        assert_eq!(links[1].url.as_str(), "http://mirror.local/logs/run-1/junit.xml");
    }

    #[test]
    fn test_nginx_listing() {
        let html = "<html><head><title>Index of /logs/run-1/</title></head>\n\
            <body><h1>Index of /logs/run-1/</h1><hr><pre><a href=\"../\">../</a>\n\
            <a href=\"cluster/\">cluster/</a>                 01-Jan-2024 10:00       -\n\
            <a href=\"build.log\">build.log</a>               01-Jan-2024 10:00    1234\n\
            </pre><hr></body></html>";
        let links = extract(html);
        let names: Vec<_> = links.iter().map(|l| (l.name.as_str(), l.is_dir)).collect();
        assert_eq!(names, vec![("cluster", true), ("build.log", false)]);
    }

    #[test]
    fn test_text_wins_over_href() {
        let html = r#"<a href="really-long-directory-name/">really-long-di..&gt;</a>"#;
        let links = extract(html);
        assert_eq!(links[0].name, "really-long-di..&gt;");
        assert_eq!(
            links[0].url.as_str(),
            "http://mirror.local/logs/run-1/really-long-directory-name/"
        );
    }

    #[test]
    fn test_name_is_trimmed() {
        let links = extract("<a href=\"dir/\">  dir/  </a>");
        assert_eq!(links[0].name, "dir");
    }

    #[test]
    fn test_other_attributes_and_quotes() {
        let html = r#"<A class="file" HREF='data.json' title="x">data.json</A>"#;
        let links = extract(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "data.json");
    }

    #[test]
    fn test_anchor_without_href_is_ignored() {
        assert!(extract(r#"<a name="top">Top</a>"#).is_empty());
    }

    #[test]
    fn test_malformed_html_under_parses() {
        let html = r#"<a href="ok/">ok</a><a href="broken/">no closing tag <a href="img/"><img src="i.png"></a>"#;
        let links = extract(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "ok");
    }

    #[test]
    fn test_scan_exposes_attribute_map() {
        let tags = AnchorScanner::scan(r#"<a href="a/" href="b/" data-x='1'>A</a>"#);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].tag, "a");
        assert_eq!(tags[0].href(), Some("a/"));
        assert_eq!(tags[0].attrs.get("data-x").map(String::as_str), Some("1"));
        assert_eq!(tags[0].text, "A");
    }
}
