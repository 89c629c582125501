use scraper::{Html, Selector};
use url::Url;

/// At most this many links per run; the digest is meant to be skimmable.
pub const MAX_LINKS: usize = 5;

/// Scan markup for anchors whose resolved URL contains `date_token`
/// (zero-padded `MM/DD`, matching the publisher's URL convention).
///
/// Matching is a plain substring test, not a date-aware comparison, so a URL
/// that happens to contain the digits elsewhere in its path qualifies too.
/// Results keep document order, are not deduplicated, and are capped at
/// [`MAX_LINKS`]. An empty result is a normal outcome: it means the page no
/// longer carries today's links, not that anything failed.
pub fn date_links(html: &str, base: &Url, date_token: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("static selector");

    let mut found = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let resolved = if href.starts_with("http") {
            href.to_string()
        } else {
            match base.join(href) {
                Ok(url) => url.to_string(),
                // Unresolvable hrefs (e.g. "javascript:void(0)") are skipped
                Err(_) => continue,
            }
        };

        if resolved.contains(date_token) {
            found.push(resolved);
            if found.len() == MAX_LINKS {
                break;
            }
        }
    }

    found
}

/// Today's date token in the publisher's `MM/DD` URL convention.
pub fn today_token() -> String {
    chrono::Local::now().format("%m/%d").to_string()
}
