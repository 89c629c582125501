//! Pure rendering of extracted data into message bodies. No I/O here; the
//! exact output strings are pinned by tests because they are the product
//! surface the subscriber sees every day.

use crate::extract::TrendingItem;

/// The atomic unit handed to the dispatcher. The body is always non-empty:
/// a placeholder sentence stands in for empty results, so the dispatcher is
/// never called with nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub title: String,
    pub body: String,
}

const LINKS_HEADER: &str = "今日份外刊：";
const LINKS_EMPTY: &str = "今日份外刊：未找到链接。";

/// Render the date-link digest body: a header line followed by one numbered
/// line per link, or a fixed "not found" sentence when the scan came up empty.
pub fn render_links(links: &[String]) -> String {
    if links.is_empty() {
        return LINKS_EMPTY.to_string();
    }

    let mut body = format!("{LINKS_HEADER}\n");
    for (i, link) in links.iter().enumerate() {
        if i > 0 {
            body.push('\n');
        }
        body.push_str(&format!("{}. {}", i + 1, link));
    }
    body
}

/// Render one trending block. Present items get a markdown header and a
/// single bulleted line; absent items get the same header over a fixed
/// "not found" sentence.
pub fn render_trending_item(item: Option<&TrendingItem>, source: &str) -> String {
    match item {
        Some(item) => format!("# {source} Trending\n\n- {}: {}\n", item.title, item.link),
        None => format!("# {source} Trending\n\nNo trending items found."),
    }
}
