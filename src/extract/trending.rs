use scraper::{Html, Selector};

/// The most prominent entry on a source page at fetch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingItem {
    pub title: String,
    pub link: String,
}

/// Pull the first second-level heading out of the markup.
///
/// First match in document order wins; there is no ranking beyond position.
/// The heading's trimmed text becomes the title, and if the heading wraps an
/// anchor, that anchor's href becomes the link (empty string otherwise).
/// Returns `None` when the page has no `h2` at all — absence is a first-class
/// outcome here, not an error.
pub fn first_heading(html: &str) -> Option<TrendingItem> {
    let document = Html::parse_document(html);
    let h2_selector = Selector::parse("h2").expect("static selector");
    let anchor_selector = Selector::parse("a[href]").expect("static selector");

    let heading = document.select(&h2_selector).next()?;

    let title = heading.text().collect::<String>().trim().to_string();
    let link = heading
        .select(&anchor_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .unwrap_or("")
        .to_string();

    Some(TrendingItem { title, link })
}

/// The static trending source: a fixed pointer, no scrape step, never fails.
pub fn static_item(source_name: &str, url: &str) -> TrendingItem {
    TrendingItem {
        title: format!("{source_name} Trending"),
        link: url.to_string(),
    }
}
