use crate::pages::layout::{self, search};
use crate::pages::text;
use crate::results::SearchHit;
use scraper::Html;
use url::Url;

/// Code some non-English storefronts return in place of "no results"
pub const NO_RESULTS_CODE: &str = "tg";

/// Result page of a wishlist search by name or e-mail
pub struct SearchPage {
    doc: Html,
}

impl SearchPage {
    /// Parses the page source
    pub fn parse(html: &str) -> Self {
        Self::from_document(Html::parse_document(html))
    }

    pub fn from_document(doc: Html) -> Self {
        Self { doc }
    }

    /// Matching wishlists as `(display name, wishlist code)` pairs.
    ///
    /// When the no-results code shows up anywhere in the list, the whole list
    /// is dropped, including any genuine matches next to it.
    pub fn results(&self) -> Vec<SearchHit> {
        let hits: Vec<SearchHit> = self
            .doc
            .select(&search::RESULT_LINK)
            .filter_map(|link| {
                let href = link.value().attr("href")?;
                let Some(code) = wishlist_code(href) else {
                    ::log::debug!("Search result link without a wishlist code: {}", href);
                    return None;
                };
                let display_name = text::clean_text(&layout::text_of(link));
                Some(SearchHit::new(display_name, code))
            })
            .collect();

        if hits.iter().any(|hit| hit.code == NO_RESULTS_CODE) {
            ::log::warn!(
                "Search results contain the no-results code, discarding all {} hits",
                hits.len()
            );
            return Vec::new();
        }

        ::log::debug!("Search returned {} wishlists", hits.len());
        hits
    }
}

/// Second path segment of a result link: `/wishlist/<code>/ref=...`
fn wishlist_code(href: &str) -> Option<String> {
    let base = Url::parse("http://localhost/").ok()?;
    let url = base.join(href.trim()).ok()?;
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .nth(1)
        .map(str::to_string)
}
