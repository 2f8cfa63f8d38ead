pub mod file;
pub mod web;

pub use file::FileFetcher;
pub use web::WebDriverFetcher;

use crate::config::{CountryParams, PageEncoding};
use crate::error::{Result, ScrapeError};
use crate::pages::PageKind;
use std::future::Future;
use url::Url;

/// Query string that switches a wishlist to the single-page print layout
const PRINT_QUERY: &str = "_encoding=UTF8&layout=standard-print&disableNav=1&visitor-view=1&items-per-page=1000";

/// Retrieves page source for the extractors
pub trait Fetcher {
    /// Fetch a page and return its source, decoded with `encoding` where the
    /// fetcher deals in raw bytes
    fn fetch(
        &mut self,
        url: &Url,
        encoding: PageEncoding,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Address of a storefront page.
///
/// `target` is the user id for profile and wishlist pages and the free-text
/// query for search pages.
pub fn page_url(kind: PageKind, params: &CountryParams, target: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("http://{}/", params.host())).map_err(ScrapeError::fetch)?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| ScrapeError::Fetch(format!("cannot build a path on {}", params.host())))?;
        segments.clear();
        match kind {
            PageKind::Profile => {
                segments.push("wishlist").push(target);
            }
            PageKind::Wishlist => {
                segments
                    .push("wishlist")
                    .push(target)
                    .push("ref=cm_wl_act_print_o");
            }
            PageKind::Search => {
                segments.push("gp").push("registry").push("search.html");
            }
        }
    }

    match kind {
        PageKind::Profile => {}
        PageKind::Wishlist => url.set_query(Some(PRINT_QUERY)),
        PageKind::Search => {
            url.query_pairs_mut()
                .append_pair("type", "wishlist")
                .append_pair("field-name", target);
        }
    }

    Ok(url)
}
