pub mod layout;
pub mod profile;
pub mod search;
pub mod text;
pub mod wishlist;

#[cfg(test)]
mod tests;

pub use profile::ProfilePage;
pub use search::SearchPage;
pub use wishlist::WishlistPage;

use crate::config::CountryParams;
use scraper::Html;

/// The storefront pages this crate knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A user's wishlist landing page
    Profile,
    /// The printable rendering of a wishlist
    Wishlist,
    /// Wishlist search results
    Search,
}

impl PageKind {
    /// Short name used in log messages
    pub fn name(&self) -> &'static str {
        match self {
            PageKind::Profile => "profile",
            PageKind::Wishlist => "wishlist",
            PageKind::Search => "search",
        }
    }
}

/// A parsed page of any supported kind
pub enum Page {
    Profile(ProfilePage),
    Wishlist(WishlistPage),
    Search(SearchPage),
}

impl Page {
    /// Parses page source as the given kind of page.
    ///
    /// HTML parsing is lenient: malformed markup still yields a document,
    /// and missing fields surface when they are read.
    pub fn parse(kind: PageKind, source: &str, params: &CountryParams) -> Self {
        let doc = Html::parse_document(source);
        if !doc.errors.is_empty() {
            ::log::debug!(
                "Parsed {} page with {} markup errors",
                kind.name(),
                doc.errors.len()
            );
        }

        match kind {
            PageKind::Profile => Page::Profile(ProfilePage::from_document(doc)),
            PageKind::Wishlist => Page::Wishlist(WishlistPage::with_layout(
                doc,
                params,
                layout::PrintLayout,
            )),
            PageKind::Search => Page::Search(SearchPage::from_document(doc)),
        }
    }

    pub fn kind(&self) -> PageKind {
        match self {
            Page::Profile(_) => PageKind::Profile,
            Page::Wishlist(_) => PageKind::Wishlist,
            Page::Search(_) => PageKind::Search,
        }
    }
}
