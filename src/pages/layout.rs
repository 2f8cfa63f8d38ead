//! Selectors for the storefront's page layouts.
//!
//! Every structural path the extractors rely on lives here. The selectors
//! target one known layout and break when the storefront changes it.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Profile landing page
pub mod profile {
    use super::*;

    /// Owner display name
    pub static NAME: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#profile-name-Field").unwrap());

    /// Profile picture
    pub static PHOTO: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#profile > div > img").unwrap());

    /// One block per public wishlist besides the default one
    pub static LIST_BLOCK: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("#regListpublicBlock > div[id^='regListsList']").unwrap()
    });

    /// Prefix of a list block's id; the rest is the wishlist code
    pub const LIST_ID_PREFIX: &str = "regListsList";

    /// List name, inside a list block
    pub static LIST_NAME: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("h3 > a").unwrap());

    /// Item count, inside a list block
    pub static LIST_SIZE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div > span").unwrap());
}

/// Wishlist search results page
pub mod search {
    use super::*;

    /// One link per matching wishlist
    pub static RESULT_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td > span > a").unwrap());
}

/// Printable wishlist page
pub mod print {
    use super::*;

    pub static ITEM: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#itemsTable tbody.itemWrapper").unwrap());

    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td div > strong").unwrap());

    pub static AUTHOR: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td div > span").unwrap());

    pub static PRICE_CELL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td.pPrice").unwrap());

    pub static STRONG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("strong").unwrap());

    /// Second bold run of a non-price cell: the host of a universal item
    pub static VIA: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("td:not(.pPrice) > strong:nth-of-type(2)").unwrap()
    });

    pub static COVER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.pImage > img").unwrap());

    /// Attribute on the item container holding the item identifier
    pub const ITEM_ID_ATTR: &str = "name";
}

/// Raw fields of one catalog item, read from its container node.
///
/// Values are returned as they appear on the page; cleanup happens in the
/// extractors.
pub trait ItemBlock {
    fn title(&self) -> Option<String>;

    /// Byline text, `None` when the item has no byline element
    fn author(&self) -> Option<String>;

    /// Price cell text, `Some("")` for an empty cell
    fn price_text(&self) -> Option<String>;

    fn source_site(&self) -> Option<String>;

    fn cover_src(&self) -> Option<String>;

    /// Dot-separated item identifier carrying the catalog code
    fn item_id(&self) -> Option<String>;
}

/// A wishlist page layout that splits a document into item blocks
pub trait WishlistLayout {
    type Block<'a>: ItemBlock;

    fn item_blocks<'a>(&self, doc: &'a Html) -> Vec<Self::Block<'a>>;
}

/// The `standard-print` wishlist layout
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintLayout;

impl WishlistLayout for PrintLayout {
    type Block<'a> = PrintItem<'a>;

    fn item_blocks<'a>(&self, doc: &'a Html) -> Vec<PrintItem<'a>> {
        doc.select(&print::ITEM)
            .map(|element| PrintItem { element })
            .collect()
    }
}

/// Item container (`tbody.itemWrapper`) of the print layout
#[derive(Debug, Clone, Copy)]
pub struct PrintItem<'a> {
    element: ElementRef<'a>,
}

impl PrintItem<'_> {
    fn first_text(&self, selector: &Selector) -> Option<String> {
        self.element.select(selector).next().map(text_of)
    }
}

impl ItemBlock for PrintItem<'_> {
    fn title(&self) -> Option<String> {
        self.first_text(&print::TITLE)
    }

    fn author(&self) -> Option<String> {
        self.first_text(&print::AUTHOR)
    }

    fn price_text(&self) -> Option<String> {
        let cell = self.element.select(&print::PRICE_CELL).next()?;

        // Promotional items show list price and savings before the price
        let strongs: Vec<ElementRef> = cell.select(&print::STRONG).collect();
        let text = match strongs.len() {
            0 => text_of(cell),
            1 | 2 => text_of(strongs[0]),
            _ => text_of(strongs[2]),
        };
        Some(text)
    }

    fn source_site(&self) -> Option<String> {
        self.first_text(&print::VIA)
    }

    fn cover_src(&self) -> Option<String> {
        self.element
            .select(&print::COVER)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string)
    }

    fn item_id(&self) -> Option<String> {
        self.element
            .value()
            .attr(print::ITEM_ID_ATTR)
            .map(str::to_string)
    }
}

/// All text nodes of an element joined with spaces
pub fn text_of(element: ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}
