use crate::config::{CountryParams, CurrencyContext};
use crate::error::{Result, ScrapeError};
use crate::pages::layout::{ItemBlock, PrintLayout, WishlistLayout};
use crate::pages::text;
use crate::results::{Diagnostic, Expense, Price, WishlistItem, WishlistSummary};
use scraper::Html;
use std::collections::BTreeSet;

/// The printable rendering of one wishlist
pub struct WishlistPage<L: WishlistLayout = PrintLayout> {
    doc: Html,
    host: String,
    currency: CurrencyContext,
    layout: L,
}

impl WishlistPage<PrintLayout> {
    /// Parses the page source using the print layout
    pub fn parse(html: &str, params: &CountryParams) -> Self {
        Self::with_layout(Html::parse_document(html), params, PrintLayout)
    }
}

impl<L: WishlistLayout> WishlistPage<L> {
    /// Wraps a parsed document read with the given layout
    pub fn with_layout(doc: Html, params: &CountryParams, layout: L) -> Self {
        Self {
            doc,
            host: params.host(),
            currency: params.currency_context(),
            layout,
        }
    }

    /// One record per catalog item, in page order
    pub fn items(&self) -> Vec<WishlistItem> {
        self.extract().0
    }

    /// Problems found while reading the items
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.extract().1
    }

    pub fn titles(&self) -> Vec<String> {
        self.items().into_iter().map(|item| item.title).collect()
    }

    /// Bylines, with an empty string for items without one
    pub fn authors(&self) -> Vec<String> {
        self.items().into_iter().map(|item| item.author).collect()
    }

    /// Normalized price tokens.
    ///
    /// Unavailable items give an empty string and idea entries their marker
    /// text. Offers ranges are left out, so this sequence can be shorter
    /// than [`WishlistPage::titles`]; see [`WishlistPage::check_alignment`].
    pub fn prices(&self) -> Vec<String> {
        self.items()
            .iter()
            .filter_map(|item| item.price.as_token())
            .collect()
    }

    /// Hosts universal items were added from, deduplicated and sorted
    pub fn source_sites(&self) -> Vec<String> {
        self.items()
            .into_iter()
            .filter_map(|item| item.source_site)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Full-size cover and product pictures
    pub fn cover_urls(&self) -> Vec<String> {
        self.items()
            .into_iter()
            .filter_map(|item| item.cover_url)
            .collect()
    }

    /// Product page links, with an empty string for items without a catalog code
    pub fn item_detail_urls(&self) -> Vec<String> {
        self.items().into_iter().map(|item| item.detail_url).collect()
    }

    /// Titles of the non-purchasable reminder entries
    pub fn idea_titles(&self) -> Vec<String> {
        self.items()
            .into_iter()
            .filter(|item| item.price.is_idea())
            .map(|item| item.title)
            .collect()
    }

    /// Sum of all purchasable prices
    pub fn total_expense(&self) -> Expense {
        sum_prices(&self.prices())
    }

    /// Checks that the flat title, author and price sequences line up
    pub fn check_alignment(&self) -> Result<()> {
        let titles = self.titles().len();
        let authors = self.authors().len();
        let prices = self.prices().len();

        if titles == authors && authors == prices {
            Ok(())
        } else {
            ::log::warn!(
                "Wishlist sequences disagree: {} titles, {} authors, {} prices",
                titles,
                authors,
                prices
            );
            Err(ScrapeError::MisalignedSequences {
                titles,
                authors,
                prices,
            })
        }
    }

    /// Items, site list, idea entries and total in one pass
    pub fn summary(&self) -> WishlistSummary {
        let (items, mut diagnostics) = self.extract();

        let source_sites = items
            .iter()
            .filter_map(|item| item.source_site.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let idea_titles = items
            .iter()
            .filter(|item| item.price.is_idea())
            .map(|item| item.title.clone())
            .collect();
        let prices: Vec<String> = items
            .iter()
            .filter_map(|item| item.price.as_token())
            .collect();
        let total = sum_prices(&prices);

        for (index, item) in items.iter().enumerate() {
            if let Price::Range(text) = &item.price {
                diagnostics.push(Diagnostic::new(
                    index,
                    format!("price range {:?} left out of the total", text),
                ));
            }
        }

        WishlistSummary {
            items,
            source_sites,
            idea_titles,
            total,
            diagnostics,
        }
    }

    /// Reads every item block in a single pass
    fn extract(&self) -> (Vec<WishlistItem>, Vec<Diagnostic>) {
        let blocks = self.layout.item_blocks(&self.doc);
        let mut items = Vec::with_capacity(blocks.len());
        let mut diagnostics = Vec::new();

        for (index, block) in blocks.iter().enumerate() {
            match self.read_item(block) {
                Some(item) => items.push(item),
                None => {
                    ::log::warn!("Skipping wishlist item {} without a title", index);
                    diagnostics.push(Diagnostic::new(index, "item has no title"));
                }
            }
        }

        ::log::debug!(
            "Read {} of {} wishlist item blocks",
            items.len(),
            blocks.len()
        );
        (items, diagnostics)
    }

    fn read_item(&self, block: &impl ItemBlock) -> Option<WishlistItem> {
        let title = block
            .title()
            .map(|raw| text::clean_text(&raw))
            .filter(|title| !title.is_empty())?;

        let author = block
            .author()
            .map(|raw| text::clean_author(&raw))
            .unwrap_or_default();

        let price = text::classify_price(block.price_text().as_deref(), &self.currency);

        let source_site = block
            .source_site()
            .map(|raw| text::clean_hostname(&raw))
            .filter(|host| !host.is_empty());

        let cover_url = block
            .cover_src()
            .map(|src| src.trim().to_string())
            .filter(|src| !src.is_empty())
            .map(|src| text::strip_size_segment(&src));

        let detail_url = block
            .item_id()
            .as_deref()
            .and_then(text::catalog_code)
            .map(|code| format!("https://{}/dp/{}", self.host, code))
            .unwrap_or_default();

        Some(WishlistItem {
            title,
            author,
            price,
            source_site,
            cover_url,
            detail_url,
        })
    }
}

/// Sums price tokens, skipping empty and idea entries.
///
/// Tokens with more than one `.` are collapsed first (`1.234.56` counts as
/// `134.56`). Tokens that still do not parse are reported in
/// [`Expense::skipped`] instead of failing the whole sum.
pub fn sum_prices<S: AsRef<str>>(prices: &[S]) -> Expense {
    let mut total = 0.0;
    let mut skipped = Vec::new();

    for (index, token) in prices.iter().enumerate() {
        let token = token.as_ref().trim();
        if token.is_empty() || token.contains(text::IDEA_MARKER) {
            continue;
        }
        match text::parse_amount(token) {
            Ok(amount) => total += amount,
            Err(e) => {
                ::log::warn!("Leaving price {} out of the total: {}", index, e);
                skipped.push(Diagnostic::new(index, e.to_string()));
            }
        }
    }

    Expense { total, skipped }
}
