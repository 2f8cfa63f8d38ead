use crate::error::{Result, ScrapeError};
use crate::pages::layout::{self, profile};
use crate::pages::text;
use crate::results::{ProfileInfo, WishlistRef};
use scraper::{ElementRef, Html};

/// A user's wishlist landing page: owner details and the other public lists
pub struct ProfilePage {
    doc: Html,
}

impl ProfilePage {
    /// Parses the page source
    pub fn parse(html: &str) -> Self {
        Self::from_document(Html::parse_document(html))
    }

    pub fn from_document(doc: Html) -> Self {
        Self { doc }
    }

    /// Display name of the wishlist owner.
    ///
    /// Wishlists always show at least a first name, so a missing name field
    /// means the page is not a profile page (or the layout changed).
    pub fn basic_name(&self) -> Result<String> {
        let name = self
            .doc
            .select(&profile::NAME)
            .next()
            .map(|node| text::clean_text(&layout::text_of(node)))
            .filter(|name| !name.is_empty());

        name.ok_or(ScrapeError::MissingRequiredField("profile name"))
    }

    /// Full-size profile picture
    pub fn photo_url(&self) -> Option<String> {
        self.doc
            .select(&profile::PHOTO)
            .next()
            .and_then(|img| img.value().attr("src"))
            .filter(|src| !src.trim().is_empty())
            .map(|src| text::strip_size_segment(src.trim()))
    }

    /// Codes of the user's public wishlists
    pub fn wishlist_codes(&self) -> Vec<String> {
        self.list_blocks().filter_map(list_code).collect()
    }

    /// Item counts, parallel to [`ProfilePage::wishlist_codes`]
    pub fn wishlist_sizes(&self) -> Vec<Option<u32>> {
        self.list_blocks()
            .filter(|block| list_code(*block).is_some())
            .map(list_size)
            .collect()
    }

    /// Code, name and size of every public wishlist, read block by block
    pub fn wishlists(&self) -> Vec<WishlistRef> {
        self.list_blocks()
            .filter_map(|block| {
                let code = list_code(block)?;
                let name = block
                    .select(&profile::LIST_NAME)
                    .next()
                    .map(|a| text::clean_text(&layout::text_of(a)))
                    .filter(|name| !name.is_empty());
                Some(WishlistRef {
                    code,
                    name,
                    size: list_size(block),
                })
            })
            .collect()
    }

    /// Everything the page says about its owner
    pub fn info(&self) -> Result<ProfileInfo> {
        let info = ProfileInfo {
            name: self.basic_name()?,
            photo_url: self.photo_url(),
            wishlists: self.wishlists(),
        };
        ::log::debug!(
            "Profile of {} lists {} public wishlists",
            info.name,
            info.wishlists.len()
        );
        Ok(info)
    }

    fn list_blocks(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.doc.select(&profile::LIST_BLOCK)
    }
}

/// Wishlist code from a list block's id
fn list_code(block: ElementRef) -> Option<String> {
    block
        .value()
        .id()
        .and_then(|id| id.strip_prefix(profile::LIST_ID_PREFIX))
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}

/// Grouping separators that may appear inside a displayed count
const COUNT_SEPARATORS: [char; 4] = [',', '.', '\u{a0}', '\u{202f}'];

/// Displayed item count of a list block.
///
/// Some blocks render the count element empty; those yield `None`.
/// Grouped counts such as `1,234` or `1.234` read as the whole number.
fn list_size(block: ElementRef) -> Option<u32> {
    let raw = block
        .select(&profile::LIST_SIZE)
        .next()
        .map(layout::text_of)?;
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || COUNT_SEPARATORS.contains(c))
        .filter(char::is_ascii_digit)
        .collect();

    if digits.is_empty() {
        if !raw.trim().is_empty() {
            ::log::debug!("Unreadable wishlist size: {:?}", raw);
        }
        return None;
    }
    match digits.parse() {
        Ok(size) => Some(size),
        Err(e) => {
            ::log::warn!("Wishlist size {:?} out of range: {}", raw, e);
            None
        }
    }
}
