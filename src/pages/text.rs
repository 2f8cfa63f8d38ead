use crate::config::CurrencyContext;
use crate::error::{Result, ScrapeError};
use crate::results::Price;
use regex::Regex;
use std::sync::LazyLock;

/// Characters the storefront sprinkles into titles and host names
const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Price cell text of a non-purchasable reminder
pub const IDEA_MARKER: &str = "Idea";

/// Price cell text when the price is only shown in the cart
pub const CLICK_MARKER: &str = "Click";

/// Price cell text of an offers range ("At $5.00 from 3 sellers")
pub const RANGE_MARKER: &str = "At ";

/// Tokens that leak into bylines from the media-format column
const AUTHOR_NOISE: [&str; 2] = ["DVD", "VHS"];

/// Localized byline prefixes (en, fr/es, it, de)
static AUTHOR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:by|de|di|von)(?:\s+|$)").unwrap());

//
// Generic text cleanup
//

/// Removes zero-width characters
pub fn strip_zero_width(text: &str) -> String {
    text.chars().filter(|c| !ZERO_WIDTH.contains(c)).collect()
}

/// Collapses runs of whitespace into single spaces and trims the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Zero-width removal followed by whitespace normalization
pub fn clean_text(text: &str) -> String {
    normalize_whitespace(&strip_zero_width(text))
}

//
// URLs and identifiers
//

/// Drops the thumbnail-size segment from an image URL.
///
/// Image file names look like `51abc._SL110_.jpg`: the second-to-last
/// dot-separated segment encodes the size, and removing it yields the
/// full-resolution image. URLs with fewer than three segments are returned
/// unchanged.
pub fn strip_size_segment(url: &str) -> String {
    let mut segments: Vec<&str> = url.split('.').collect();
    if segments.len() < 3 {
        return url.to_string();
    }
    segments.remove(segments.len() - 2);
    segments.join(".")
}

/// Catalog code from an item identifier such as `item.1.I2ZQ.0316769487`
pub fn catalog_code(identifier: &str) -> Option<&str> {
    identifier
        .split('.')
        .nth(3)
        .map(str::trim)
        .filter(|code| !code.is_empty())
}

/// Host name without `www.` and zero-width characters
pub fn clean_hostname(raw: &str) -> String {
    let host = clean_text(raw);
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

//
// Bylines
//

/// Cleans a raw byline: drops `~`, media-format noise and the localized
/// "by" prefix
pub fn clean_author(raw: &str) -> String {
    let text = clean_text(&raw.replace('~', " "));
    let kept = text
        .split(' ')
        .filter(|token| !AUTHOR_NOISE.contains(token))
        .collect::<Vec<_>>()
        .join(" ");
    AUTHOR_PREFIX.replace(&kept, "").trim().to_string()
}

//
// Prices
//

/// Classifies the raw text of a price cell
pub fn classify_price(raw: Option<&str>, currency: &CurrencyContext) -> Price {
    let text = raw.map(clean_text).unwrap_or_default();

    if text.is_empty() {
        Price::Unavailable
    } else if text.contains(IDEA_MARKER) {
        Price::Idea(text)
    } else if text.contains(CLICK_MARKER) {
        Price::Unavailable
    } else if text.contains(RANGE_MARKER) {
        Price::Range(text)
    } else {
        Price::Amount(normalize_price(&text, currency))
    }
}

/// Turns a displayed price into a plain numeric token.
///
/// The currency token and symbol are removed. For currencies with a decimal
/// comma, `.` groups thousands and is dropped before `,` becomes the decimal
/// point; otherwise `,` is the grouping separator and is dropped. A trailing
/// `.00` is removed.
pub fn normalize_price(raw: &str, currency: &CurrencyContext) -> String {
    let mut token = strip_zero_width(raw).replace(&currency.cleaner, "");
    if !currency.symbol.is_empty() {
        token = token.replace(&currency.symbol, "");
    }
    let token: String = token.chars().filter(|c| !c.is_whitespace()).collect();

    let token = if currency.decimal_comma {
        token.replace('.', "").replace(',', ".")
    } else {
        token.replace(',', "")
    };

    match token.strip_suffix(".00") {
        Some(whole) if !whole.is_empty() => whole.to_string(),
        _ => token,
    }
}

/// Collapses a token with more than one `.` down to a single dot.
///
/// Each extra dot takes the digit after it with it:
/// `1.234.56` becomes `1.34.56` and then `134.56`. Price totals have always
/// been computed this way, so the rule is kept as is even though it does
/// not recover the grouped amount.
pub fn collapse_extra_dots(token: &str) -> String {
    let mut chars: Vec<char> = token.chars().collect();
    while chars.iter().filter(|&&c| c == '.').count() > 1 {
        let Some(first) = chars.iter().position(|&c| c == '.') else {
            break;
        };
        if first + 1 < chars.len() && chars[first + 1] != '.' {
            chars.remove(first + 1);
        }
        chars.remove(first);
    }
    if chars.len() != token.chars().count() {
        ::log::debug!("Collapsed price token {:?}", token);
    }
    chars.into_iter().collect()
}

/// Parses a normalized price token
pub fn parse_amount(token: &str) -> Result<f64> {
    let collapsed = collapse_extra_dots(token.trim());
    match collapsed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ScrapeError::MalformedPriceToken(token.to_string())),
    }
}
