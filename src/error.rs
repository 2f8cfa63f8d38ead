use std::fmt;
use thiserror::Error;

/// Errors raised while resolving a storefront, fetching a page or reading
/// values out of it.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The country code is not one of the supported storefronts.
    #[error("unknown country code: {0}")]
    UnknownCountry(String),

    /// The page could not be retrieved (driver, network or disk).
    #[error("failed to fetch page: {0}")]
    Fetch(String),

    /// The configuration file could not be read or decoded.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A single-valued field the page is expected to always carry is absent.
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// Independently queried sequences disagree in length.
    #[error("misaligned sequences: {titles} titles, {authors} authors, {prices} prices")]
    MisalignedSequences {
        titles: usize,
        authors: usize,
        prices: usize,
    },

    /// A price token is still not a number after cleanup.
    #[error("malformed price token: {0:?}")]
    MalformedPriceToken(String),
}

impl ScrapeError {
    /// Creates a Fetch error from any displayable cause.
    pub fn fetch(err: impl fmt::Display) -> Self {
        ScrapeError::Fetch(err.to_string())
    }

    /// Creates a Config error from any displayable cause.
    pub fn config(err: impl fmt::Display) -> Self {
        ScrapeError::Config(err.to_string())
    }
}

impl From<std::io::Error> for ScrapeError {
    fn from(err: std::io::Error) -> Self {
        ScrapeError::fetch(err)
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
