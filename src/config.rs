use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Storefronts with a known domain and currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Us,
    Uk,
    Fr,
    Es,
    It,
    De,
    Jp,
    Cn,
    Ca,
}

impl Country {
    /// Every supported storefront, in display order
    pub const ALL: [Country; 9] = [
        Country::Us,
        Country::Uk,
        Country::Fr,
        Country::Es,
        Country::It,
        Country::De,
        Country::Jp,
        Country::Cn,
        Country::Ca,
    ];

    /// Two-letter code used on the command line and in config files
    pub fn code(&self) -> &'static str {
        match self {
            Country::Us => "us",
            Country::Uk => "uk",
            Country::Fr => "fr",
            Country::Es => "es",
            Country::It => "it",
            Country::De => "de",
            Country::Jp => "jp",
            Country::Cn => "cn",
            Country::Ca => "ca",
        }
    }

    /// Domain suffix, currency code and symbol for this storefront
    pub fn params(&self) -> CountryParams {
        let (domain, currency, symbol) = match self {
            Country::Us => (".com", "USD", "$"),
            Country::Uk => (".co.uk", "GBP", "£"),
            Country::Fr => (".fr", "EUR", "€"),
            Country::Es => (".es", "EUR", "€"),
            Country::It => (".it", "EUR", "€"),
            Country::De => (".de", "EUR", "€"),
            Country::Jp => (".co.jp", "JPY", "￥"),
            Country::Cn => (".cn", "CNY", "￥"),
            Country::Ca => (".ca", "CDN", "$"),
        };
        CountryParams {
            country: *self,
            domain: domain.to_string(),
            currency: currency.to_string(),
            symbol: symbol.to_string(),
        }
    }

    /// Character encoding the storefront serves its pages in
    pub fn encoding(&self) -> PageEncoding {
        match self {
            Country::Jp => PageEncoding::ShiftJis,
            Country::Us | Country::Uk => PageEncoding::Latin1,
            _ => PageEncoding::Utf8,
        }
    }
}

impl FromStr for Country {
    type Err = ScrapeError;

    fn from_str(code: &str) -> Result<Self> {
        let wanted = code.trim().to_ascii_lowercase();
        Country::ALL
            .into_iter()
            .find(|c| c.code() == wanted)
            .ok_or_else(|| ScrapeError::UnknownCountry(code.to_string()))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Resolved per-country settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryParams {
    pub country: Country,
    /// Domain suffix appended to the storefront name, e.g. `.co.uk`
    pub domain: String,
    pub currency: String,
    pub symbol: String,
}

impl CountryParams {
    /// Host name of the storefront, e.g. `www.amazon.co.uk`
    pub fn host(&self) -> String {
        format!("www.amazon{}", self.domain)
    }

    /// Derives the tokens used to clean raw price strings
    pub fn currency_context(&self) -> CurrencyContext {
        let cleaner = match self.currency.as_str() {
            "JPY" | "CNY" => "￥".to_string(),
            "EUR" => "EUR".to_string(),
            "CDN" => "CDN$".to_string(),
            "GBP" => "£".to_string(),
            _ => self.symbol.clone(),
        };
        CurrencyContext {
            currency: self.currency.clone(),
            symbol: self.symbol.clone(),
            cleaner,
            decimal_comma: self.currency == "EUR",
        }
    }
}

/// Currency-specific price cleanup rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyContext {
    pub currency: String,
    pub symbol: String,
    /// Literal token removed from raw price text before parsing
    pub cleaner: String,
    /// `,` separates decimals (otherwise it groups thousands)
    pub decimal_comma: bool,
}

/// Legacy encodings the storefronts serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageEncoding {
    ShiftJis,
    Latin1,
    Utf8,
}

impl PageEncoding {
    /// The matching `encoding_rs` decoder
    pub fn encoding(&self) -> &'static encoding_rs::Encoding {
        match self {
            PageEncoding::ShiftJis => encoding_rs::SHIFT_JIS,
            PageEncoding::Latin1 => encoding_rs::WINDOWS_1252,
            PageEncoding::Utf8 => encoding_rs::UTF_8,
        }
    }
}

/// Configuration for the scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Storefront to query
    #[serde(default = "default_country")]
    pub country: Country,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Seconds allowed for a single page load
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            webdriver_url: default_webdriver_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ScraperConfig {
    /// Create a configuration for a country with default values
    pub fn new(country: Country) -> Self {
        Self {
            country,
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path.as_ref()).map_err(ScrapeError::config)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(ScrapeError::config)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(ScrapeError::config)
    }

    /// Apply the `WEBDRIVER_URL` environment variable, if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }
}

/// Default value for country
fn default_country() -> Country {
    Country::Us
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default value for timeout_secs
fn default_timeout_secs() -> u64 {
    45
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_from_str() {
        assert_eq!("uk".parse::<Country>().unwrap(), Country::Uk);
        assert_eq!(" JP ".parse::<Country>().unwrap(), Country::Jp);

        let err = "br".parse::<Country>().unwrap_err();
        assert!(matches!(err, ScrapeError::UnknownCountry(code) if code == "br"));
    }

    #[test]
    fn test_params_and_host() {
        let params = Country::Uk.params();
        assert_eq!(params.domain, ".co.uk");
        assert_eq!(params.currency, "GBP");
        assert_eq!(params.host(), "www.amazon.co.uk");
    }

    #[test]
    fn test_cleaner_tokens() {
        let cases = [
            (Country::Us, "$", false),
            (Country::Uk, "£", false),
            (Country::De, "EUR", true),
            (Country::Ca, "CDN$", false),
            (Country::Jp, "￥", false),
        ];
        for (country, cleaner, decimal_comma) in cases {
            let ctx = country.params().currency_context();
            assert_eq!(ctx.cleaner, cleaner, "cleaner for {}", country);
            assert_eq!(ctx.decimal_comma, decimal_comma, "separator for {}", country);
        }
    }

    #[test]
    fn test_encoding_selection() {
        assert_eq!(Country::Jp.encoding(), PageEncoding::ShiftJis);
        assert_eq!(Country::Us.encoding(), PageEncoding::Latin1);
        assert_eq!(Country::Uk.encoding(), PageEncoding::Latin1);
        assert_eq!(Country::Fr.encoding(), PageEncoding::Utf8);
        assert_eq!(PageEncoding::ShiftJis.encoding().name(), "Shift_JIS");
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config = ScraperConfig::from_json(r#"{"country": "de"}"#).unwrap();
        assert_eq!(config.country, Country::De);
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.timeout_secs, 45);

        assert!(ScraperConfig::from_json(r#"{"country": "xx"}"#).is_err());
    }

    #[test]
    fn test_config_for_country() {
        let config = ScraperConfig::new(Country::Ca);
        assert_eq!(config.country, Country::Ca);
        assert_eq!(config.timeout_secs, 45);
        assert_eq!(config.country.to_string(), "ca");
    }
}
