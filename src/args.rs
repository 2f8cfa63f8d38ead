use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use wishlist_pages::{Country, PageKind};

#[derive(Parser, Debug)]
#[command(name = "wishlist-pages")]
#[command(about = "Reads profiles, wishlists and search results from storefront wishlist pages")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Storefront country (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    pub country: Option<CountryArg>,

    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// WebDriver server URL (overrides config and WEBDRIVER_URL)
    #[arg(long, global = true)]
    pub webdriver_url: Option<String>,

    /// Page load timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Read the page from a saved HTML file instead of the storefront
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Owner name, photo and public wishlists of a user
    Profile { user_id: String },
    /// Items, prices and total of a user's wishlist
    Wishlist { user_id: String },
    /// Wishlists matching a name or e-mail address
    Search { query: String },
}

impl Command {
    /// Page kind and target (user id or query) this command reads
    pub fn target(&self) -> (PageKind, &str) {
        match self {
            Command::Profile { user_id } => (PageKind::Profile, user_id.as_str()),
            Command::Wishlist { user_id } => (PageKind::Wishlist, user_id.as_str()),
            Command::Search { query } => (PageKind::Search, query.as_str()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CountryArg {
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

/// Convert from CLI argument country to the library's country
pub fn convert_country(arg: CountryArg) -> Country {
    match arg {
        CountryArg::Us => Country::Us,
        CountryArg::Uk => Country::Uk,
        CountryArg::Fr => Country::Fr,
        CountryArg::Es => Country::Es,
        CountryArg::It => Country::It,
        CountryArg::De => Country::De,
        CountryArg::Jp => Country::Jp,
        CountryArg::Cn => Country::Cn,
        CountryArg::Ca => Country::Ca,
    }
}
