use clap::Parser;
use std::error::Error;
use wishlist_pages::fetch::FileFetcher;
use wishlist_pages::{Page, ScraperConfig, Storefront};

mod args;
use args::{Args, convert_country};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    if let Err(e) = run(args).await {
        ::log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = build_config(&args)?;
    let (kind, target) = args.command.target();
    ::log::info!("Reading {} page for {:?} on {}", kind.name(), target, config.country);

    let page = match &args.file {
        Some(path) => {
            let mut store = Storefront::new(config.country, FileFetcher::new(path));
            store.load(kind, target).await?
        }
        None => {
            let mut store = Storefront::connect(&config).await?;
            let page = store.load(kind, target).await;
            if let Err(e) = store.into_fetcher().close().await {
                ::log::warn!("Failed to close WebDriver session: {}", e);
            }
            page?
        }
    };

    println!("{}", render(&page)?);
    Ok(())
}

/// Config file, then environment, then command-line flags
fn build_config(args: &Args) -> Result<ScraperConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => ScraperConfig::from_file(path)?,
        None => ScraperConfig::default(),
    }
    .with_env_overrides();

    if let Some(country) = args.country {
        config.country = convert_country(country);
    }
    if let Some(url) = &args.webdriver_url {
        config.webdriver_url = url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    Ok(config)
}

/// Pretty JSON of the records a page yields
fn render(page: &Page) -> Result<String, Box<dyn Error>> {
    let json = match page {
        Page::Profile(profile) => serde_json::to_string_pretty(&profile.info()?)?,
        Page::Wishlist(wishlist) => {
            if let Err(e) = wishlist.check_alignment() {
                ::log::warn!("{}", e);
            }
            let summary = wishlist.summary();
            ::log::info!(
                "Wishlist has {} items totalling {:.2}",
                summary.items.len(),
                summary.total.total
            );
            serde_json::to_string_pretty(&summary)?
        }
        Page::Search(search) => serde_json::to_string_pretty(&search.results())?,
    };
    Ok(json)
}
