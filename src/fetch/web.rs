use crate::config::{PageEncoding, ScraperConfig};
use crate::error::{Result, ScrapeError};
use crate::fetch::Fetcher;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

/// Local ports WebDriver servers commonly listen on
const FALLBACK_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Loads pages through a WebDriver-controlled browser
pub struct WebDriverFetcher {
    client: Client,
    webdriver_url: String,
    timeout: Duration,
}

impl WebDriverFetcher {
    /// Connects to the configured WebDriver server, trying the usual local
    /// ports when it does not answer
    pub async fn connect(config: &ScraperConfig) -> Result<Self> {
        let (client, webdriver_url) = connect_to_webdriver(&config.webdriver_url).await?;
        Ok(Self {
            client,
            webdriver_url,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Ends the browser session
    pub async fn close(self) -> Result<()> {
        self.client.close().await.map_err(ScrapeError::fetch)
    }

    async fn load(&self, url: &str) -> std::result::Result<String, CmdError> {
        self.client.goto(url).await?;
        self.client.source().await
    }

    async fn reconnect(&mut self) -> Result<()> {
        ::log::warn!("Attempting to reconnect WebDriver session");
        let client = ClientBuilder::native()
            .connect(&self.webdriver_url)
            .await
            .map_err(ScrapeError::fetch)?;
        self.client = client;
        ::log::info!("Reconnected to WebDriver at {}", self.webdriver_url);
        Ok(())
    }
}

impl Fetcher for WebDriverFetcher {
    async fn fetch(&mut self, url: &Url, encoding: PageEncoding) -> Result<String> {
        // The browser decodes the page itself
        ::log::debug!("Loading {} (served as {:?})", url, encoding);

        for attempt in 0..2 {
            if attempt > 0 {
                self.reconnect().await?;
            }

            match timeout(self.timeout, self.load(url.as_str())).await {
                Ok(Ok(source)) => {
                    ::log::debug!("Loaded {} ({} bytes)", url, source.len());
                    return Ok(source);
                }
                Ok(Err(e)) if attempt == 0 && is_session_lost(&e) => {
                    ::log::warn!("Lost WebDriver session while loading {}", url);
                }
                Ok(Err(e)) => return Err(ScrapeError::Fetch(format!("{}: {}", url, e))),
                Err(_) => {
                    return Err(ScrapeError::Fetch(format!(
                        "timed out after {}s loading {}",
                        self.timeout.as_secs(),
                        url
                    )));
                }
            }
        }

        Err(ScrapeError::Fetch(format!("lost WebDriver session loading {}", url)))
    }
}

fn is_session_lost(error: &CmdError) -> bool {
    error.to_string().contains("Unable to find session")
}

/// Connects to the WebDriver instance, returning the client and the URL that answered
async fn connect_to_webdriver(webdriver_url: &str) -> Result<(Client, String)> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok((client, webdriver_url.to_string()));
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    for url in FALLBACK_URLS {
        if url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok((client, url.to_string()));
        }
    }

    Err(ScrapeError::Fetch(format!(
        "no WebDriver server answered at {}; start one or set WEBDRIVER_URL",
        webdriver_url
    )))
}
