// Re-export modules
pub mod config;
pub mod error;
pub mod fetch;
pub mod pages;
pub mod results;

// Re-export commonly used types for convenience
pub use config::{Country, CountryParams, ScraperConfig};
pub use error::{Result, ScrapeError};
pub use pages::{Page, PageKind, ProfilePage, SearchPage, WishlistPage};

use fetch::{Fetcher, WebDriverFetcher};

/// Entry point for reading one storefront's pages through a fetcher
pub struct Storefront<F: Fetcher> {
    params: CountryParams,
    fetcher: F,
}

impl Storefront<WebDriverFetcher> {
    /// Connect to the WebDriver server named in the configuration
    pub async fn connect(config: &ScraperConfig) -> Result<Self> {
        let fetcher = WebDriverFetcher::connect(config).await?;
        Ok(Self::new(config.country, fetcher))
    }
}

impl<F: Fetcher> Storefront<F> {
    /// Create a storefront for a country, loading pages with `fetcher`
    pub fn new(country: Country, fetcher: F) -> Self {
        Self {
            params: country.params(),
            fetcher,
        }
    }

    pub fn params(&self) -> &CountryParams {
        &self.params
    }

    /// Fetch and parse a page. `target` is a user id, or the query for searches.
    pub async fn load(&mut self, kind: PageKind, target: &str) -> Result<Page> {
        let source = self.fetch_source(kind, target).await?;
        Ok(Page::parse(kind, &source, &self.params))
    }

    /// A user's profile page
    pub async fn profile(&mut self, user_id: &str) -> Result<ProfilePage> {
        let source = self.fetch_source(PageKind::Profile, user_id).await?;
        Ok(ProfilePage::parse(&source))
    }

    /// The printable version of a user's wishlist
    pub async fn wishlist(&mut self, user_id: &str) -> Result<WishlistPage> {
        let source = self.fetch_source(PageKind::Wishlist, user_id).await?;
        Ok(WishlistPage::parse(&source, &self.params))
    }

    /// Wishlists matching a name or e-mail address
    pub async fn search(&mut self, query: &str) -> Result<SearchPage> {
        let source = self.fetch_source(PageKind::Search, query).await?;
        Ok(SearchPage::parse(&source))
    }

    async fn fetch_source(&mut self, kind: PageKind, target: &str) -> Result<String> {
        let url = fetch::page_url(kind, &self.params, target)?;
        ::log::info!("Fetching {} page: {}", kind.name(), url);

        self.fetcher
            .fetch(&url, self.params.country.encoding())
            .await
    }

    /// Give back the fetcher, e.g. to close its session
    pub fn into_fetcher(self) -> F {
        self.fetcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageEncoding;
    use std::collections::HashMap;
    use url::Url;

    /// Serves canned sources keyed by URL path and records what was asked
    struct CannedFetcher {
        pages: HashMap<String, String>,
        requests: Vec<(String, PageEncoding)>,
    }

    impl Fetcher for CannedFetcher {
        async fn fetch(&mut self, url: &Url, encoding: PageEncoding) -> Result<String> {
            self.requests.push((url.to_string(), encoding));
            self.pages
                .get(url.path())
                .cloned()
                .ok_or_else(|| ScrapeError::Fetch(format!("no page for {}", url)))
        }
    }

    fn canned(path: &str, html: &str) -> CannedFetcher {
        CannedFetcher {
            pages: HashMap::from([(path.to_string(), html.to_string())]),
            requests: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_profile_through_storefront() {
        let html = r#"<html><body><table><tr>
            <td id="profile-name-Field">Jane</td>
        </tr></table></body></html>"#;
        let mut store = Storefront::new(Country::Jp, canned("/wishlist/U1", html));
        assert_eq!(store.params().currency, "JPY");

        let page = store.profile("U1").await.unwrap();
        assert_eq!(page.basic_name().unwrap(), "Jane");

        let fetcher = store.into_fetcher();
        assert_eq!(
            fetcher.requests,
            vec![(
                "http://www.amazon.co.jp/wishlist/U1".to_string(),
                PageEncoding::ShiftJis
            )]
        );
    }

    #[tokio::test]
    async fn test_wishlist_uses_country_currency() {
        let html = r#"<html><body><div id="itemsTable"><form><table>
            <tbody class="itemWrapper" name="item.1.I1.B000000001">
              <tr>
                <td><div><strong>Livre</strong></div></td>
                <td class="pPrice"><strong>EUR 12,50</strong></td>
              </tr>
            </tbody>
        </table></form></div></body></html>"#;
        let mut store = Storefront::new(
            Country::Fr,
            canned("/wishlist/U2/ref=cm_wl_act_print_o", html),
        );

        let page = store.wishlist("U2").await.unwrap();
        assert_eq!(page.prices(), vec!["12.50"]);
        assert_eq!(
            page.item_detail_urls(),
            vec!["https://www.amazon.fr/dp/B000000001"]
        );
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let mut store = Storefront::new(Country::Us, canned("/elsewhere", ""));
        let err = store.search("jane").await.err().unwrap();
        assert!(matches!(err, ScrapeError::Fetch(_)));
    }
}
