use crate::config::PageEncoding;
use crate::error::Result;
use crate::fetch::Fetcher;
use std::path::PathBuf;
use url::Url;

/// Serves a page saved to disk in place of the live one
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Fetcher for FileFetcher {
    async fn fetch(&mut self, url: &Url, encoding: PageEncoding) -> Result<String> {
        ::log::info!("Reading {} in place of {}", self.path.display(), url);
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(decode(&bytes, encoding))
    }
}

/// Decodes raw page bytes. A byte order mark overrides `encoding`.
pub fn decode(bytes: &[u8], encoding: PageEncoding) -> String {
    let (text, used, had_errors) = encoding.encoding().decode(bytes);
    if had_errors {
        ::log::warn!(
            "Page is not valid {}, unreadable bytes were replaced",
            used.name()
        );
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_decode_shift_jis_yen() {
        // 0x81 0x8F is the full-width yen sign
        let text = decode(&[0x81, 0x8F, b'1', b'5', b'0', b'0'], PageEncoding::ShiftJis);
        assert_eq!(text, "￥1500");
    }

    #[test]
    fn test_decode_latin1_pound() {
        let text = decode(&[0xA3, b'9', b'.', b'9', b'9'], PageEncoding::Latin1);
        assert_eq!(text, "£9.99");
    }

    #[test]
    fn test_decode_utf8_bom_wins() {
        let text = decode(
            &[0xEF, 0xBB, 0xBF, 0xC2, 0xA3, b'1'],
            PageEncoding::Latin1,
        );
        assert_eq!(text, "£1");
    }

    #[tokio::test]
    async fn test_file_fetcher_reads_and_decodes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<html><body>\xA35</body></html>").unwrap();

        let mut fetcher = FileFetcher::new(file.path());
        let url = Url::parse("http://www.amazon.co.uk/wishlist/X").unwrap();
        let source = fetcher.fetch(&url, PageEncoding::Latin1).await.unwrap();
        assert_eq!(source, "<html><body>£5</body></html>");
    }

    #[tokio::test]
    async fn test_file_fetcher_missing_file() {
        let mut fetcher = FileFetcher::new("/nonexistent/saved-page.html");
        let url = Url::parse("http://www.amazon.com/wishlist/X").unwrap();
        let err = fetcher.fetch(&url, PageEncoding::Utf8).await.unwrap_err();
        assert!(matches!(err, crate::error::ScrapeError::Fetch(_)));
    }
}
