use super::fixtures;
use crate::config::Country;
use crate::error::ScrapeError;
use crate::pages::wishlist::{WishlistPage, sum_prices};
use crate::results::{Diagnostic, Price};

fn us_page(html: &str) -> WishlistPage {
    WishlistPage::parse(html, &Country::Us.params())
}

#[cfg(test)]
mod simple_page {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_titles_authors_prices() {
        let page = us_page(fixtures::WISHLIST_SIMPLE);
        assert_eq!(page.titles(), vec!["Book A", "Book B"]);
        // The missing byline stays as an empty placeholder
        assert_eq!(page.authors(), vec!["Jane Doe", ""]);
        // The promotional item shows its price in the third bold run
        assert_eq!(page.prices(), vec!["9.99", "14.50"]);
        assert!(page.check_alignment().is_ok());
    }

    #[test]
    fn test_covers_and_detail_urls() {
        let page = us_page(fixtures::WISHLIST_SIMPLE);
        assert_eq!(
            page.cover_urls(),
            vec!["https://images.example.com/images/I/51abc.jpg"]
        );
        assert_eq!(
            page.item_detail_urls(),
            vec![
                "https://www.amazon.com/dp/0316769487",
                "https://www.amazon.com/dp/0451524934",
            ]
        );
    }

    #[test]
    fn test_total() {
        let page = us_page(fixtures::WISHLIST_SIMPLE);
        let expense = page.total_expense();
        assert!((expense.total - 24.49).abs() < 1e-9);
        assert!(expense.skipped.is_empty());
    }
}

#[cfg(test)]
mod full_page {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_items_in_one_pass() {
        let page = us_page(fixtures::WISHLIST_FULL);
        let items = page.items();

        assert_eq!(items.len(), 7);
        assert_eq!(items[1].title, "The Matrix");
        assert_eq!(items[1].author, "Keanu Reeves");
        assert_eq!(items[1].price, Price::Amount("1234.56".to_string()));
        assert_eq!(items[2].source_site.as_deref(), Some("lamps.example"));
        assert_eq!(items[3].price, Price::Unavailable);
        assert_eq!(items[4].price, Price::Idea("Idea".to_string()));
        assert_eq!(items[5].price, Price::Unavailable);
        assert_eq!(
            items[6].price,
            Price::Range("At $5.00 from 3 sellers".to_string())
        );
    }

    #[test]
    fn test_untitled_block_is_reported() {
        let page = us_page(fixtures::WISHLIST_FULL);
        assert_eq!(
            page.diagnostics(),
            vec![Diagnostic::new(7, "item has no title")]
        );
    }

    #[test]
    fn test_authors_keep_placeholders() {
        let page = us_page(fixtures::WISHLIST_FULL);
        assert_eq!(
            page.authors(),
            vec!["Jane Doe", "Keanu Reeves", "", "", "", "", ""]
        );
    }

    #[test]
    fn test_prices_drop_ranges() {
        let page = us_page(fixtures::WISHLIST_FULL);
        assert_eq!(
            page.prices(),
            vec!["9.99", "1234.56", "25", "", "Idea", ""]
        );
    }

    #[test]
    fn test_range_drop_is_flagged() {
        let page = us_page(fixtures::WISHLIST_FULL);
        let err = page.check_alignment().unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MisalignedSequences {
                titles: 7,
                authors: 7,
                prices: 6
            }
        ));
    }

    #[test]
    fn test_source_sites_sorted_and_unique() {
        let page = us_page(fixtures::WISHLIST_FULL);
        assert_eq!(page.source_sites(), vec!["art.example", "lamps.example"]);
    }

    #[test]
    fn test_cover_urls() {
        let page = us_page(fixtures::WISHLIST_FULL);
        assert_eq!(
            page.cover_urls(),
            vec![
                "https://images.example.com/images/I/51abc.jpg",
                "https://m.media.example/images/I/41lamp.jpg",
            ]
        );
    }

    #[test]
    fn test_detail_urls_keep_placeholders() {
        let page = us_page(fixtures::WISHLIST_FULL);
        assert_eq!(
            page.item_detail_urls(),
            vec![
                "https://www.amazon.com/dp/0316769487",
                "https://www.amazon.com/dp/B00005JNOG",
                "",
                "",
                "",
                "",
                "",
            ]
        );
    }

    #[test]
    fn test_idea_titles() {
        let page = us_page(fixtures::WISHLIST_FULL);
        assert_eq!(page.idea_titles(), vec!["Remember the milk"]);
    }

    #[test]
    fn test_total_skips_ideas_and_unavailable() {
        let page = us_page(fixtures::WISHLIST_FULL);
        let expense = page.total_expense();
        assert!((expense.total - 1269.55).abs() < 1e-6);
        assert!(expense.skipped.is_empty());
    }

    #[test]
    fn test_summary() {
        let page = us_page(fixtures::WISHLIST_FULL);
        let summary = page.summary();

        assert_eq!(summary.items, page.items());
        assert_eq!(summary.source_sites, page.source_sites());
        assert_eq!(summary.idea_titles, vec!["Remember the milk"]);
        assert_eq!(summary.total, page.total_expense());
        assert_eq!(
            summary.diagnostics,
            vec![
                Diagnostic::new(7, "item has no title"),
                Diagnostic::new(
                    6,
                    "price range \"At $5.00 from 3 sellers\" left out of the total"
                ),
            ]
        );
    }
}

#[cfg(test)]
mod totals {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_idea_entries_are_excluded() {
        let expense = sum_prices(&["Idea", "12.00", ""]);
        assert_eq!(expense.total, 12.0);
        assert!(expense.skipped.is_empty());
    }

    #[test]
    fn test_extra_dots_are_collapsed() {
        let expense = sum_prices(&["1.234.56"]);
        assert!((expense.total - 134.56).abs() < 1e-9);
    }

    #[test]
    fn test_bad_tokens_are_reported_not_fatal() {
        let expense = sum_prices(&["5", "n/a", "2.50"]);
        assert_eq!(expense.total, 7.5);
        assert_eq!(expense.skipped.len(), 1);
        assert_eq!(expense.skipped[0].item, 1);
        assert!(expense.skipped[0].message.contains("n/a"));
    }

    #[test]
    fn test_empty_list_totals_zero() {
        let expense = sum_prices::<&str>(&[]);
        assert_eq!(expense.total, 0.0);

        let page = us_page("<html><body></body></html>");
        assert_eq!(page.total_expense().total, 0.0);
        assert!(page.items().is_empty());
    }
}
