//! CSS selectors for marketplace search result pages.
//!
//! Fields with more than one entry are ordered alternatives: the first one
//! that yields non-empty text wins. Update this file when a marketplace
//! changes its HTML structure, and add a fixture for the new markup.

use scraper::Selector;
use std::sync::LazyLock;

fn alternatives(selectors: &[&str]) -> Vec<Selector> {
    selectors.iter().map(|s| Selector::parse(s).unwrap()).collect()
}

/// Amazon.co.jp search results.
pub mod amazon {
    use super::*;

    /// Result card.
    pub static RESULT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.s-result-item").unwrap());

    pub static TITLE: LazyLock<Vec<Selector>> = LazyLock::new(|| alternatives(&["h2"]));

    /// Whole-yen price part.
    pub static PRICE: LazyLock<Vec<Selector>> =
        LazyLock::new(|| alternatives(&["span.a-price-whole"]));

    /// Product link (relative href).
    pub static LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.a-link-normal.s-no-outline").unwrap());

    pub static IMAGE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("img.s-image").unwrap());
}

/// Rakuten Ichiba search results. Both the classic and the card layout are served.
pub mod rakuten {
    use super::*;

    pub static RESULT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.searchresultitem, div.dui-card").unwrap());

    pub static TITLE: LazyLock<Vec<Selector>> = LazyLock::new(|| alternatives(&["h2", ".title"]));

    pub static PRICE: LazyLock<Vec<Selector>> =
        LazyLock::new(|| alternatives(&["span.price", "span.medium"]));
}

/// Yahoo! Shopping search results.
pub mod yahoo {
    use super::*;

    pub static RESULT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".SearchResults__items > div").unwrap());

    /// Title is the text of the first link in the card.
    pub static TITLE: LazyLock<Vec<Selector>> = LazyLock::new(|| alternatives(&["a"]));

    pub static PRICE: LazyLock<Vec<Selector>> = LazyLock::new(|| alternatives(&["._Price__value"]));
}

/// Shared "first anchor / first image" rule for sources without bespoke markup classes.
pub mod generic {
    use super::*;

    pub static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

    pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
}
