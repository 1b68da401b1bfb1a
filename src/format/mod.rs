//! Output formatting for ranked listings (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::ranking::RankedListing;

/// Shown instead of a listing table when nothing matched.
pub const NO_RESULTS: &str =
    "条件に合う商品が見つかりませんでした。検索キーワードを見直してください。";

/// Marker shown next to the cheapest listing(s).
const CHEAPEST_MARK: &str = "💡";

/// Formats ranked listings for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats listings, already in display order.
    pub fn format_listings(&self, listings: &[RankedListing]) -> String {
        if listings.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => NO_RESULTS.to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_listings(listings),
            OutputFormat::Table => self.table_listings(listings),
            OutputFormat::Markdown => self.markdown_listings(listings),
            OutputFormat::Csv => self.csv_listings(listings),
        }
    }

    // JSON formatting

    fn json_listings(&self, listings: &[RankedListing]) -> String {
        serde_json::to_string_pretty(listings).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_listings(&self, listings: &[RankedListing]) -> String {
        let title_width = 40;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<2}  {:<7}  {:<10}  {:<6}  {:>5}  {:>7}  {:>9}  {}",
            "", "Site", "Brand", "Type", "Qty", "Price", "Unit", "Title"
        ));
        lines.push(format!(
            "{:-<2}  {:-<7}  {:-<10}  {:-<6}  {:->5}  {:->7}  {:->9}  {:-<title_width$}",
            "", "", "", "", "", "", "", ""
        ));

        for ranked in listings {
            let l = &ranked.listing;
            let mark = if ranked.is_cheapest { CHEAPEST_MARK } else { "" };

            // Japanese labels are two columns wide, so pad by display width
            lines.push(format!(
                "{}  {}  {}  {}  {}  {}  {:>9.2}  {}",
                pad_right(mark, 2),
                pad_right(l.source.display_name(), 7),
                pad_right(l.brand.as_str(), 10),
                pad_right(l.product_type.label(), 6),
                pad_left(&format!("{}枚", l.quantity), 5),
                pad_left(&format!("{}円", l.price), 7),
                l.unit_price,
                truncate(&l.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} listings (unit price ascending)", listings.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_listings(&self, listings: &[RankedListing]) -> String {
        let mut lines = Vec::new();

        for ranked in listings {
            let l = &ranked.listing;
            let mark = if ranked.is_cheapest { format!("{} ", CHEAPEST_MARK) } else { String::new() };

            lines.push(format!("### {}{}", mark, l.title));
            if !l.image_url.is_empty() {
                lines.push(format!("![{}]({})", l.brand, l.image_url));
            }
            lines.push(format!(
                "- サイト: {} | ブランド: {} | 種類: {}",
                l.source.display_name(),
                l.brand,
                l.product_type
            ));
            lines.push(format!(
                "- {}枚 / {}円 → {:.2}円/枚",
                l.quantity, l.price, l.unit_price
            ));
            if !l.url.is_empty() {
                lines.push(format!("- [商品ページ]({})", l.url));
            }
            lines.push("---".to_string());
        }

        lines.push(String::new());
        lines.push(format!("*{} listings found*", listings.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "source,title,price,quantity,unit_price,type,brand,cheapest,url,image_url".to_string()
    }

    fn csv_listings(&self, listings: &[RankedListing]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for ranked in listings {
            let l = &ranked.listing;
            lines.push(format!(
                "{},{},{},{},{:.2},{},{},{},{},{}",
                l.source.display_name(),
                Self::csv_escape(&l.title),
                l.price,
                l.quantity,
                l.unit_price,
                l.product_type.label(),
                Self::csv_escape(l.brand.as_str()),
                ranked.is_cheapest,
                Self::csv_escape(&l.url),
                Self::csv_escape(&l.image_url)
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Terminal columns taken by a character: 2 for East Asian wide forms and emoji.
fn char_width(c: char) -> usize {
    match c as u32 {
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x1F300..=0x1FAFF
        | 0x20000..=0x3FFFD => 2,
        _ => 1,
    }
}

fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

fn pad_right(text: &str, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(display_width(text))))
}

fn pad_left(text: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(display_width(text))), text)
}

/// Shortens text to at most `max` characters, ending in an ellipsis when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Brand, Listing, ProductType, Source};

    fn make_ranked(title: &str, unit_price: f64, is_cheapest: bool) -> RankedListing {
        RankedListing {
            listing: Listing {
                source: Source::Rakuten,
                title: title.to_string(),
                price: 1000,
                quantity: 44,
                unit_price,
                product_type: ProductType::Pants,
                brand: Brand::Named("グーン".to_string()),
                url: "https://item.rakuten.co.jp/shop/goon/".to_string(),
                image_url: "https://thumbnail.image.rakuten.co.jp/goon.jpg".to_string(),
            },
            is_cheapest,
        }
    }

    // JSON format tests

    #[test]
    fn test_json_listings() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_listings(&[make_ranked("グーン パンツ 44枚", 22.73, true)]);

        assert!(output.starts_with('['));
        assert!(output.contains("\"unit_price\": 22.73"));
        assert!(output.contains("\"is_cheapest\": true"));
        assert!(output.contains("\"brand\": \"グーン\""));
        assert!(output.contains("\"source\": \"rakuten\""));
    }

    #[test]
    fn test_json_empty() {
        let formatter = Formatter::new(OutputFormat::Json);
        assert_eq!(formatter.format_listings(&[]), "[]");
    }

    // Table format tests

    #[test]
    fn test_table_listings() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_listings(&[
            make_ranked("グーン パンツ 44枚", 22.73, true),
            make_ranked("グーン パンツ 44枚 (2)", 30.0, false),
        ]);

        assert!(output.contains("Site"));
        assert!(output.contains("楽天"));
        assert!(output.contains("44枚"));
        assert!(output.contains("1000円"));
        assert!(output.contains("22.73"));
        assert!(output.contains("30.00"));
        assert!(output.contains("Total: 2 listings"));
        assert_eq!(output.matches(CHEAPEST_MARK).count(), 1);
    }

    #[test]
    fn test_table_columns_align_with_wide_labels() {
        let mut amazon = make_ranked("a", 22.73, true);
        amazon.listing.source = Source::Amazon;
        amazon.listing.brand = Brand::Named("パンパース".to_string());

        let mut other = make_ranked("b", 30.0, false);
        other.listing.brand = Brand::Other;
        other.listing.product_type = ProductType::Unknown;
        other.listing.quantity = 100;
        other.listing.price = 3000;

        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_listings(&[amazon, other]);
        let lines: Vec<&str> = output.lines().collect();

        // Everything before the title column must take the same width on every row
        let header_prefix = display_width(lines[0]) - display_width("Title");
        assert_eq!(display_width(lines[2]) - 1, header_prefix);
        assert_eq!(display_width(lines[3]) - 1, header_prefix);
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("GENKI"), 5);
        assert_eq!(display_width("パンパース"), 10);
        assert_eq!(display_width("💡"), 2);
        assert_eq!(pad_right("楽天", 7), "楽天   ");
        assert_eq!(pad_left("58枚", 5), " 58枚");
    }

    #[test]
    fn test_table_empty() {
        let formatter = Formatter::new(OutputFormat::Table);
        assert_eq!(formatter.format_listings(&[]), NO_RESULTS);
    }

    #[test]
    fn test_table_long_title_truncation() {
        let formatter = Formatter::new(OutputFormat::Table);
        let title = "とても長い商品名".repeat(10);
        let output = formatter.format_listings(&[make_ranked(&title, 20.0, true)]);

        assert!(output.contains('…'));
        assert!(!output.contains(&title));
    }

    // Markdown format tests

    #[test]
    fn test_markdown_listings() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_listings(&[
            make_ranked("グーン パンツ 44枚", 22.73, true),
            make_ranked("別の商品 44枚", 25.0, false),
        ]);

        assert!(output.contains("### 💡 グーン パンツ 44枚"));
        assert!(output.contains("### 別の商品 44枚"));
        assert!(output.contains("- サイト: 楽天 | ブランド: グーン | 種類: パンツ"));
        assert!(output.contains("- 44枚 / 1000円 → 22.73円/枚"));
        assert!(output.contains("[商品ページ](https://item.rakuten.co.jp/shop/goon/)"));
        assert!(output.contains("*2 listings found*"));
    }

    #[test]
    fn test_markdown_omits_missing_link_and_image() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let mut ranked = make_ranked("リンクなし 44枚", 20.0, false);
        ranked.listing.url.clear();
        ranked.listing.image_url.clear();

        let output = formatter.format_listings(&[ranked]);
        assert!(!output.contains("商品ページ"));
        assert!(!output.contains("!["));
    }

    #[test]
    fn test_markdown_empty() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        assert_eq!(formatter.format_listings(&[]), NO_RESULTS);
    }

    // CSV format tests

    #[test]
    fn test_csv_listings() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_listings(&[make_ranked("グーン, お得用 44枚", 22.73, true)]);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("source,title,price"));
        assert!(lines[1].starts_with("楽天,\"グーン, お得用 44枚\",1000,44,22.73,パンツ,グーン,true,"));
    }

    #[test]
    fn test_csv_empty() {
        let formatter = Formatter::new(OutputFormat::Csv);
        assert_eq!(formatter.format_listings(&[]), formatter.csv_header());
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(Formatter::csv_escape("simple"), "simple");
        assert_eq!(Formatter::csv_escape("with,comma"), "\"with,comma\"");
        assert_eq!(Formatter::csv_escape("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("パンパース", 3), "パン…");
    }
}
