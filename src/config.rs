use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use url::Url;

use crate::error::Result;

/// Configuration for a store audit run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Store front URL to start from
    #[serde(default = "default_start_url")]
    pub start_url: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Directory reports are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Optional safety cap on the number of listing pages visited.
    /// Guards against a store front whose pagination control never disables.
    #[serde(default)]
    pub page_cap: Option<u32>,

    /// CSS selectors for the store front
    #[serde(default)]
    pub selectors: Selectors,
}

/// CSS selectors for the parts of the store front the audit touches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Container for one product tile on a listing page
    pub product_item: String,

    /// Title within a product tile
    pub product_title: String,

    /// Price within a product tile
    pub product_price: String,

    /// Promotional badge within a product tile (often absent)
    pub top_seller_badge: String,

    /// Next-page control in the pagination strip
    pub next_page: String,

    /// Shop entry in the site navigation
    pub shop_menu: String,

    /// Men's entry in the shop flyout
    pub mens_menu: String,

    /// Jackets category link
    pub jackets_category: String,

    /// Top-level menu element used as the hover target
    pub menu_root: String,

    /// New & Features entry in the menu flyout
    pub new_and_features: String,

    /// One video tile in the feed
    pub video_feed: String,

    /// Attribute on a video tile carrying its posted timestamp
    pub video_posted_attr: String,

    /// Element whose presence means the page has finished loading
    pub page_ready: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            product_item: ".product-card".to_string(),
            product_title: ".product-card-title".to_string(),
            product_price: ".product-card-price".to_string(),
            top_seller_badge: ".top-seller-message".to_string(),
            next_page: ".pagination a.next-page".to_string(),
            shop_menu: ".site-nav a.shop-menu".to_string(),
            mens_menu: ".site-nav .shop-flyout a.mens".to_string(),
            jackets_category: ".category-list a.jackets".to_string(),
            menu_root: ".site-nav .menu-root".to_string(),
            new_and_features: ".site-nav a.new-and-features".to_string(),
            video_feed: ".video-feed .video-item".to_string(),
            video_posted_attr: "data-posted".to_string(),
            page_ready: ".site-header".to_string(),
        }
    }
}

/// Default value for start_url
fn default_start_url() -> String {
    "https://shop.warriors.com".to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default value for output_dir
fn default_output_dir() -> String {
    "./test-output".to_string()
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self::new(&default_start_url())
    }
}

impl CollectorConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            webdriver_url: default_webdriver_url(),
            output_dir: default_output_dir(),
            page_cap: None,
            selectors: Selectors::default(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Check that the start URL actually parses before driving a browser at it
    pub fn validated(self) -> Result<Self> {
        Url::parse(&self.start_url)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: CollectorConfig =
            serde_json::from_str(r#"{ "start_url": "https://shop.example.com/warriors" }"#)
                .unwrap();

        assert_eq!(config.start_url, "https://shop.example.com/warriors");
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.output_dir, "./test-output");
        assert_eq!(config.page_cap, None);
        assert_eq!(config.selectors.product_item, ".product-card");
    }

    #[test]
    fn test_selector_overrides() {
        let config: CollectorConfig = serde_json::from_str(
            r#"{
                "start_url": "https://shop.example.com",
                "page_cap": 50,
                "selectors": { "product_item": "li.product" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.page_cap, Some(50));
        assert_eq!(config.selectors.product_item, "li.product");
        // Untouched selectors keep their defaults
        assert_eq!(config.selectors.next_page, ".pagination a.next-page");
    }

    #[test]
    fn test_validated_rejects_bad_url() {
        let config = CollectorConfig::new("not a url");
        assert!(config.validated().is_err());

        let config = CollectorConfig::new("https://shop.example.com");
        assert!(config.validated().is_ok());
    }
}
