use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use fantoccini::actions::{InputSource, MouseActions, PointerAction};
use fantoccini::{Client, ClientBuilder, Locator};

use crate::accessor::{ItemHandle, PageAccessor};
use crate::config::CollectorConfig;
use crate::error::{Error, Result};
use crate::listing;
use crate::videos::{self, VideoSurvey};

/// Common WebDriver ports to try when the configured server is unreachable
const FALLBACK_WEBDRIVER_URLS: &[&str] = &[
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // Selenium / geckodriver default
    "http://127.0.0.1:4444", // Same, with IP instead of localhost
];

/// How long to wait for an expected element before giving up
const ELEMENT_WAIT: Duration = Duration::from_secs(10);

/// A live browser session pointed at the store front.
///
/// Wraps the fantoccini client with the store's navigation steps and
/// implements [`PageAccessor`] over the live page source, so pagination state
/// is always read fresh rather than cached.
pub struct StoreSession {
    client: Client,
    config: CollectorConfig,
}

impl StoreSession {
    /// Connect to the configured WebDriver server, falling back to common
    /// local ports if it is unreachable
    pub async fn connect(config: CollectorConfig) -> Result<Self> {
        let client = match ClientBuilder::native().connect(&config.webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", config.webdriver_url);
                client
            }
            Err(e) => {
                ::log::warn!(
                    "Failed to connect to WebDriver at {}: {}",
                    config.webdriver_url,
                    e
                );
                Self::connect_fallback(&config.webdriver_url).await?
            }
        };

        Ok(Self { client, config })
    }

    async fn connect_fallback(primary: &str) -> Result<Client> {
        for url in FALLBACK_WEBDRIVER_URLS {
            if *url == primary {
                continue;
            }
            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = ClientBuilder::native().connect(url).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(client);
            }
        }

        ::log::error!("No WebDriver server reachable; is one running?");
        Err(Error::Connect(primary.to_string()))
    }

    /// Navigate to the store front and wait for it to load
    pub async fn goto_home(&mut self) -> Result<()> {
        ::log::info!("Navigating to {}", self.config.start_url);
        self.client.goto(&self.config.start_url).await?;

        let ready = self.config.selectors.page_ready.clone();
        self.wait_for(&ready).await?;
        Ok(())
    }

    /// Open the shop menu and select Men's
    pub async fn open_mens_shop(&mut self) -> Result<()> {
        let shop = self.config.selectors.shop_menu.clone();
        let mens = self.config.selectors.mens_menu.clone();

        self.wait_for(&shop).await?;
        self.click(&shop).await?;
        self.wait_for(&mens).await?;
        self.click(&mens).await?;

        ::log::info!("Opened shop menu and selected Men's");
        Ok(())
    }

    /// Open the Jackets category and confirm products came up
    pub async fn open_jackets(&mut self) -> Result<()> {
        let jackets = self.config.selectors.jackets_category.clone();
        self.wait_for(&jackets).await?;
        self.click(&jackets).await?;

        let products = self.config.selectors.product_item.clone();
        self.wait_for(&products).await?;

        ::log::info!("Opened Jackets category, products visible");
        Ok(())
    }

    /// Hover over the top-level menu so its flyout opens
    pub async fn hover_menu(&mut self) -> Result<()> {
        let sel = self.config.selectors.menu_root.clone();
        let element = self
            .client
            .find(Locator::Css(&sel))
            .await
            .map_err(|_| Error::ElementMissing(sel.clone()))?;

        let hover = MouseActions::new("mouse".to_string()).then(PointerAction::MoveToElement {
            element,
            duration: None,
            x: 0,
            y: 0,
        });
        self.client.perform_actions(hover).await?;

        ::log::debug!("Hovered over {}", sel);
        Ok(())
    }

    /// Open New & Features from the menu flyout and wait for the video feed
    pub async fn open_new_and_features(&mut self) -> Result<()> {
        let entry = self.config.selectors.new_and_features.clone();
        self.wait_for(&entry).await?;
        self.click(&entry).await?;

        let feed = self.config.selectors.video_feed.clone();
        self.wait_for(&feed).await?;

        ::log::info!("Opened New & Features, video feed visible");
        Ok(())
    }

    /// Survey the video feed tiles against an age cutoff
    pub async fn survey_video_feeds(&mut self, min_age_days: i64) -> Result<VideoSurvey> {
        let html = self.client.source().await?;
        videos::survey_feeds(&html, &self.config.selectors, min_age_days, Utc::now())
    }

    /// End the WebDriver session
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str) -> Result<()> {
        self.client
            .wait()
            .at_most(ELEMENT_WAIT)
            .for_element(Locator::Css(selector))
            .await
            .map_err(|e| Error::ElementMissing(format!("{selector}: {e}")))?;
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        self.client
            .find(Locator::Css(selector))
            .await
            .map_err(|_| Error::ElementMissing(selector.to_string()))?
            .click()
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PageAccessor for StoreSession {
    async fn list_items(&mut self) -> Result<Vec<ItemHandle>> {
        let html = self.client.source().await?;
        listing::parse_items(&html, &self.config.selectors)
    }

    async fn has_next_page(&mut self) -> Result<bool> {
        let html = self.client.source().await?;
        listing::parse_has_next(&html, &self.config.selectors)
    }

    async fn go_to_next_page(&mut self) -> Result<()> {
        let next = self.config.selectors.next_page.clone();
        let control = self
            .client
            .find(Locator::Css(&next))
            .await
            .map_err(|e| Error::Navigation(format!("next page control not found: {e}")))?;
        control
            .click()
            .await
            .map_err(|e| Error::Navigation(format!("next page control did not respond: {e}")))?;

        // The new page has to show products before collection resumes
        let products = self.config.selectors.product_item.clone();
        self.wait_for(&products)
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;
        Ok(())
    }
}
