use async_trait::async_trait;

use crate::error::Result;

/// Fields a listing item can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    /// Product title
    Title,
    /// Display price
    Price,
    /// Promotional badge (e.g. "Top Seller"), often absent
    Badge,
}

/// Snapshot of a single listing tile, captured when the page was read.
///
/// Handles are ephemeral: they describe what was on screen at read time and
/// hold no connection back to the live page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemHandle {
    title: Option<String>,
    price: Option<String>,
    badge: Option<String>,
}

impl ItemHandle {
    /// Create a handle from the fields read off a product tile
    pub fn new(title: Option<String>, price: Option<String>, badge: Option<String>) -> Self {
        Self {
            title,
            price,
            badge,
        }
    }

    fn get(&self, field: ItemField) -> Option<&str> {
        match field {
            ItemField::Title => self.title.as_deref(),
            ItemField::Price => self.price.as_deref(),
            ItemField::Badge => self.badge.as_deref(),
        }
    }
}

/// Read side of a paginated listing page.
///
/// Implementations must answer `has_next_page` from live page state on every
/// call; caching the answer across a `go_to_next_page` can end a collection
/// run one page early or never.
#[async_trait]
pub trait PageAccessor {
    /// Items visible on the current page, in on-page order
    async fn list_items(&mut self) -> Result<Vec<ItemHandle>>;

    /// Whether a further page is reachable from the current page
    async fn has_next_page(&mut self) -> Result<bool>;

    /// Advance to the next page
    async fn go_to_next_page(&mut self) -> Result<()>;

    /// Field value for an item; a missing field reads as an empty string
    fn field_of(&self, item: &ItemHandle, field: ItemField) -> String {
        item.get(field).unwrap_or_default().to_string()
    }
}
