use std::fmt;

use crate::accessor::{ItemField, PageAccessor};
use crate::error::Result;

/// One collected listing entry, tagged with the page it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedRecord {
    /// 1-based listing page the item was read from
    pub page: u32,
    pub title: String,
    pub price: String,
    pub badge: String,
}

impl fmt::Display for CollectedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Page {} - Title: {}, Price: {}, Top Seller: {}",
            self.page, self.title, self.price, self.badge
        )
    }
}

/// Ordered outcome of one collection run: page order, then on-page order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionResult {
    records: Vec<CollectedRecord>,
}

impl CollectionResult {
    /// Build a result from already-collected records
    pub fn from_records(records: Vec<CollectedRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CollectedRecord] {
        &self.records
    }
}

/// Walks every listing page reachable from the current one and collects the
/// product fields it finds.
///
/// The body runs at least once, so a first page with zero items still yields
/// an (empty) result. Continuation is decided by one predicate -
/// `has_next_page` - asked of the page the session is on right now, never a
/// value cached from before the last navigation. `page_cap` bounds the walk
/// for store fronts whose pagination control never disables.
pub async fn collect<A: PageAccessor>(
    accessor: &mut A,
    page_cap: Option<u32>,
) -> Result<CollectionResult> {
    let mut records = Vec::new();
    let mut page: u32 = 1;

    loop {
        let items = accessor.list_items().await?;
        ::log::info!("Collecting {} items from page {}", items.len(), page);

        for item in &items {
            let record = CollectedRecord {
                page,
                title: accessor.field_of(item, ItemField::Title),
                price: accessor.field_of(item, ItemField::Price),
                badge: accessor.field_of(item, ItemField::Badge),
            };
            ::log::debug!("Collected: {}", record);
            records.push(record);
        }

        if !accessor.has_next_page().await? {
            break;
        }

        if let Some(cap) = page_cap {
            if page >= cap {
                ::log::warn!(
                    "Stopping at page cap {} with a next page still advertised",
                    cap
                );
                break;
            }
        }

        accessor.go_to_next_page().await?;
        page += 1;
    }

    ::log::info!("Collected {} records across {} pages", records.len(), page);
    Ok(CollectionResult { records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::ItemHandle;
    use crate::error::Error;
    use async_trait::async_trait;

    /// In-memory accessor backed by a script of pages
    struct ScriptedPages {
        pages: Vec<Vec<ItemHandle>>,
        current: usize,
        /// 0-based page index whose navigation attempt fails
        fail_advance_to: Option<usize>,
    }

    impl ScriptedPages {
        fn new(pages: Vec<Vec<ItemHandle>>) -> Self {
            Self {
                pages,
                current: 0,
                fail_advance_to: None,
            }
        }
    }

    #[async_trait]
    impl PageAccessor for ScriptedPages {
        async fn list_items(&mut self) -> Result<Vec<ItemHandle>> {
            Ok(self.pages[self.current].clone())
        }

        async fn has_next_page(&mut self) -> Result<bool> {
            Ok(self.current + 1 < self.pages.len())
        }

        async fn go_to_next_page(&mut self) -> Result<()> {
            if self.fail_advance_to == Some(self.current + 1) {
                return Err(Error::Navigation(
                    "next page control did not respond".to_string(),
                ));
            }
            self.current += 1;
            Ok(())
        }
    }

    fn item(title: &str, price: &str, badge: &str) -> ItemHandle {
        let badge = (!badge.is_empty()).then(|| badge.to_string());
        ItemHandle::new(Some(title.to_string()), Some(price.to_string()), badge)
    }

    #[tokio::test]
    async fn test_collects_across_pages_in_order() {
        let mut pages = ScriptedPages::new(vec![
            vec![item("Jacket A", "$50", "Top Seller"), item("Jacket B", "$40", "")],
            vec![item("Jacket C", "$60", "Top Seller")],
        ]);

        let result = collect(&mut pages, None).await.unwrap();

        assert_eq!(result.len(), 3);
        let tagged: Vec<u32> = result.records().iter().map(|r| r.page).collect();
        assert_eq!(tagged, vec![1, 1, 2]);
        assert_eq!(result.records()[0].title, "Jacket A");
        assert_eq!(result.records()[1].badge, "");
        assert_eq!(result.records()[2].price, "$60");
    }

    #[tokio::test]
    async fn test_single_page_visited_exactly_once() {
        let mut pages =
            ScriptedPages::new(vec![vec![item("Jacket A", "$50", ""), item("Jacket B", "$40", "")]]);

        let result = collect(&mut pages, None).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.records().iter().all(|r| r.page == 1));
        assert_eq!(pages.current, 0);
    }

    #[tokio::test]
    async fn test_empty_first_page_yields_empty_result() {
        let mut pages = ScriptedPages::new(vec![vec![]]);

        let result = collect(&mut pages, None).await.unwrap();

        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
    }

    #[tokio::test]
    async fn test_navigation_failure_aborts_run() {
        let mut pages = ScriptedPages::new(vec![
            vec![item("Jacket A", "$50", "")],
            vec![item("Jacket B", "$40", "")],
            vec![item("Jacket C", "$60", "")],
        ]);
        pages.fail_advance_to = Some(2);

        let err = collect(&mut pages, None).await.unwrap_err();
        assert!(matches!(err, Error::Navigation(_)));
    }

    #[tokio::test]
    async fn test_page_cap_stops_runaway_pagination() {
        /// Accessor that always advertises a next page
        struct EndlessPages {
            visits: u32,
        }

        #[async_trait]
        impl PageAccessor for EndlessPages {
            async fn list_items(&mut self) -> Result<Vec<ItemHandle>> {
                self.visits += 1;
                Ok(vec![item("Jacket", "$10", "")])
            }
            async fn has_next_page(&mut self) -> Result<bool> {
                Ok(true)
            }
            async fn go_to_next_page(&mut self) -> Result<()> {
                Ok(())
            }
        }

        let mut endless = EndlessPages { visits: 0 };
        let result = collect(&mut endless, Some(5)).await.unwrap();

        assert_eq!(endless.visits, 5);
        assert_eq!(result.len(), 5);
        assert_eq!(result.records().last().unwrap().page, 5);
    }

    #[tokio::test]
    async fn test_missing_fields_read_as_empty_strings() {
        let mut pages = ScriptedPages::new(vec![vec![ItemHandle::default()]]);

        let result = collect(&mut pages, None).await.unwrap();

        assert_eq!(result.len(), 1);
        let record = &result.records()[0];
        assert_eq!(record.title, "");
        assert_eq!(record.price, "");
        assert_eq!(record.badge, "");
    }

    #[test]
    fn test_record_display_format() {
        let record = CollectedRecord {
            page: 2,
            title: "Jacket C".to_string(),
            price: "$60".to_string(),
            badge: "Top Seller".to_string(),
        };
        assert_eq!(
            record.to_string(),
            "Page 2 - Title: Jacket C, Price: $60, Top Seller: Top Seller"
        );
    }
}
