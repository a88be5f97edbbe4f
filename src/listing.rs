use scraper::{ElementRef, Html, Selector};

use crate::accessor::ItemHandle;
use crate::config::Selectors;
use crate::error::{Error, Result};

/// Extracts the product tiles from listing page source, in document order
pub fn parse_items(html: &str, selectors: &Selectors) -> Result<Vec<ItemHandle>> {
    let doc = Html::parse_document(html);
    let item_sel = css(&selectors.product_item)?;
    let title_sel = css(&selectors.product_title)?;
    let price_sel = css(&selectors.product_price)?;
    let badge_sel = css(&selectors.top_seller_badge)?;

    let mut items = Vec::new();
    for tile in doc.select(&item_sel) {
        items.push(ItemHandle::new(
            text_of(tile, &title_sel),
            text_of(tile, &price_sel),
            text_of(tile, &badge_sel),
        ));
    }

    ::log::debug!("Listing parser found {} product tiles", items.len());
    Ok(items)
}

/// True when a usable next-page control is present on the page.
///
/// A control that is rendered but marked disabled (last page) does not count.
pub fn parse_has_next(html: &str, selectors: &Selectors) -> Result<bool> {
    let doc = Html::parse_document(html);
    let next_sel = css(&selectors.next_page)?;

    let usable = doc.select(&next_sel).any(|el| {
        let v = el.value();
        v.attr("disabled").is_none() && v.attr("aria-disabled") != Some("true")
    });
    Ok(usable)
}

/// True when at least one product tile is present
pub fn has_products(html: &str, selectors: &Selectors) -> Result<bool> {
    let doc = Html::parse_document(html);
    let item_sel = css(&selectors.product_item)?;
    Ok(doc.select(&item_sel).next().is_some())
}

/// Compile a configured CSS selector, surfacing bad config as an error
pub(crate) fn css(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| Error::Selector(selector.to_string()))
}

/// Whitespace-normalized text of the first match under a tile, None when the
/// element is absent or blank
fn text_of(tile: ElementRef<'_>, selector: &Selector) -> Option<String> {
    tile.select(selector)
        .next()
        .map(|el| {
            el.text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|text| !text.is_empty())
}
