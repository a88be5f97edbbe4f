use chrono::{DateTime, Duration, NaiveDate, Utc};
use scraper::Html;

use crate::config::Selectors;
use crate::error::{Error, Result};
use crate::listing::css;

/// Counts from one look at the video feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoSurvey {
    /// Every feed tile on the page
    pub total: usize,
    /// Tiles whose posted timestamp is at or before the age cutoff
    pub older_than_cutoff: usize,
}

impl VideoSurvey {
    /// A feed page with nothing on it means the navigation went somewhere
    /// wrong; surface it rather than reporting zeros
    pub fn validate(&self) -> Result<()> {
        if self.total == 0 {
            return Err(Error::EmptySurvey);
        }
        Ok(())
    }
}

/// Count all video feed tiles on the page
pub fn count_feeds(html: &str, selectors: &Selectors) -> Result<usize> {
    let doc = Html::parse_document(html);
    let feed_sel = css(&selectors.video_feed)?;
    Ok(doc.select(&feed_sel).count())
}

/// Survey the feed tiles against an age cutoff, relative to `now`.
///
/// Each tile publishes its posted time through the configured attribute,
/// either RFC 3339 or plain `YYYY-MM-DD`. Tiles without a readable timestamp
/// count toward the total but are skipped for the age comparison.
pub fn survey_feeds(
    html: &str,
    selectors: &Selectors,
    min_age_days: i64,
    now: DateTime<Utc>,
) -> Result<VideoSurvey> {
    let doc = Html::parse_document(html);
    let feed_sel = css(&selectors.video_feed)?;
    let cutoff = now - Duration::days(min_age_days);

    let mut total = 0;
    let mut older = 0;
    for tile in doc.select(&feed_sel) {
        total += 1;

        let Some(raw) = tile.value().attr(&selectors.video_posted_attr) else {
            ::log::debug!(
                "Video tile is missing the {} attribute",
                selectors.video_posted_attr
            );
            continue;
        };

        match parse_posted(raw) {
            Some(posted) if posted <= cutoff => older += 1,
            Some(_) => {}
            None => ::log::debug!("Unreadable posted timestamp on video tile: {}", raw),
        }
    }

    ::log::info!(
        "Video feed survey: {} total, {} older than {} days",
        total,
        older,
        min_age_days
    );
    Ok(VideoSurvey {
        total,
        older_than_cutoff: older,
    })
}

/// Parse RFC 3339 first, then the date-only form at midnight UTC
fn parse_posted(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(posted) = DateTime::parse_from_rfc3339(raw) {
        return Some(posted.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}
