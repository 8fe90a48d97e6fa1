//! Demo item sources.
//!
//! The engine only ever sees borrowed [`GridItem`]s; this module supplies
//! them for the demo binary, either generated by a deterministic simulated
//! feed (paged, with artificial fetch latency) or loaded from a JSON file.

use crate::model::GridItem;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from loading item files.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Failed to read the item file.
    #[error("Failed to read items from {path:?}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid JSON card array.
    #[error("Invalid JSON in {path:?}: {source}")]
    Parse {
        /// Path with invalid JSON.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// One demo card. Serialization matches the JSON item-file format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    /// Stable identity; cards without one are filtered out of layout.
    #[serde(default)]
    pub id: Option<String>,
    /// Display title.
    pub title: String,
    /// Source pixel width, if known.
    #[serde(default)]
    pub width: Option<f64>,
    /// Source pixel height, if known.
    #[serde(default)]
    pub height: Option<f64>,
    /// Explicit aspect ratio, if known.
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    /// Color accent index used by the demo renderer.
    #[serde(default)]
    pub tint: u8,
}

impl GridItem for Card {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn width(&self) -> Option<f64> {
        self.width
    }

    fn height(&self) -> Option<f64> {
        self.height
    }

    fn aspect_ratio(&self) -> Option<f64> {
        self.aspect_ratio
    }
}

/// Loads cards from a JSON file containing an array of [`Card`] objects.
pub fn load_cards(path: impl Into<PathBuf>) -> Result<Vec<Card>, FeedError> {
    let path = path.into();
    let contents = std::fs::read_to_string(&path).map_err(|source| FeedError::Read {
        path: path.clone(),
        source,
    })?;
    let cards: Vec<Card> =
        serde_json::from_str(&contents).map_err(|source| FeedError::Parse { path, source })?;
    info!(count = cards.len(), "loaded item file");
    Ok(cards)
}

/// Deterministic simulated paged feed.
///
/// Pages are generated from an xorshift stream seeded at construction, so
/// a given seed always produces the same cards. Fetches complete after a
/// configurable artificial delay, which is what gives the infinite-scroll
/// trigger something real to wait on.
#[derive(Debug)]
pub struct ItemFeed {
    state: u64,
    page_size: usize,
    delay: Duration,
    produced: usize,
    generated: usize,
    limit: Option<usize>,
    in_flight: Option<Instant>,
}

impl ItemFeed {
    /// Creates a feed producing `page_size` cards per fetch, completing
    /// each fetch `delay` after it starts. `limit` caps the total number
    /// of cards (`None` scrolls forever).
    pub fn new(seed: u64, page_size: usize, delay: Duration, limit: Option<usize>) -> Self {
        Self {
            // Xorshift must not start at zero.
            state: seed.max(1),
            page_size,
            delay,
            produced: 0,
            generated: 0,
            limit,
            in_flight: None,
        }
    }

    /// Whether the feed claims more pages exist.
    pub fn has_more(&self) -> bool {
        match self.limit {
            Some(limit) => self.produced < limit,
            None => true,
        }
    }

    /// Whether a fetch is currently outstanding.
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts a fetch. Ignored while one is already outstanding.
    pub fn begin_fetch(&mut self, now: Instant) {
        if self.in_flight.is_none() && self.has_more() {
            debug!(produced = self.produced, "fetch started");
            self.in_flight = Some(now + self.delay);
        }
    }

    /// Completes the outstanding fetch once its delay has elapsed,
    /// returning the new page. `None` while still in flight or idle.
    pub fn poll(&mut self, now: Instant) -> Option<Vec<Card>> {
        let deadline = self.in_flight?;
        if now < deadline {
            return None;
        }
        self.in_flight = None;

        let mut count = self.page_size;
        if let Some(limit) = self.limit {
            count = count.min(limit - self.produced);
        }
        let page: Vec<Card> = (0..count).map(|_| self.next_card()).collect();
        self.produced += page.len();
        info!(page = page.len(), produced = self.produced, "fetch completed");
        Some(page)
    }

    fn next_card(&mut self) -> Card {
        self.generated += 1;
        let n = self.generated;
        let roll = self.next_u64();

        // Mix aspect sources: most cards carry a width/height pair, some
        // only an explicit ratio, some nothing (square fallback), and a
        // few have no identity at all to exercise the validity filter.
        match roll % 10 {
            0..=5 => {
                let width = 200.0 + (roll >> 8) as f64 % 400.0;
                let height = 150.0 + (roll >> 20) as f64 % 500.0;
                Card {
                    id: Some(format!("card-{n}")),
                    title: format!("Card {n}"),
                    width: Some(width),
                    height: Some(height),
                    aspect_ratio: None,
                    tint: (roll % 7) as u8,
                }
            }
            6..=7 => Card {
                id: Some(format!("card-{n}")),
                title: format!("Card {n}"),
                width: None,
                height: None,
                aspect_ratio: Some(0.5 + (roll >> 8) as f64 % 16.0 / 8.0),
                tint: (roll % 7) as u8,
            },
            8 => Card {
                id: Some(format!("card-{n}")),
                title: format!("Card {n}"),
                width: None,
                height: None,
                aspect_ratio: None,
                tint: (roll % 7) as u8,
            },
            _ => Card {
                id: None,
                title: format!("Card {n} (no id)"),
                width: None,
                height: None,
                aspect_ratio: None,
                tint: 0,
            },
        }
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}
