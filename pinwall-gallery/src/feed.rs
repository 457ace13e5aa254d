//! Accumulated photo sequence and pagination cursor.
//!
//! ## Usage
//!
//! [`GalleryFeed`] is the boundary between the grid and whatever performs the
//! actual network retrieval. The fetching collaborator calls [`begin_load`]
//! before a request, then hands the parsed [`PhotoPage`] to [`append_page`].
//! The feed validates the page cursor, extends the photo sequence, and
//! derives whether more pages remain.
//!
//! Every mutation bumps a revision counter. The grid controller keys its
//! layout memoization on that revision, so consumers never diff the photo
//! sequence itself.
//!
//! [`begin_load`]: GalleryFeed::begin_load
//! [`append_page`]: GalleryFeed::append_page

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::photo::{Photo, PhotoPage};

/// Contract violations at the pagination boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The appended page does not follow the current cursor.
    #[error("page {got} does not follow the current cursor (expected page {expected})")]
    PageOutOfOrder {
        /// The page number the feed expected next.
        expected: u32,
        /// The page number that was actually appended.
        got: u32,
    },
}

/// The ordered photo sequence plus pagination state.
#[derive(Debug, Default)]
pub struct GalleryFeed {
    photos: Vec<Photo>,
    by_id: FxHashMap<u64, usize>,
    page: u32,
    has_more: bool,
    loading: bool,
    revision: u64,
}

impl GalleryFeed {
    /// Creates an empty feed positioned before the first page.
    pub fn new() -> Self {
        Self {
            has_more: true,
            ..Self::default()
        }
    }

    /// The accumulated photos, in display order.
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Number of accumulated photos.
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Returns true if no page has contributed any photos yet.
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Looks up a photo by its identifier, for routing a clicked tile to the
    /// navigation collaborator. When the API repeats a photo across pages the
    /// most recently appended instance wins.
    pub fn photo(&self, id: u64) -> Option<&Photo> {
        self.by_id.get(&id).and_then(|&index| self.photos.get(index))
    }

    /// The last successfully appended page number, zero before the first.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Whether the pagination metadata indicates further pages.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a page request is currently in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Monotonically increasing counter, bumped on every content mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Marks a page request as in flight.
    ///
    /// Request de-duplication and cancellation belong to the fetching
    /// collaborator; the feed only tracks the flag for pass-through to the
    /// presentation layer.
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Clears the in-flight flag without appending, for failed requests.
    pub fn abort_load(&mut self) {
        self.loading = false;
    }

    /// Appends the next page of photos.
    ///
    /// The page cursor must be the direct successor of the last appended
    /// page. On success the photo sequence grows, `has_more` is re-derived
    /// from the page totals, the in-flight flag clears, and the revision is
    /// bumped.
    pub fn append_page(&mut self, page: PhotoPage) -> Result<(), FeedError> {
        let expected = self.page + 1;
        if page.page != expected {
            return Err(FeedError::PageOutOfOrder {
                expected,
                got: page.page,
            });
        }

        let total_pages = if page.per_page == 0 {
            0
        } else {
            page.total_results.div_ceil(page.per_page)
        };
        self.has_more = !page.photos.is_empty() && page.page < total_pages;

        for photo in page.photos {
            self.by_id.insert(photo.id, self.photos.len());
            self.photos.push(photo);
        }
        self.page = page.page;
        self.loading = false;
        self.revision += 1;
        debug!(
            page = self.page,
            photos = self.photos.len(),
            has_more = self.has_more,
            "feed page appended"
        );
        Ok(())
    }

    /// Discards all photos and rewinds the cursor, for a fresh query.
    pub fn reset(&mut self) {
        self.photos.clear();
        self.by_id.clear();
        self.page = 0;
        self.has_more = true;
        self.loading = false;
        self.revision += 1;
        debug!("feed reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::PhotoSrc;

    fn photo(id: u64) -> Photo {
        Photo {
            id,
            width: 1200,
            height: 800,
            url: format!("https://photos.example/{id}"),
            photographer: "Ada".into(),
            photographer_url: "https://photos.example/ada".into(),
            photographer_id: 1,
            avg_color: "#404040".into(),
            src: PhotoSrc::default(),
            liked: false,
            alt: String::new(),
        }
    }

    fn page(number: u32, ids: std::ops::Range<u64>, total_results: u32) -> PhotoPage {
        PhotoPage {
            page: number,
            per_page: 30,
            photos: ids.map(photo).collect(),
            total_results,
            next_page: None,
        }
    }

    #[test]
    fn test_new_feed_expects_first_page() {
        let feed = GalleryFeed::new();
        assert!(feed.is_empty());
        assert_eq!(feed.page(), 0);
        assert!(feed.has_more());
        assert!(!feed.loading());
    }

    #[test]
    fn test_append_extends_sequence_and_bumps_revision() {
        let mut feed = GalleryFeed::new();
        let before = feed.revision();
        feed.begin_load();
        assert!(feed.loading());
        feed.append_page(page(1, 0..30, 100)).expect("first page");
        assert_eq!(feed.len(), 30);
        assert_eq!(feed.page(), 1);
        assert!(!feed.loading());
        assert!(feed.revision() > before);

        feed.append_page(page(2, 30..60, 100)).expect("second page");
        assert_eq!(feed.len(), 60);
        assert_eq!(feed.photos()[30].id, 30);
    }

    #[test]
    fn test_out_of_order_page_rejected() {
        let mut feed = GalleryFeed::new();
        feed.append_page(page(1, 0..30, 100)).expect("first page");
        let err = feed
            .append_page(page(3, 60..90, 100))
            .expect_err("page 3 must not follow page 1");
        assert_eq!(err, FeedError::PageOutOfOrder { expected: 2, got: 3 });
        // A rejected page leaves the feed untouched.
        assert_eq!(feed.len(), 30);
        assert_eq!(feed.page(), 1);
    }

    #[test]
    fn test_has_more_derivation() {
        let mut feed = GalleryFeed::new();
        feed.append_page(page(1, 0..30, 100)).expect("page 1");
        assert!(feed.has_more()); // 100 results at 30 per page is 4 pages

        feed.append_page(page(2, 30..60, 100)).expect("page 2");
        feed.append_page(page(3, 60..90, 100)).expect("page 3");
        assert!(feed.has_more());

        feed.append_page(page(4, 90..100, 100)).expect("page 4");
        assert!(!feed.has_more());
    }

    #[test]
    fn test_empty_page_ends_feed() {
        let mut feed = GalleryFeed::new();
        feed.append_page(page(1, 0..0, 100)).expect("empty page");
        assert!(!feed.has_more());
    }

    #[test]
    fn test_photo_lookup() {
        let mut feed = GalleryFeed::new();
        feed.append_page(page(1, 0..30, 30)).expect("page");
        assert_eq!(feed.photo(12).map(|p| p.id), Some(12));
        assert!(feed.photo(999).is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut feed = GalleryFeed::new();
        feed.append_page(page(1, 0..30, 30)).expect("page");
        let before = feed.revision();
        feed.begin_load();
        feed.reset();
        assert!(feed.is_empty());
        assert_eq!(feed.page(), 0);
        assert!(feed.has_more());
        assert!(!feed.loading());
        assert!(feed.photo(3).is_none());
        assert!(feed.revision() > before);
        feed.append_page(page(1, 100..130, 30)).expect("fresh page");
        assert_eq!(feed.len(), 30);
    }

    #[test]
    fn test_abort_load_clears_flag() {
        let mut feed = GalleryFeed::new();
        feed.begin_load();
        feed.abort_load();
        assert!(!feed.loading());
    }

    #[test]
    fn test_page_deserializes_from_api_json() {
        let raw = r##"{
            "page": 1,
            "per_page": 2,
            "photos": [
                {
                    "id": 1181292,
                    "width": 3756,
                    "height": 5627,
                    "url": "https://photos.example/p/1181292",
                    "photographer": "Sam",
                    "photographer_url": "https://photos.example/sam",
                    "photographer_id": 680589,
                    "avg_color": "#978E82",
                    "src": {
                        "original": "https://images.example/1181292.jpg",
                        "large2x": "https://images.example/1181292.jpg?w=1880",
                        "large": "https://images.example/1181292.jpg?w=940",
                        "medium": "https://images.example/1181292.jpg?h=350",
                        "small": "https://images.example/1181292.jpg?h=130",
                        "portrait": "https://images.example/1181292.jpg?fit=crop&h=1200&w=800",
                        "landscape": "https://images.example/1181292.jpg?fit=crop&h=627&w=1200",
                        "tiny": "https://images.example/1181292.jpg?fit=crop&h=200&w=280"
                    },
                    "liked": false,
                    "alt": "Woman in white dress"
                },
                {
                    "id": 2014422,
                    "width": 3024,
                    "height": 3024,
                    "url": "https://photos.example/p/2014422",
                    "photographer": "Joey",
                    "photographer_url": "https://photos.example/joey",
                    "photographer_id": 680590,
                    "src": {
                        "original": "https://images.example/2014422.jpg",
                        "large2x": "https://images.example/2014422.jpg?w=1880",
                        "large": "https://images.example/2014422.jpg?w=940",
                        "medium": "https://images.example/2014422.jpg?h=350",
                        "small": "https://images.example/2014422.jpg?h=130",
                        "portrait": "https://images.example/2014422.jpg?fit=crop&h=1200&w=800",
                        "landscape": "https://images.example/2014422.jpg?fit=crop&h=627&w=1200",
                        "tiny": "https://images.example/2014422.jpg?fit=crop&h=200&w=280"
                    },
                    "alt": "Brown rocks during golden hour"
                }
            ],
            "total_results": 8000,
            "next_page": "https://api.example/v1/curated?page=2"
        }"##;
        let parsed: PhotoPage = serde_json::from_str(raw).expect("page parses");
        assert_eq!(parsed.photos.len(), 2);
        assert_eq!(parsed.photos[0].id, 1181292);
        assert_eq!(parsed.photos[1].avg_color, "");
        assert!(!parsed.photos[1].liked);

        let mut feed = GalleryFeed::new();
        feed.append_page(parsed).expect("fixture page");
        assert_eq!(feed.len(), 2);
        assert!(feed.has_more());
    }
}
