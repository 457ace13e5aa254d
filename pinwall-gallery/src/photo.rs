//! The photo record and page envelope handed over by the image API
//! collaborator.
//!
//! The shapes mirror a curated-photos API response: a photo carries intrinsic
//! pixel dimensions, attribution, and a set of pre-rendered source URLs. The
//! grid only consumes the identifier and the intrinsic dimensions; everything
//! else is display payload passed through untouched.

use pinwall_layout::{Size, Tile};
use serde::{Deserialize, Serialize};

/// Pre-rendered source URLs for one photo, keyed by rendition.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSrc {
    /// The unmodified upload.
    pub original: String,
    /// Large rendition at double pixel density.
    pub large2x: String,
    /// Large rendition.
    pub large: String,
    /// Medium rendition, the usual grid tile source.
    pub medium: String,
    /// Small rendition.
    pub small: String,
    /// Portrait-cropped rendition.
    pub portrait: String,
    /// Landscape-cropped rendition.
    pub landscape: String,
    /// Tiny placeholder rendition.
    pub tiny: String,
}

/// One photo record from the image API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Stable unique identifier.
    pub id: u64,
    /// Intrinsic width of the upload in pixels.
    pub width: u32,
    /// Intrinsic height of the upload in pixels.
    pub height: u32,
    /// Canonical page URL for the photo.
    pub url: String,
    /// Attribution name.
    pub photographer: String,
    /// Attribution profile URL.
    pub photographer_url: String,
    /// Photographer account identifier.
    #[serde(default)]
    pub photographer_id: u64,
    /// Average color of the photo, as a CSS hex string. Usable as a
    /// placeholder fill while the image loads.
    #[serde(default)]
    pub avg_color: String,
    /// Pre-rendered source URLs.
    pub src: PhotoSrc,
    /// Whether the requesting account has liked the photo.
    #[serde(default)]
    pub liked: bool,
    /// Alternative text, passed through to the presentation layer.
    #[serde(default)]
    pub alt: String,
}

impl Tile for Photo {
    fn id(&self) -> u64 {
        self.id
    }

    fn intrinsic_size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

/// One page of photos plus the pagination metadata needed to derive whether
/// more pages are available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoPage {
    /// One-based page cursor.
    pub page: u32,
    /// Requested page size.
    pub per_page: u32,
    /// The photos on this page, in display order.
    pub photos: Vec<Photo>,
    /// Total number of results across all pages.
    pub total_results: u32,
    /// Opaque URL of the next page, when the API advertises one.
    #[serde(default)]
    pub next_page: Option<String>,
}
