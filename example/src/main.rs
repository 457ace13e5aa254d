//! Headless gallery session: a synthetic curated-photos feed scrolled from
//! top to bottom through the grid controller, with a mid-session resize.
//!
//! Run with `RUST_LOG=debug` to watch layout recomputation and windowing
//! decisions frame by frame.

use std::sync::Arc;

use pinwall_gallery::{
    ContainerBox, GalleryFeed, GridArgs, GridController, HostSignal, Photo, PhotoPage, PhotoSrc,
    SharedContainer, SignalBus, ViewportTracker,
};
use tracing::{error, info};

const PER_PAGE: u32 = 30;
const TOTAL_RESULTS: u32 = 120;
const CONTAINER_ORIGIN_Y: f32 = 96.0;
const SCROLL_STEP: f32 = 600.0;

/// Aspect ratios cycled through the synthetic feed, loosely matching what a
/// curated photo API returns.
const INTRINSIC_SIZES: [(u32, u32); 7] = [
    (1600, 900),
    (1080, 1350),
    (1000, 1500),
    (1200, 800),
    (1500, 1500),
    (900, 1600),
    (2000, 1250),
];

fn synthetic_photo(id: u64) -> Photo {
    let (width, height) = INTRINSIC_SIZES[id as usize % INTRINSIC_SIZES.len()];
    Photo {
        id,
        width,
        height,
        url: format!("https://photos.example/p/{id}"),
        photographer: format!("Photographer {}", id % 11),
        photographer_url: format!("https://photos.example/u/{}", id % 11),
        photographer_id: id % 11,
        avg_color: "#6f7b85".into(),
        src: PhotoSrc {
            medium: format!("https://images.example/{id}.jpg?h=350"),
            tiny: format!("https://images.example/{id}.jpg?h=200"),
            ..PhotoSrc::default()
        },
        liked: false,
        alt: format!("Synthetic photo {id}"),
    }
}

fn synthetic_page(page: u32) -> PhotoPage {
    let start = u64::from((page - 1) * PER_PAGE);
    PhotoPage {
        page,
        per_page: PER_PAGE,
        photos: (start..start + u64::from(PER_PAGE))
            .map(synthetic_photo)
            .collect(),
        total_results: TOTAL_RESULTS,
        next_page: (page * PER_PAGE < TOTAL_RESULTS)
            .then(|| format!("https://api.example/v1/curated?page={}", page + 1)),
    }
}

fn init_logging() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "info,pinwall_layout=debug,pinwall_gallery=debug",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("info"),
        },
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn load_next_page(feed: &mut GalleryFeed) {
    feed.begin_load();
    let next = feed.page() + 1;
    if let Err(err) = feed.append_page(synthetic_page(next)) {
        error!(%err, "page append rejected");
        feed.abort_load();
    }
}

fn main() {
    init_logging();

    let bus = SignalBus::new();
    let container = SharedContainer::new(ContainerBox {
        content_width: 1184.0,
        origin_y: CONTAINER_ORIGIN_Y,
    });
    let tracker = ViewportTracker::attach(&bus, Arc::new(container.clone()), 800.0);
    let mut controller = GridController::new(GridArgs::default(), tracker.handle());
    let mut feed = GalleryFeed::new();

    load_next_page(&mut feed);

    // Scroll from the top of the page to the bottom of the grid, paging in
    // more photos whenever the plan asks for them.
    let mut offset = 0.0;
    loop {
        bus.emit(HostSignal::Scroll { offset });
        let plan = controller.plan(feed.photos(), feed.revision(), feed.loading(), feed.has_more());
        info!(
            offset,
            visible = plan.visible.len(),
            photos = feed.len(),
            container_height = plan.container_height,
            "frame"
        );
        if plan.should_load_more {
            load_next_page(&mut feed);
        }
        if !feed.has_more() && offset > plan.container_height + CONTAINER_ORIGIN_Y {
            break;
        }
        offset += SCROLL_STEP;
    }

    // The window narrows below the 768 px breakpoint: the container reflows
    // to two columns on the next plan.
    container.set(ContainerBox {
        content_width: 700.0,
        origin_y: CONTAINER_ORIGIN_Y,
    });
    bus.emit(HostSignal::Resize {
        width: 732.0,
        height: 640.0,
    });
    let plan = controller.plan(feed.photos(), feed.revision(), feed.loading(), feed.has_more());
    info!(
        columns = tracker.column_count(),
        visible = plan.visible.len(),
        container_height = plan.container_height,
        "after resize"
    );

    // Route a clicked tile the way the navigation layer would.
    if let Some(slot) = plan.visible.first()
        && let Some(photo) = feed.photo(slot.id)
    {
        info!(id = photo.id, photographer = %photo.photographer, "clicked tile resolved");
    }

    info!(
        layout_passes = controller.layout_passes(),
        photos = feed.len(),
        "session complete"
    );
}
