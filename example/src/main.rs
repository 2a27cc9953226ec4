//! Feed assembly demo: seeds a themed catalog, paginates it to exhaustion
//! while placing every snapshot into a two-column masonry layout, then pokes
//! the interaction toggles.
//!
//! Run with `RUST_LOG=debug` to see the placement and pagination traces.

use parking_lot::RwLock;
use pinfeed::{
    EstimatorArgs, FeedArgs, FeedPhase, FeedSession, ImageSource, LayoutError, LoadOutcome,
    MasonryArgs, Pin, PinDimensions, PinStore, ScrollMetrics, place_items,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const VIEWPORT_HEIGHT: f32 = 640.0;

fn seed_catalog() -> Vec<Pin> {
    let estimator = EstimatorArgs::default();
    let mut pins = vec![
        Pin::new("tg-01", ImageSource::Remote("https://images.example/anteiku.jpg".into()))
            .title("Anteiku counter at dusk".to_string())
            .author("touka_k".to_string())
            .like_count(128)
            .dimensions(PinDimensions::new(1000.0, 1500.0)),
        Pin::new("tg-02", ImageSource::Local(2))
            .title("Rainy 20th ward alley".to_string())
            .author("kaneki.k".to_string())
            .like_count(64),
        Pin::new("tg-03", ImageSource::Remote("https://images.example/mask.jpg".into()))
            .title("Mask sketch, first fitting".to_string())
            .author("uta".to_string())
            .like_count(311)
            .dimensions(PinDimensions::new(1200.0, 800.0)),
        Pin::new("tg-04", ImageSource::Local(4))
            .title("Coffee, black, no sugar".to_string())
            .author("yoshimura".to_string())
            .like_count(92),
        Pin::new("tg-05", ImageSource::Remote("https://images.example/books.jpg".into()))
            .title("Takatsuki paperbacks, annotated".to_string())
            .author("kaneki.k".to_string())
            .like_count(45),
        Pin::new("tg-06", ImageSource::Local(6))
            .title("Red spider lily field".to_string())
            .author("rize".to_string())
            .like_count(870)
            .dimensions(PinDimensions::new(900.0, 1600.0)),
        Pin::new("tg-07", ImageSource::Remote("https://images.example/ward.jpg".into()))
            .title("Ward map, hand drawn".to_string())
            .author("hinami".to_string())
            .like_count(23),
        Pin::new("tg-08", ImageSource::Local(8))
            .title("Night skyline from the roof".to_string())
            .author("touka_k".to_string())
            .like_count(156),
        Pin::new("tg-09", ImageSource::Remote("https://images.example/latte.jpg".into()))
            .title("Latte art practice #12".to_string())
            .author("irimi".to_string())
            .like_count(77),
        Pin::new("tg-10", ImageSource::Local(10))
            .title("Umbrellas on the bridge".to_string())
            .author("nishiki".to_string())
            .like_count(39),
        Pin::new("tg-11", ImageSource::Remote("https://images.example/street.jpg".into()))
            .title("Backstreet neon study".to_string())
            .author("uta".to_string())
            .like_count(204),
        Pin::new("tg-12", ImageSource::Local(12))
            .title("Window seat, afternoon light".to_string())
            .author("hinami".to_string())
            .like_count(58),
    ];
    estimator.enrich_dimensions(&mut pins);
    pins
}

fn main() -> Result<(), LayoutError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = RwLock::new(PinStore::with_catalog(seed_catalog()));
    store.write().record_upload(
        Pin::new("upload-01", ImageSource::Remote("https://images.example/mine.jpg".into()))
            .title("My first upload".to_string())
            .author("you".to_string()),
    );

    let mut session = FeedSession::new(FeedArgs::default().page_size(5));
    session.set_uploaded(store.read().uploaded().to_vec());

    let layout_args = MasonryArgs::default();
    let mut content_height = 0.0;

    // Simulate a user parked at the bottom of the feed until the catalog
    // runs out.
    loop {
        let metrics = ScrollMetrics {
            content_height,
            viewport_height: VIEWPORT_HEIGHT,
            offset: (content_height - VIEWPORT_HEIGHT).max(0.0),
        };
        let outcome = {
            let store = store.read();
            session.maybe_load_more(metrics, &*store)
        };
        match outcome {
            LoadOutcome::Appended(count) => info!(count, "batch appended"),
            LoadOutcome::Exhausted => info!("catalog exhausted"),
            LoadOutcome::Skipped => {}
        }

        let feed = session.combined();
        let layout = place_items(&feed, &layout_args)?;
        content_height = layout.estimated_height();
        info!(
            items = feed.len(),
            left = layout.column_height(0).unwrap_or(0.0),
            right = layout.column_height(1).unwrap_or(0.0),
            estimated_height = content_height,
            "feed snapshot"
        );

        if session.phase() == FeedPhase::Exhausted {
            break;
        }
    }

    session.toggle_like("tg-03");
    session.toggle_save("upload-01");
    let feed = session.combined();
    let liked = feed.iter().filter(|pin| pin.is_liked).count();
    let saved = feed.iter().filter(|pin| pin.is_saved).count();
    info!(items = feed.len(), liked, saved, "final feed state");

    Ok(())
}
