//! Masonry feed assembly for pin-board style apps.
//!
//! Given an ordered list of pins and a column count, `pinfeed` balances the
//! pins across columns with a greedy shortest-column heuristic, estimates
//! rendered heights from (possibly missing) intrinsic dimensions, and drives
//! infinite-scroll pagination that merges user uploads ahead of a backing
//! catalog without duplicate ids.
//!
//! # Example
//!
//! ```
//! use pinfeed::{
//!     FeedArgs, FeedSession, ImageSource, MasonryArgs, Pin, PinStore, ScrollMetrics,
//!     place_items,
//! };
//!
//! let store = PinStore::with_catalog(vec![
//!     Pin::new("c0", ImageSource::Remote("https://example.com/a.jpg".into())),
//!     Pin::new("c1", ImageSource::Local(7)),
//! ]);
//!
//! let mut session = FeedSession::new(FeedArgs::default());
//! let metrics = ScrollMetrics {
//!     content_height: 0.0,
//!     viewport_height: 600.0,
//!     offset: 0.0,
//! };
//! session.maybe_load_more(metrics, &store);
//!
//! let feed = session.combined();
//! let layout = place_items(&feed, &MasonryArgs::default()).unwrap();
//! assert_eq!(layout.column_count(), 2);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod estimate;
pub mod feed;
pub mod layout;
pub mod pin;
pub mod store;

pub use estimate::EstimatorArgs;
pub use feed::{CatalogSource, FeedArgs, FeedPhase, FeedSession, LoadOutcome, ScrollMetrics};
pub use layout::{ColumnAssignment, LayoutError, MasonryArgs, PlacedPin, place_items};
pub use pin::{ImageSource, Pin, PinDimensions};
pub use store::PinStore;
