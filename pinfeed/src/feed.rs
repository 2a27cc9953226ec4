//! Incremental pagination and feed merging.
//!
//! A [`FeedSession`] grows an append-only feed by pulling fixed-size batches
//! out of a backing catalog as the user nears the bottom of the rendered
//! content, and merges a separately sourced uploaded list that always sorts
//! first. The machine is single-threaded by contract: every transition runs
//! inside one logical callback turn, and the phase field doubles as the
//! re-entrancy guard that keeps rapid scroll events from double-appending a
//! batch. A multi-threaded host must wrap the session in a lock.

use derive_setters::Setters;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::pin::Pin;

/// Catalog backing a feed, read in fixed-size batches.
///
/// Reads are synchronous, deterministic, and zero-indexed; a page past the
/// end yields an empty batch.
pub trait CatalogSource {
    /// Total number of items in the catalog.
    fn len(&self) -> usize;

    /// Returns the batch for `page`, empty past the end.
    fn batch(&self, page: usize, page_size: usize) -> Vec<Pin>;

    /// Whether the catalog holds no items at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CatalogSource for Vec<Pin> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn batch(&self, page: usize, page_size: usize) -> Vec<Pin> {
        let size = page_size.max(1);
        let start = page.saturating_mul(size);
        if start >= self.as_slice().len() {
            return Vec::new();
        }
        let end = (start + size).min(self.as_slice().len());
        self[start..end].to_vec()
    }
}

/// Pagination phase of a feed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// Ready to load another batch once the scroll threshold is crossed.
    Idle,
    /// A load is logically in flight; further triggers are ignored.
    LoadingMore,
    /// The catalog has no more batches. Terminal and not an error.
    Exhausted,
}

/// Outcome of a [`FeedSession::maybe_load_more`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No load started: threshold not crossed, a load already in flight, or
    /// the catalog already exhausted.
    Skipped,
    /// A batch of this many items was appended to the feed.
    Appended(usize),
    /// The catalog returned an empty batch; the feed is complete.
    Exhausted,
}

/// Scroll measurements supplied by the presentation layer on scroll events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Total laid-out content height.
    pub content_height: f32,
    /// Visible viewport height.
    pub viewport_height: f32,
    /// Current scroll offset from the top.
    pub offset: f32,
}

impl ScrollMetrics {
    /// Fraction of the content height still below the viewport bottom.
    ///
    /// Content that fits entirely inside the viewport counts as zero
    /// remaining, so short feeds keep loading until they fill the screen.
    pub fn remaining_fraction(&self) -> f32 {
        if !self.content_height.is_finite() || self.content_height <= 0.0 {
            return 0.0;
        }
        let remaining = self.content_height - self.offset - self.viewport_height;
        (remaining / self.content_height).max(0.0)
    }
}

/// Pagination tuning for a feed session.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct FeedArgs {
    /// Catalog items fetched per batch. Defaults to 10; zero is treated as 1.
    pub page_size: usize,
    /// Remaining-content fraction at or below which a load is triggered.
    /// Defaults to 0.5.
    pub load_threshold: f32,
}

impl Default for FeedArgs {
    fn default() -> Self {
        Self {
            page_size: 10,
            load_threshold: 0.5,
        }
    }
}

/// Session state for an infinite-scroll feed.
///
/// Owns the accumulated item lists across pagination calls; the placement
/// pass itself stays a pure function of the combined snapshot.
pub struct FeedSession {
    args: FeedArgs,
    uploaded: Vec<Pin>,
    loaded: Vec<Pin>,
    page_index: usize,
    phase: FeedPhase,
}

impl FeedSession {
    /// Creates an empty session in the [`FeedPhase::Idle`] phase.
    pub fn new(args: FeedArgs) -> Self {
        Self {
            args,
            uploaded: Vec::new(),
            loaded: Vec::new(),
            page_index: 0,
            phase: FeedPhase::Idle,
        }
    }

    /// Current pagination phase.
    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    /// Next page to be fetched.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Catalog index the next batch starts at.
    pub fn cursor(&self) -> usize {
        self.page_index * self.page_size()
    }

    /// Uploaded pins, newest first.
    pub fn uploaded(&self) -> &[Pin] {
        &self.uploaded
    }

    /// Catalog pins accumulated so far, in load order.
    pub fn loaded(&self) -> &[Pin] {
        &self.loaded
    }

    /// Replaces the uploaded list (newest first).
    pub fn set_uploaded(&mut self, uploaded: Vec<Pin>) {
        self.uploaded = uploaded;
    }

    /// Prepends a freshly uploaded pin, keeping the list newest-first.
    pub fn upload(&mut self, pin: Pin) {
        self.uploaded.insert(0, pin);
    }

    /// Whether a scroll event at `metrics` would start a load right now.
    pub fn should_load(&self, metrics: ScrollMetrics) -> bool {
        self.phase == FeedPhase::Idle
            && metrics.remaining_fraction() <= self.args.load_threshold
    }

    /// Starts a load if the threshold is crossed and no load is in flight.
    ///
    /// Returns the page to fetch and moves to [`FeedPhase::LoadingMore`].
    /// The synchronous check-then-set here is the guarantee that at most one
    /// load is logically in progress at a time.
    pub fn begin_load_more(&mut self, metrics: ScrollMetrics) -> Option<usize> {
        if !self.should_load(metrics) {
            return None;
        }
        self.phase = FeedPhase::LoadingMore;
        trace!(page = self.page_index, "load-more started");
        Some(self.page_index)
    }

    /// Completes an in-flight load with the retrieved batch.
    ///
    /// An empty batch moves the session to [`FeedPhase::Exhausted`].
    /// Otherwise the batch is appended and the session returns to
    /// [`FeedPhase::Idle`], unless this batch reached the end of the catalog
    /// (`cursor + page_size >= catalog_len`), which is terminal too.
    /// A no-op unless a load is in flight.
    pub fn complete_load_more(&mut self, batch: Vec<Pin>, catalog_len: usize) {
        if self.phase != FeedPhase::LoadingMore {
            return;
        }
        if batch.is_empty() {
            self.phase = FeedPhase::Exhausted;
            debug!("catalog exhausted");
            return;
        }

        let cursor = self.cursor();
        let appended = batch.len();
        self.loaded.extend(batch);
        self.page_index += 1;
        self.phase = if cursor + self.page_size() >= catalog_len {
            FeedPhase::Exhausted
        } else {
            FeedPhase::Idle
        };
        debug!(
            appended,
            total = self.loaded.len(),
            phase = ?self.phase,
            "load-more completed"
        );
    }

    /// Threshold check, batch fetch, and completion in one synchronous step.
    pub fn maybe_load_more<S>(&mut self, metrics: ScrollMetrics, source: &S) -> LoadOutcome
    where
        S: CatalogSource + ?Sized,
    {
        let Some(page) = self.begin_load_more(metrics) else {
            return LoadOutcome::Skipped;
        };
        let batch = source.batch(page, self.page_size());
        let appended = batch.len();
        self.complete_load_more(batch, source.len());
        if appended == 0 {
            LoadOutcome::Exhausted
        } else {
            LoadOutcome::Appended(appended)
        }
    }

    /// The combined feed snapshot: uploaded pins first, then catalog pins,
    /// de-duplicated by id with the first-seen occurrence winning.
    pub fn combined(&self) -> Vec<Pin> {
        let mut seen = FxHashSet::default();
        let mut feed = Vec::with_capacity(self.uploaded.len() + self.loaded.len());
        for pin in self.uploaded.iter().chain(self.loaded.iter()) {
            if seen.insert(pin.id.as_str()) {
                feed.push(pin.clone());
            }
        }
        feed
    }

    /// Toggles the like state of the pin with `id`, adjusting its like count.
    ///
    /// Touches exactly one pin; ordering and every other pin are untouched.
    /// Returns `false` when no pin matches.
    pub fn toggle_like(&mut self, id: &str) -> bool {
        let Some(pin) = self.find_mut(id) else {
            return false;
        };
        if pin.is_liked {
            pin.is_liked = false;
            pin.like_count = pin.like_count.saturating_sub(1);
        } else {
            pin.is_liked = true;
            pin.like_count += 1;
        }
        true
    }

    /// Toggles the saved state of the pin with `id`.
    ///
    /// Returns `false` when no pin matches.
    pub fn toggle_save(&mut self, id: &str) -> bool {
        let Some(pin) = self.find_mut(id) else {
            return false;
        };
        pin.is_saved = !pin.is_saved;
        true
    }

    fn page_size(&self) -> usize {
        self.args.page_size.max(1)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Pin> {
        self.uploaded
            .iter_mut()
            .chain(self.loaded.iter_mut())
            .find(|pin| pin.id == id)
    }
}
