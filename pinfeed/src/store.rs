//! In-memory pin repository.
//!
//! The data sets backing a feed live in an explicit store object handed in
//! by the caller, so feed code never touches hidden global state and tests
//! can inject their own fixtures.

use tracing::debug;

use crate::{feed::CatalogSource, pin::Pin};

/// Repository over the catalog and the user-uploaded pins.
///
/// The catalog is the paginated backing source; uploads are kept separately,
/// newest first, so sessions can merge them ahead of catalog content.
#[derive(Debug, Default, Clone)]
pub struct PinStore {
    catalog: Vec<Pin>,
    uploaded: Vec<Pin>,
}

impl PinStore {
    /// Creates a store seeded with catalog pins and no uploads.
    pub fn with_catalog(seed: Vec<Pin>) -> Self {
        Self {
            catalog: seed,
            uploaded: Vec::new(),
        }
    }

    /// Number of catalog pins.
    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    /// Returns the catalog batch for `page`, empty past the end.
    pub fn catalog_batch(&self, page: usize, page_size: usize) -> Vec<Pin> {
        self.catalog.batch(page, page_size)
    }

    /// Appends a pin to the end of the catalog.
    pub fn add_to_catalog(&mut self, pin: Pin) {
        self.catalog.push(pin);
    }

    /// Records a fresh upload, keeping the uploaded list newest-first.
    pub fn record_upload(&mut self, pin: Pin) {
        debug!(id = %pin.id, "pin uploaded");
        self.uploaded.insert(0, pin);
    }

    /// Uploaded pins, newest first.
    pub fn uploaded(&self) -> &[Pin] {
        &self.uploaded
    }
}

impl CatalogSource for PinStore {
    fn len(&self) -> usize {
        self.catalog.len()
    }

    fn batch(&self, page: usize, page_size: usize) -> Vec<Pin> {
        self.catalog.batch(page, page_size)
    }
}
