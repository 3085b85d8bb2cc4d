//! Catalog handle with atomic replacement.
//!
//! A rebuild produces a complete new [`Catalog`] and swaps it in with one
//! store. Readers that already hold an `Arc` keep their snapshot; new readers
//! see the new catalog. Nobody observes a half-built aggregate.

use crate::catalog::{Catalog, FeaturedPolicy};
use arc_swap::ArcSwap;
use std::sync::Arc;

pub struct SharedCatalog {
    current: ArcSwap<Catalog>,
}

impl SharedCatalog {
    /// Start from an already built catalog
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: ArcSwap::from_pointee(catalog),
        }
    }

    /// Start empty, before the first ingestion pass has finished
    pub fn empty(policy: FeaturedPolicy) -> Self {
        Self::new(Catalog::empty(policy))
    }

    /// Current snapshot. Lock-free.
    #[inline]
    pub fn load(&self) -> Arc<Catalog> {
        self.current.load_full()
    }

    /// Replace the catalog wholesale
    pub fn replace(&self, catalog: Catalog) {
        self.current.store(Arc::new(catalog));
    }

    /// Build a new catalog with `build` and swap it in once it is complete
    pub fn rebuild_with<F>(&self, build: F) -> Arc<Catalog>
    where
        F: FnOnce() -> Catalog,
    {
        let catalog = Arc::new(build());
        self.current.store(Arc::clone(&catalog));
        catalog
    }
}
