//! Product Page Store
//!
//! Generated product pages, kept in memory and regenerated on a timer:
//!
//! - a page younger than the revalidation window is served as is;
//! - an older page is still served, while one background task regenerates it;
//! - a product with no page yet is generated before the response is sent.
//!
//! Failed generations are never stored. A stale page whose regeneration fails
//! stays stale, so the next request schedules another attempt.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use shop_payments::{Catalog, Product, Result};
use tokio::sync::OnceCell;
use tokio::time::Instant;

use crate::render::PageRenderer;

/// How long a generated page counts as fresh
pub const REVALIDATE_AFTER: Duration = Duration::from_secs(60 * 60);

/// A generated product page
#[derive(Debug)]
pub struct RenderedPage {
    pub product: Product,
    pub html: String,
    pub generated_at: DateTime<Utc>,
}

/// Where a served page came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    /// Fresh stored page
    Hit,
    /// Stored page past its window; regeneration scheduled
    Stale,
    /// Generated for this request
    Miss,
}

impl CacheStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Stale => "STALE",
            Self::Miss => "MISS",
        }
    }
}

/// Why the placeholder is shown instead of the product
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// The catalog does not know this product
    NotFound,
    /// The catalog could not be read; the page retries on reload
    Unavailable,
}

/// Outcome of a page request
#[derive(Debug)]
pub enum PageView {
    Ready {
        page: Arc<RenderedPage>,
        cache: CacheStatus,
    },
    Fallback(FallbackReason),
}

struct Entry {
    page: Arc<RenderedPage>,
    generated_at: Instant,
    revalidating: bool,
}

/// Shared outcome of a first generation, handed to every request waiting on it
type Generation = std::result::Result<Arc<RenderedPage>, FallbackReason>;

/// In-memory store of generated product pages
pub struct ProductPages {
    catalog: Arc<dyn Catalog>,
    renderer: PageRenderer,
    revalidate_after: Duration,
    entries: RwLock<HashMap<String, Entry>>,
    in_flight: Mutex<HashMap<String, Arc<OnceCell<Generation>>>>,
}

impl ProductPages {
    pub fn new(catalog: Arc<dyn Catalog>, renderer: PageRenderer) -> Self {
        Self {
            catalog,
            renderer,
            revalidate_after: REVALIDATE_AFTER,
            entries: RwLock::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Override the revalidation window
    #[cfg(test)]
    #[must_use]
    pub const fn with_revalidate_after(mut self, window: Duration) -> Self {
        self.revalidate_after = window;
        self
    }

    pub const fn renderer(&self) -> &PageRenderer {
        &self.renderer
    }

    pub const fn revalidate_after(&self) -> Duration {
        self.revalidate_after
    }

    /// Number of stored pages
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serve the page for `product_id`
    pub async fn serve(self: &Arc<Self>, product_id: &str) -> PageView {
        let product_id = product_id.trim();

        if let Some((page, stale, schedule)) = self.lookup(product_id) {
            if schedule {
                let pages = Arc::clone(self);
                let id = product_id.to_string();
                tokio::spawn(async move { pages.revalidate(&id).await });
            }

            let cache = if stale { CacheStatus::Stale } else { CacheStatus::Hit };
            return PageView::Ready { page, cache };
        }

        match self.first_generation(product_id).await {
            Ok(page) => PageView::Ready {
                page,
                cache: CacheStatus::Miss,
            },
            Err(reason) => PageView::Fallback(reason),
        }
    }

    /// Generate a page nobody has stored yet
    ///
    /// Concurrent requests for the same id wait on a single catalog fetch.
    async fn first_generation(&self, product_id: &str) -> Generation {
        let cell = Arc::clone(
            self.in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(product_id.to_string())
                .or_default(),
        );

        let outcome = cell
            .get_or_init(|| async {
                match self.generate(product_id).await {
                    Ok(page) => Ok(page),
                    Err(e) if e.is_not_found() => {
                        tracing::info!(product_id, "Product not found in catalog");
                        Err(FallbackReason::NotFound)
                    }
                    Err(e) => {
                        tracing::warn!(product_id, error = %e, "Page generation failed");
                        Err(FallbackReason::Unavailable)
                    }
                }
            })
            .await
            .clone();

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight
            .get(product_id)
            .is_some_and(|current| Arc::ptr_eq(current, &cell))
        {
            in_flight.remove(product_id);
        }

        outcome
    }

    /// Fetch the product and store a freshly rendered page
    pub async fn generate(&self, product_id: &str) -> Result<Arc<RenderedPage>> {
        let product = self.catalog.fetch_product(product_id).await?;
        let html = self.renderer.product_page(&product);
        let page = Arc::new(RenderedPage {
            product,
            html,
            generated_at: Utc::now(),
        });

        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                product_id.to_string(),
                Entry {
                    page: Arc::clone(&page),
                    generated_at: Instant::now(),
                    revalidating: false,
                },
            );

        tracing::info!(product_id, catalog = self.catalog.name(), "Generated product page");
        Ok(page)
    }

    /// Generate pages ahead of the first request
    ///
    /// Returns how many pages were generated. Failures are logged and skipped.
    pub async fn prerender(&self, product_ids: &[String]) -> usize {
        let mut generated = 0;
        for product_id in product_ids {
            match self.generate(product_id).await {
                Ok(_) => generated += 1,
                Err(e) => {
                    tracing::warn!(product_id = %product_id, error = %e, "Prerender failed");
                }
            }
        }
        generated
    }

    /// Returns the stored page, whether it is stale, and whether the caller
    /// must schedule its regeneration.
    fn lookup(&self, product_id: &str) -> Option<(Arc<RenderedPage>, bool, bool)> {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            let entry = entries.get(product_id)?;
            let stale = entry.generated_at.elapsed() >= self.revalidate_after;
            if !stale || entry.revalidating {
                return Some((Arc::clone(&entry.page), stale, false));
            }
        }

        // Stale and unclaimed: re-check under the write lock before claiming
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get_mut(product_id)?;

        let stale = entry.generated_at.elapsed() >= self.revalidate_after;
        let schedule = stale && !entry.revalidating;
        if schedule {
            entry.revalidating = true;
        }

        Some((Arc::clone(&entry.page), stale, schedule))
    }

    async fn revalidate(&self, product_id: &str) {
        match self.generate(product_id).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                self.entries
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(product_id);
                tracing::info!(product_id, "Product left the catalog; page dropped");
            }
            Err(e) => {
                if let Some(entry) = self
                    .entries
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get_mut(product_id)
                {
                    entry.revalidating = false;
                }
                tracing::warn!(product_id, error = %e, "Revalidation failed; serving stale page");
            }
        }
    }
}
