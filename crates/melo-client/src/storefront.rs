//! Page-level orchestration: what the storefront shows for each request,
//! including the fallbacks used when decorative data cannot be loaded.

use melo_core::{
    AbsoluteCategory, AppConfig, CarouselSlide, Category, FilterState, ListingView, Product,
};

use crate::cancel::{Channel, RequestSlot};
use crate::client::CatalogClient;
use crate::error::ClientError;

pub struct Storefront {
    client: CatalogClient,
    info_slides: Vec<CarouselSlide>,
    products: RequestSlot,
}

impl Storefront {
    #[must_use]
    pub fn new(client: CatalogClient, info_slides: Vec<CarouselSlide>) -> Self {
        Self {
            client,
            info_slides,
            products: RequestSlot::new(Channel::Products),
        }
    }

    /// Builds the client from `config` and loads the configured info slides.
    /// A slides file that fails to load is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns the client construction error.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let client = CatalogClient::new(config)?;
        let info_slides = match &config.slides_path {
            Some(path) => match melo_core::load_info_slides(path) {
                Ok(file) => file.to_slides(),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring info slides");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Ok(Self::new(client, info_slides))
    }

    #[must_use]
    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    #[must_use]
    pub fn info_slides(&self) -> &[CarouselSlide] {
        &self.info_slides
    }

    /// Loads the listing for `filters`.
    ///
    /// Returns `None` when a later call superseded this one; the caller
    /// must leave its display untouched in that case. Failures become
    /// [`ListingView::Failed`].
    pub async fn load_products(&self, filters: &FilterState) -> Option<ListingView> {
        match self
            .products
            .issue(self.client.fetch_products(filters))
            .await
        {
            Ok(page) => Some(ListingView::from_page(page, filters)),
            Err(e) if e.is_cancelled() => {
                tracing::debug!("discarding superseded product listing");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "product listing failed");
                Some(ListingView::Failed {
                    message: "Could not load products.".to_string(),
                })
            }
        }
    }

    /// Info slides followed by backend slides, stably sorted by order.
    ///
    /// Falls back to the info slides alone when the carousel endpoint
    /// fails, and to a single placeholder when there is nothing to show.
    pub async fn load_carousel(&self) -> Vec<CarouselSlide> {
        let mut slides = self.info_slides.clone();
        match self.client.fetch_carousel().await {
            Ok(backend) => slides.extend(backend),
            Err(e) => tracing::warn!(error = %e, "carousel unavailable, using info slides"),
        }
        if slides.is_empty() {
            return vec![CarouselSlide::empty_placeholder()];
        }
        CarouselSlide::sort_stable(&mut slides);
        slides
    }

    /// Absolute categories for the filter bar; empty on failure.
    pub async fn load_absolute_categories(&self) -> Vec<AbsoluteCategory> {
        self.client
            .fetch_absolute_categories()
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "absolute categories unavailable");
                Vec::new()
            })
    }

    /// Category tree for the picker; empty on failure.
    pub async fn load_categories(&self) -> Vec<Category> {
        self.client.fetch_categories().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "category tree unavailable");
            Vec::new()
        })
    }

    /// # Errors
    ///
    /// Propagates the client error; the detail page has no fallback.
    pub async fn load_product(&self, id: i64) -> Result<Product, ClientError> {
        self.client.fetch_product(id).await
    }
}
