//! HTTP client for the MeloSport catalog REST API.

use std::time::Duration;

use melo_core::{
    build_query, AbsoluteCategory, AppConfig, CarouselSlide, Category, FilterState, ListingPage,
    Product, Suggestions,
};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

use crate::autocomplete::SuggestionSource;
use crate::error::ClientError;
use crate::normalize::{
    media_base, normalize_absolute_categories, normalize_carousel, normalize_categories,
    normalize_listing, normalize_product, normalize_suggestions,
};
use crate::types::ContactMessage;

/// HTTP client for the catalog API.
///
/// Every endpoint path is resolved relative to the configured API base URL
/// (e.g. `http://127.0.0.1:8000/api`). Non-2xx responses become typed errors;
/// there is no retry policy.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    media_base: String,
}

impl CatalogClient {
    /// Creates a client from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be built, or [`ClientError::InvalidBaseUrl`] if the configured
    /// base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client for an explicit base URL (a wiremock server in tests).
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::new`].
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A single trailing slash makes `Url::join("products/")` append to the
        // API path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            media_base: media_base(parsed.as_str()),
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Host that relative media paths resolve against.
    #[must_use]
    pub fn media_base(&self) -> &str {
        &self.media_base
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    /// Builds the listing URL for `filters`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if the endpoint cannot be joined.
    pub fn products_url(&self, filters: &FilterState) -> Result<Url, ClientError> {
        let mut url = self.endpoint("products/")?;
        let query = build_query(filters).to_query_string();
        if !query.is_empty() {
            url.set_query(Some(&query));
        }
        Ok(url)
    }

    /// Fetches one page of the product listing for `filters`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] / [`ClientError::UnexpectedStatus`] on non-2xx.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not JSON.
    pub async fn fetch_products(&self, filters: &FilterState) -> Result<ListingPage, ClientError> {
        let url = self.products_url(filters)?;
        let raw = self
            .get_json(self.client.get(url.clone()), &url, "product listing")
            .await?;
        let page = normalize_listing(&raw, &self.media_base, filters.page());
        tracing::debug!(
            url = %url,
            items = page.items.len(),
            page = page.page,
            "fetched product listing"
        );
        Ok(page)
    }

    /// Fetches one product by id.
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::fetch_products`]. A `null` body is reported as
    /// [`ClientError::NotFound`].
    pub async fn fetch_product(&self, id: i64) -> Result<Product, ClientError> {
        let url = self.endpoint(&format!("products/{id}/"))?;
        let raw = self
            .get_json(self.client.get(url.clone()), &url, "product detail")
            .await?;
        normalize_product(&raw, &self.media_base).ok_or_else(|| ClientError::NotFound {
            url: url.to_string(),
        })
    }

    /// Fetches the hierarchical category tree.
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::fetch_products`].
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ClientError> {
        let url = self.endpoint("categories/")?;
        let raw = self
            .get_json(self.client.get(url.clone()), &url, "category tree")
            .await?;
        Ok(normalize_categories(&raw))
    }

    /// Fetches the absolute categories shown in the filter bar.
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::fetch_products`].
    pub async fn fetch_absolute_categories(&self) -> Result<Vec<AbsoluteCategory>, ClientError> {
        let url = self.endpoint("absolute-categories/")?;
        let raw = self
            .get_json(self.client.get(url.clone()), &url, "absolute categories")
            .await?;
        Ok(normalize_absolute_categories(&raw))
    }

    /// Fetches the backend carousel items, sorted by display order.
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::fetch_products`].
    pub async fn fetch_carousel(&self) -> Result<Vec<CarouselSlide>, ClientError> {
        let url = self.endpoint("carousel/")?;
        let raw = self
            .get_json(self.client.get(url.clone()), &url, "carousel")
            .await?;
        Ok(normalize_carousel(&raw))
    }

    /// Fetches autocomplete suggestions for `query`.
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::fetch_products`].
    pub async fn autocomplete(&self, query: &str) -> Result<Suggestions, ClientError> {
        let mut url = self.endpoint("products/autocomplete/")?;
        url.query_pairs_mut().append_pair("q", query);
        let raw = self
            .get_json(self.client.get(url.clone()), &url, "autocomplete")
            .await?;
        Ok(normalize_suggestions(&raw))
    }

    /// Sends a message through the public contact form.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] / [`ClientError::UnexpectedStatus`]
    /// when the backend rejects the message, [`ClientError::Http`] on network
    /// failure.
    pub async fn send_contact_message(&self, message: &ContactMessage) -> Result<(), ClientError> {
        let url = self.endpoint("contacto/")?;
        let response = self.client.post(url.clone()).json(message).send().await?;
        check_status(response.status(), &url)?;
        tracing::info!(email = %message.email, "contact message sent");
        Ok(())
    }

    /// Sends `request`, asserts a 2xx status, and parses the body as JSON.
    pub(crate) async fn get_json(
        &self,
        request: RequestBuilder,
        url: &Url,
        context: &str,
    ) -> Result<Value, ClientError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        check_status(response.status(), url)?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: format!("{context} from {url}"),
            source: e,
        })
    }
}

pub(crate) fn check_status(status: reqwest::StatusCode, url: &Url) -> Result<(), ClientError> {
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound {
            url: url.to_string(),
        });
    }
    if !status.is_success() {
        return Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(())
}

impl SuggestionSource for CatalogClient {
    async fn suggest(&self, query: &str) -> Result<Suggestions, ClientError> {
        self.autocomplete(query).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
