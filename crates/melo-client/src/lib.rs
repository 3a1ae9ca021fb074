pub mod auth;
pub mod autocomplete;
pub mod cancel;
pub mod client;
pub mod error;
pub mod normalize;
pub mod storefront;
pub mod types;

pub use auth::{StoredTokens, TokenStore};
pub use autocomplete::{Autocomplete, SuggestionSource, SuggestionUpdate};
pub use cancel::{Channel, RequestSlot};
pub use client::CatalogClient;
pub use error::ClientError;
pub use normalize::normalize_product;
pub use storefront::Storefront;
pub use types::{ContactMessage, TokenPair};
