pub mod app_config;
pub mod categories;
pub mod config;
pub mod filters;
pub mod products;
pub mod query;
pub mod selection;
pub mod slides;
pub mod suggestions;
pub mod view;

pub use app_config::{AppConfig, Environment};
pub use categories::{fold_for_search, CategoryFilter};
pub use config::{load_app_config, load_app_config_from_env};
pub use filters::{FilterState, SortOrder};
pub use products::{
    AbsoluteCategory, CarouselSlide, Category, CategorySuggestion, ListingPage, Product,
    SlideKind, Suggestions, Variant, MAX_CATEGORY_SUGGESTIONS, MAX_PRODUCT_SUGGESTIONS,
};
pub use query::{build_query, ProductQuery};
pub use selection::{inquiry_link, VariantSelection};
pub use slides::{load_info_slides, InfoSlideConfig, SlidesFile};
pub use suggestions::{SuggestionAction, SuggestionEntry, SuggestionList};
pub use view::{format_cop, ListingView, ResetAction};

use thiserror::Error;

/// Errors raised by filter-state mutations that would break an invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("price range is inverted: min {min} is greater than max {max}")]
    InvertedPriceRange { min: String, max: String },

    #[error("price bound must be non-negative, got {0}")]
    NegativePrice(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read slides file {path}: {source}")]
    SlidesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse slides file: {0}")]
    SlidesFileParse(#[from] serde_yaml::Error),

    #[error("slides validation failed: {0}")]
    Validation(String),
}
