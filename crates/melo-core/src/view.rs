//! Terminal display states of the product listing.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::filters::FilterState;
use crate::products::ListingPage;

/// What the listing area shows once a fetch settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingView {
    Products(ListingPage),
    /// The catalog itself is empty under default criteria.
    NoProducts,
    /// The active search or category selection matched nothing.
    NoMatches { query: String },
    /// The fetch failed; the user may retry.
    Failed { message: String },
}

/// Recovery action offered alongside a non-product view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetAction {
    /// Reset every filter ([`FilterState::reset_all`]).
    ResetAll,
    /// Clear search and category selection ([`FilterState::clear_search`]).
    ClearSearch,
    /// Re-issue the same request.
    Retry,
}

impl ListingView {
    /// Classifies a settled page under the filters that produced it.
    #[must_use]
    pub fn from_page(page: ListingPage, filters: &FilterState) -> Self {
        if !page.items.is_empty() {
            return Self::Products(page);
        }
        if filters.has_search_criteria() {
            Self::NoMatches {
                query: filters.search_term().to_string(),
            }
        } else {
            Self::NoProducts
        }
    }

    #[must_use]
    pub fn action(&self) -> Option<ResetAction> {
        match self {
            Self::Products(_) => None,
            Self::NoProducts => Some(ResetAction::ResetAll),
            Self::NoMatches { .. } => Some(ResetAction::ClearSearch),
            Self::Failed { .. } => Some(ResetAction::Retry),
        }
    }
}

impl ResetAction {
    /// Applies the action to `filters`. `Retry` leaves them untouched.
    pub fn apply(self, filters: &mut FilterState) {
        match self {
            Self::ResetAll => filters.reset_all(),
            Self::ClearSearch => filters.clear_search(),
            Self::Retry => {}
        }
    }
}

/// Formats a price the way the storefront shows it: `$1.234.567 COP`.
///
/// Rounds half away from zero to whole pesos and groups thousands with `.`.
#[must_use]
pub fn format_cop(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped} COP")
    } else {
        format!("${grouped} COP")
    }
}
