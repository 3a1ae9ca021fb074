//! Product-listing filter state.
//!
//! A [`FilterState`] is the single source of truth for what the listing shows.
//! It is mutated only through discrete user actions (toggle a category, submit
//! a search, change the sort, change the page) and read by
//! [`crate::query::build_query`] on every fetch.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::suggestions::SuggestionAction;
use crate::CoreError;

/// Sort key for the listing. Only these four orderings are forwarded to the
/// backend; anything else means "backend default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    Name,
    StockDesc,
}

impl SortOrder {
    /// Parses a user-supplied ordering key through the whitelist.
    ///
    /// Accepts both the symbolic keys (`price_asc`) and the backend tokens
    /// (`-price`). Unknown values yield [`SortOrder::None`].
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim() {
            "price_asc" | "price" => Self::PriceAsc,
            "price_desc" | "-price" => Self::PriceDesc,
            "name" => Self::Name,
            "stock_desc" | "-total_stock" => Self::StockDesc,
            _ => Self::None,
        }
    }

    /// Backend `ordering` parameter value, or `None` for backend default.
    #[must_use]
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::PriceAsc => Some("price"),
            Self::PriceDesc => Some("-price"),
            Self::Name => Some("name"),
            Self::StockDesc => Some("-total_stock"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    search_term: String,
    category_ids: BTreeSet<i64>,
    absolute_category_ids: BTreeSet<i64>,
    price_min: Option<Decimal>,
    price_max: Option<Decimal>,
    ordering: SortOrder,
    page: u32,
    in_stock: Option<bool>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category_ids: BTreeSet::new(),
            absolute_category_ids: BTreeSet::new(),
            price_min: None,
            price_max: None,
            ordering: SortOrder::None,
            page: 1,
            in_stock: None,
        }
    }
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Selected category ids, ascending.
    #[must_use]
    pub fn category_ids(&self) -> &BTreeSet<i64> {
        &self.category_ids
    }

    /// Selected absolute-category ids, ascending.
    #[must_use]
    pub fn absolute_category_ids(&self) -> &BTreeSet<i64> {
        &self.absolute_category_ids
    }

    #[must_use]
    pub fn price_min(&self) -> Option<Decimal> {
        self.price_min
    }

    #[must_use]
    pub fn price_max(&self) -> Option<Decimal> {
        self.price_max
    }

    #[must_use]
    pub fn ordering(&self) -> SortOrder {
        self.ordering
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn in_stock(&self) -> Option<bool> {
        self.in_stock
    }

    /// `true` when a search term or any category selection narrows the
    /// listing. An empty result under these criteria is "no matches", not
    /// "no products".
    #[must_use]
    pub fn has_search_criteria(&self) -> bool {
        !self.search_term.is_empty()
            || !self.category_ids.is_empty()
            || !self.absolute_category_ids.is_empty()
    }

    /// Selects the category if unselected, deselects it otherwise.
    pub fn toggle_category(&mut self, id: i64) {
        if !self.category_ids.remove(&id) {
            self.category_ids.insert(id);
        }
        self.page = 1;
    }

    pub fn clear_categories(&mut self) {
        self.category_ids.clear();
        self.page = 1;
    }

    pub fn toggle_absolute_category(&mut self, id: i64) {
        if !self.absolute_category_ids.remove(&id) {
            self.absolute_category_ids.insert(id);
        }
        self.page = 1;
    }

    /// The "All" button of the absolute-category bar.
    pub fn clear_absolute_categories(&mut self) {
        self.absolute_category_ids.clear();
        self.page = 1;
    }

    /// Submitting the search form replaces the term and drops the category
    /// selection.
    pub fn submit_search(&mut self, term: &str) {
        self.search_term = term.trim().to_string();
        self.category_ids.clear();
        self.page = 1;
    }

    pub fn set_ordering(&mut self, ordering: SortOrder) {
        self.ordering = ordering;
        self.page = 1;
    }

    /// Sets the ordering from a raw select value; see [`SortOrder::parse_lenient`].
    pub fn set_ordering_key(&mut self, raw: &str) {
        self.set_ordering(SortOrder::parse_lenient(raw));
    }

    /// Replaces both price bounds.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NegativePrice`] if either bound is below zero.
    /// - [`CoreError::InvertedPriceRange`] if `min > max`.
    ///
    /// The state is left untouched on error.
    pub fn set_price_range(
        &mut self,
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> Result<(), CoreError> {
        for bound in [min, max].into_iter().flatten() {
            if bound.is_sign_negative() && !bound.is_zero() {
                return Err(CoreError::NegativePrice(bound.to_string()));
            }
        }
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(CoreError::InvertedPriceRange {
                    min: lo.to_string(),
                    max: hi.to_string(),
                });
            }
        }
        self.price_min = min;
        self.price_max = max;
        self.page = 1;
        Ok(())
    }

    pub fn set_in_stock(&mut self, in_stock: Option<bool>) {
        self.in_stock = in_stock;
        self.page = 1;
    }

    /// Moves to `page`; `0` is clamped to `1`.
    pub fn go_to_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    /// Every filter back to its default. Offered when the catalog is empty.
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Clears the search term and both category selections, keeping price,
    /// ordering and stock filters. Offered when a search matched nothing.
    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.category_ids.clear();
        self.absolute_category_ids.clear();
        self.page = 1;
    }

    /// Applies the effect of clicking (or activating) an autocomplete entry.
    pub fn apply_suggestion(&mut self, action: &SuggestionAction) {
        match action {
            SuggestionAction::SearchProduct(name) | SuggestionAction::SubmitSearch(name) => {
                self.submit_search(name);
            }
            SuggestionAction::SelectCategory { id, .. } => {
                self.search_term.clear();
                self.category_ids.clear();
                self.category_ids.insert(*id);
                self.page = 1;
            }
        }
    }
}
