//! Canonical product-listing query derived from a [`FilterState`].
//!
//! Parameters at their default value are omitted, except `page`, which is
//! always sent. Id sets are serialized ascending so identical states always
//! produce byte-identical query strings.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::filters::FilterState;

/// Characters left unescaped in query values (RFC 3986 unreserved set).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Ordered key/value parameters for `GET /products/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pairs: Vec<(&'static str, String)>,
}

impl ProductQuery {
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// `key=value&...` with percent-encoded values, in canonical order.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            let _ = write!(out, "{key}={}", utf8_percent_encode(value, QUERY_VALUE));
        }
        out
    }
}

/// Builds the listing query for `state`.
///
/// Parameter order is fixed: `search`, `categories`, `absolute_categories`,
/// `price_min`, `price_max`, `ordering`, `in_stock`, `page`.
#[must_use]
pub fn build_query(state: &FilterState) -> ProductQuery {
    let mut pairs: Vec<(&'static str, String)> = Vec::new();

    if !state.search_term().is_empty() {
        pairs.push(("search", state.search_term().to_string()));
    }
    if let Some(joined) = join_ids(state.category_ids()) {
        pairs.push(("categories", joined));
    }
    if let Some(joined) = join_ids(state.absolute_category_ids()) {
        pairs.push(("absolute_categories", joined));
    }
    if let Some(min) = state.price_min() {
        pairs.push(("price_min", min.normalize().to_string()));
    }
    if let Some(max) = state.price_max() {
        pairs.push(("price_max", max.normalize().to_string()));
    }
    if let Some(ordering) = state.ordering().as_param() {
        pairs.push(("ordering", ordering.to_string()));
    }
    if let Some(in_stock) = state.in_stock() {
        pairs.push(("in_stock", in_stock.to_string()));
    }
    pairs.push(("page", state.page().to_string()));

    ProductQuery { pairs }
}

fn join_ids(ids: &BTreeSet<i64>) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    Some(
        ids.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    )
}
