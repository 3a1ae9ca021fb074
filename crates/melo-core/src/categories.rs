//! Accent-insensitive filtering of the category tree shown in the
//! "more filters" picker.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::products::Category;

/// Lowercases and strips diacritics (`"Fútbol"` → `"futbol"`).
#[must_use]
pub fn fold_for_search(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// A compiled picker filter. An empty term matches everything.
#[derive(Debug, Clone)]
pub struct CategoryFilter {
    needle: String,
}

impl CategoryFilter {
    #[must_use]
    pub fn new(term: &str) -> Self {
        Self {
            needle: fold_for_search(term.trim()),
        }
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.needle.is_empty() || fold_for_search(name).contains(&self.needle)
    }

    /// Visible subset of `tree`.
    ///
    /// A parent stays visible when it or any child matches. A matching parent
    /// keeps all of its children; otherwise only matching children remain.
    #[must_use]
    pub fn apply(&self, tree: &[Category]) -> Vec<Category> {
        tree.iter()
            .filter_map(|parent| {
                if self.matches(&parent.name) {
                    return Some(parent.clone());
                }
                let children: Vec<Category> = parent
                    .children
                    .iter()
                    .filter(|child| self.matches(&child.name))
                    .cloned()
                    .collect();
                if children.is_empty() {
                    None
                } else {
                    Some(Category {
                        id: parent.id,
                        name: parent.name.clone(),
                        children,
                    })
                }
            })
            .collect()
    }
}
