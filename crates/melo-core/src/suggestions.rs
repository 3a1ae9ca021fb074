//! Keyboard model for the rendered autocomplete dropdown.

use crate::products::Suggestions;

/// What selecting a dropdown entry (or pressing Enter) does to the filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionAction {
    /// A product name was picked: search for it.
    SearchProduct(String),
    /// A category was picked: filter by that category only.
    SelectCategory { id: i64, name: String },
    /// Enter with nothing highlighted: submit the typed text.
    SubmitSearch(String),
}

/// A rendered, selectable entry. Section headers are not entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionEntry {
    Product(String),
    Category { id: i64, name: String },
}

impl SuggestionEntry {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Product(name) | Self::Category { name, .. } => name,
        }
    }

    fn action(&self) -> SuggestionAction {
        match self {
            Self::Product(name) => SuggestionAction::SearchProduct(name.clone()),
            Self::Category { id, name } => SuggestionAction::SelectCategory {
                id: *id,
                name: name.clone(),
            },
        }
    }
}

/// Products first, then categories, with a wrap-around highlight cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionList {
    entries: Vec<SuggestionEntry>,
    highlighted: Option<usize>,
}

impl SuggestionList {
    #[must_use]
    pub fn from_suggestions(suggestions: &Suggestions) -> Self {
        let entries = suggestions
            .products
            .iter()
            .cloned()
            .map(SuggestionEntry::Product)
            .chain(
                suggestions
                    .categories
                    .iter()
                    .map(|c| SuggestionEntry::Category {
                        id: c.id,
                        name: c.name.clone(),
                    }),
            )
            .collect();
        Self {
            entries,
            highlighted: None,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[SuggestionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry; typing below the minimum length lands here.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.highlighted = None;
    }

    /// Arrow-down. Wraps from the last entry to the first.
    pub fn move_down(&mut self) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(self.highlighted.map_or(0, |i| (i + 1) % len));
    }

    /// Arrow-up. Wraps from the first entry (or no highlight) to the last.
    pub fn move_up(&mut self) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(self.highlighted.map_or(len - 1, |i| (i + len - 1) % len));
    }

    /// Same effect as clicking the entry at `index`.
    #[must_use]
    pub fn click(&self, index: usize) -> Option<SuggestionAction> {
        self.entries.get(index).map(SuggestionEntry::action)
    }

    /// Enter. Activates the highlighted entry, or submits `typed` as a search
    /// when nothing is highlighted.
    #[must_use]
    pub fn activate(&self, typed: &str) -> SuggestionAction {
        self.highlighted
            .and_then(|i| self.click(i))
            .unwrap_or_else(|| SuggestionAction::SubmitSearch(typed.trim().to_string()))
    }
}
