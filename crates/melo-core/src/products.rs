use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum number of product names shown in the autocomplete dropdown.
pub const MAX_PRODUCT_SUGGESTIONS: usize = 5;
/// Maximum number of categories shown in the autocomplete dropdown.
pub const MAX_CATEGORY_SUGGESTIONS: usize = 3;

/// A catalog product normalized from whatever shape the backend returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    /// Display name; empty when the backend sent neither `name` nor `nombre`.
    pub name: String,
    /// Non-negative price in COP.
    pub price: Decimal,
    /// Resolved absolute URL of the card image (placeholder when none).
    pub image_url: String,
    /// Every resolved gallery image, in backend order. May be empty.
    pub gallery: Vec<String>,
    /// First category name, or `"Uncategorized"`.
    pub category_name: String,
    /// All category names, used by the detail page badges.
    pub category_names: Vec<String>,
    pub absolute_category_name: Option<String>,
    pub description: Option<String>,
    pub variants: Vec<Variant>,
    /// Sum of variant stock, or the top-level stock field when the product
    /// has no variants.
    pub total_stock: u32,
}

impl Product {
    /// Distinct non-empty sizes, in first-seen order.
    #[must_use]
    pub fn sizes(&self) -> Vec<&str> {
        distinct(self.variants.iter().filter_map(|v| v.size.as_deref()))
    }

    /// Distinct non-empty colors, in first-seen order.
    #[must_use]
    pub fn colors(&self) -> Vec<&str> {
        distinct(self.variants.iter().filter_map(|v| v.color.as_deref()))
    }

    /// Images to cycle through on the detail page. Falls back to the card
    /// image when the product has no gallery.
    #[must_use]
    pub fn detail_images(&self) -> Vec<&str> {
        if self.gallery.is_empty() {
            vec![self.image_url.as_str()]
        } else {
            self.gallery.iter().map(String::as_str).collect()
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for value in values {
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

/// A purchasable size/color combination with its own stock count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub size: Option<String>,
    pub color: Option<String>,
    pub stock: u32,
}

/// A node of the hierarchical category tree. Flat listings produce nodes
/// without children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub children: Vec<Category>,
}

/// A top-level cross-cutting tag shown in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsoluteCategory {
    pub id: i64,
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Info,
    Product,
}

/// A promotional banner entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselSlide {
    pub kind: SlideKind,
    pub title: String,
    pub subtitle: String,
    pub cta_label: String,
    pub cta_href: String,
    pub order: i64,
}

impl CarouselSlide {
    /// Placeholder shown when there is nothing to promote.
    #[must_use]
    pub fn empty_placeholder() -> Self {
        Self {
            kind: SlideKind::Info,
            title: "No promotions available".to_string(),
            subtitle: "Come back later or browse our featured products.".to_string(),
            cta_label: "See more".to_string(),
            cta_href: "#".to_string(),
            order: 0,
        }
    }

    /// Stable sort by `order`. Slides with equal order keep their relative
    /// position.
    pub fn sort_stable(slides: &mut [CarouselSlide]) {
        slides.sort_by_key(|s| s.order);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub id: i64,
    pub name: String,
}

/// Autocomplete response: two independently ranked lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    pub products: Vec<String>,
    pub categories: Vec<CategorySuggestion>,
}

impl Suggestions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.categories.is_empty()
    }

    /// Truncates both lists to their display limits.
    #[must_use]
    pub fn truncated(mut self) -> Self {
        self.products.truncate(MAX_PRODUCT_SUGGESTIONS);
        self.categories.truncate(MAX_CATEGORY_SUGGESTIONS);
        self
    }
}

/// One page of the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    pub items: Vec<Product>,
    pub page: u32,
    pub total_pages: Option<u32>,
    pub count: Option<u64>,
}

impl ListingPage {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.total_pages.is_some_and(|total| self.page < total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(size: Option<&str>, color: Option<&str>, stock: u32) -> Variant {
        Variant {
            size: size.map(str::to_string),
            color: color.map(str::to_string),
            stock,
        }
    }

    fn product(variants: Vec<Variant>) -> Product {
        Product {
            id: 7,
            name: "Camiseta Local".to_string(),
            price: Decimal::new(89_900, 0),
            image_url: "https://via.placeholder.com/300x300?text=No+Image".to_string(),
            gallery: vec![],
            category_name: "Uncategorized".to_string(),
            category_names: vec![],
            absolute_category_name: None,
            description: None,
            total_stock: variants.iter().map(|v| v.stock).sum(),
            variants,
        }
    }

    #[test]
    fn sizes_are_distinct_in_first_seen_order() {
        let p = product(vec![
            variant(Some("M"), Some("Red"), 1),
            variant(Some("S"), Some("Red"), 1),
            variant(Some("M"), Some("Blue"), 1),
            variant(None, Some("Blue"), 1),
            variant(Some(""), None, 1),
        ]);
        assert_eq!(p.sizes(), vec!["M", "S"]);
        assert_eq!(p.colors(), vec!["Red", "Blue"]);
    }

    #[test]
    fn detail_images_fall_back_to_card_image() {
        let p = product(vec![]);
        assert_eq!(p.detail_images(), vec![p.image_url.as_str()]);
    }

    #[test]
    fn suggestions_truncate_to_display_limits() {
        let s = Suggestions {
            products: (0..8).map(|i| format!("p{i}")).collect(),
            categories: (0..5)
                .map(|i| CategorySuggestion {
                    id: i,
                    name: format!("c{i}"),
                })
                .collect(),
        }
        .truncated();
        assert_eq!(s.products.len(), MAX_PRODUCT_SUGGESTIONS);
        assert_eq!(s.categories.len(), MAX_CATEGORY_SUGGESTIONS);
        assert_eq!(s.products[0], "p0");
    }

    #[test]
    fn carousel_sort_is_stable_for_equal_orders() {
        let mut slides = vec![
            CarouselSlide {
                order: 2,
                title: "b".to_string(),
                ..CarouselSlide::empty_placeholder()
            },
            CarouselSlide {
                order: 1,
                title: "a".to_string(),
                ..CarouselSlide::empty_placeholder()
            },
            CarouselSlide {
                order: 2,
                title: "c".to_string(),
                ..CarouselSlide::empty_placeholder()
            },
        ];
        CarouselSlide::sort_stable(&mut slides);
        let titles: Vec<_> = slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn listing_page_has_next_only_with_known_total() {
        let page = ListingPage {
            items: vec![],
            page: 1,
            total_pages: Some(3),
            count: None,
        };
        assert!(page.has_next());
        let last = ListingPage {
            page: 3,
            ..page.clone()
        };
        assert!(!last.has_next());
        let unknown = ListingPage {
            total_pages: None,
            ..page
        };
        assert!(!unknown.has_next());
    }

    #[test]
    fn serde_roundtrip_product() {
        let p = product(vec![variant(Some("S"), Some("Red"), 3)]);
        let json = serde_json::to_string(&p).expect("serialization failed");
        let decoded: Product = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded, p);
    }
}
