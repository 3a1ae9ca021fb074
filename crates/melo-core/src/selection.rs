//! Variant picker state for a single product card.
//!
//! Each card owns one [`VariantSelection`]; cards never share selection.
//! Transitions recompute the displayed stock locally from the variants that
//! were already fetched.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::products::Product;
use crate::view::format_cop;

/// At most one size and one color selected at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSelection {
    size: Option<String>,
    color: Option<String>,
}

impl VariantSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Detail-page initial state: an axis with a single distinct value
    /// starts selected.
    #[must_use]
    pub fn for_detail(product: &Product) -> Self {
        let single = |values: Vec<&str>| match values.as_slice() {
            [only] => Some((*only).to_string()),
            _ => None,
        };
        Self {
            size: single(product.sizes()),
            color: single(product.colors()),
        }
    }

    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Selects `size`, or clears it when it is already the selected size.
    pub fn toggle_size(&mut self, size: &str) {
        toggle(&mut self.size, size);
    }

    /// Selects `color`, or clears it when it is already the selected color.
    pub fn toggle_color(&mut self, color: &str) {
        toggle(&mut self.color, color);
    }

    /// Stock over variants matching every selected axis.
    ///
    /// Falls back to the product's total stock when no variant matches, so an
    /// over-restrictive combination never reads as "0 units".
    #[must_use]
    pub fn displayed_stock(&self, product: &Product) -> u32 {
        let mut matched = product
            .variants
            .iter()
            .filter(|v| self.size.is_none() || v.size == self.size)
            .filter(|v| self.color.is_none() || v.color == self.color)
            .peekable();

        if matched.peek().is_none() {
            return product.total_stock;
        }
        matched.fold(0u32, |acc, v| acc.saturating_add(v.stock))
    }
}

fn toggle(slot: &mut Option<String>, value: &str) {
    if slot.as_deref() == Some(value) {
        *slot = None;
    } else {
        *slot = Some(value.to_string());
    }
}

/// WhatsApp inquiry link for `product` with the current selection.
#[must_use]
pub fn inquiry_link(phone: &str, product: &Product, selection: &VariantSelection) -> String {
    let mut message = format!(
        "Hola, me interesa este producto:\n\nProducto: {}",
        product.name
    );
    if let Some(size) = selection.size() {
        message.push_str("\nTalla: ");
        message.push_str(size);
    }
    if let Some(color) = selection.color() {
        message.push_str("\nColor: ");
        message.push_str(color);
    }
    message.push_str("\nPrecio: ");
    message.push_str(&format_cop(product.price));
    message.push_str("\n\n¿Podrías darme más información?");

    let encoded = utf8_percent_encode(&message, NON_ALPHANUMERIC);
    format!("https://wa.me/{phone}?text={encoded}")
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::products::Variant;

    fn variant(size: &str, color: &str, stock: u32) -> Variant {
        Variant {
            size: Some(size.to_string()),
            color: Some(color.to_string()),
            stock,
        }
    }

    fn product(variants: Vec<Variant>) -> Product {
        Product {
            id: 1,
            name: "Camiseta".to_string(),
            price: Decimal::new(50_000, 0),
            image_url: String::new(),
            gallery: vec![],
            category_name: "Uncategorized".to_string(),
            category_names: vec![],
            absolute_category_name: None,
            description: None,
            total_stock: variants.iter().map(|v| v.stock).sum(),
            variants,
        }
    }

    fn sample() -> Product {
        product(vec![
            variant("S", "Red", 3),
            variant("S", "Blue", 2),
            variant("M", "Red", 5),
        ])
    }

    #[test]
    fn no_selection_shows_total() {
        let p = sample();
        assert_eq!(VariantSelection::new().displayed_stock(&p), 10);
    }

    #[test]
    fn selecting_size_then_color_narrows_stock() {
        let p = sample();
        let mut sel = VariantSelection::new();
        sel.toggle_size("S");
        assert_eq!(sel.displayed_stock(&p), 5);
        sel.toggle_color("Red");
        assert_eq!(sel.displayed_stock(&p), 3);
        sel.toggle_size("S");
        assert_eq!(sel.size(), None);
        assert_eq!(sel.displayed_stock(&p), 8);
    }

    #[test]
    fn empty_combination_falls_back_to_total() {
        let p = sample();
        let mut sel = VariantSelection::new();
        sel.toggle_size("M");
        sel.toggle_color("Blue");
        assert_eq!(sel.displayed_stock(&p), 10);
    }

    #[test]
    fn selecting_other_value_replaces_axis() {
        let p = sample();
        let mut sel = VariantSelection::new();
        sel.toggle_size("S");
        sel.toggle_size("M");
        assert_eq!(sel.size(), Some("M"));
        assert_eq!(sel.displayed_stock(&p), 5);
    }

    #[test]
    fn zero_stock_match_is_not_a_fallback() {
        let p = product(vec![variant("S", "Red", 0), variant("M", "Red", 4)]);
        let mut sel = VariantSelection::new();
        sel.toggle_size("S");
        assert_eq!(sel.displayed_stock(&p), 0);
    }

    #[test]
    fn product_without_variants_always_shows_total() {
        let mut p = product(vec![]);
        p.total_stock = 12;
        let mut sel = VariantSelection::new();
        sel.toggle_color("Red");
        assert_eq!(sel.displayed_stock(&p), 12);
    }

    #[test]
    fn for_detail_preselects_single_valued_axes() {
        let p = product(vec![variant("M", "Red", 1), variant("L", "Red", 2)]);
        let sel = VariantSelection::for_detail(&p);
        assert_eq!(sel.size(), None);
        assert_eq!(sel.color(), Some("Red"));
        assert_eq!(sel.displayed_stock(&p), 3);
    }

    #[test]
    fn inquiry_link_encodes_selection_and_price() {
        let p = sample();
        let mut sel = VariantSelection::new();
        sel.toggle_size("S");
        let link = inquiry_link("3122308133", &p, &sel);
        assert!(link.starts_with("https://wa.me/3122308133?text=Hola%2C%20me"));
        assert!(link.contains("Talla%3A%20S"));
        assert!(!link.contains("Color%3A"));
        assert!(link.contains("%2450%2E000%20COP"));
        assert!(!link.contains(' '));
    }
}
