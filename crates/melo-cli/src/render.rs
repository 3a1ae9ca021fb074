//! Plain-text rendering of storefront views.

use std::fmt::Write as _;

use melo_core::{
    format_cop, inquiry_link, AbsoluteCategory, CarouselSlide, Category, FilterState, ListingView,
    Product, ResetAction, SuggestionList, VariantSelection,
};

fn action_hint(action: ResetAction) -> &'static str {
    match action {
        ResetAction::ResetAll => "run `melo products` without filters to reset",
        ResetAction::ClearSearch => "drop --search and --category to see everything",
        ResetAction::Retry => "run the same command again to retry",
    }
}

pub(crate) fn listing(view: &ListingView, filters: &FilterState) -> String {
    let mut out = String::new();
    match view {
        ListingView::Products(page) => {
            let total = page
                .total_pages
                .map_or_else(|| "?".to_string(), |t| t.to_string());
            let _ = write!(out, "Page {} of {total}", page.page);
            if let Some(count) = page.count {
                let _ = write!(out, " ({count} products)");
            }
            out.push('\n');
            for product in &page.items {
                out.push('\n');
                out.push_str(&product_card(product));
            }
            if page.has_next() {
                let _ = writeln!(out, "\nnext: --page {}", filters.page() + 1);
            }
        }
        ListingView::NoProducts => {
            out.push_str("No products available yet.\n");
        }
        ListingView::NoMatches { query } if query.is_empty() => {
            out.push_str("No products match the selected categories.\n");
        }
        ListingView::NoMatches { query } => {
            let _ = writeln!(out, "No products match \"{query}\".");
        }
        ListingView::Failed { message } => {
            let _ = writeln!(out, "{message}");
        }
    }
    if let Some(action) = view.action() {
        let _ = writeln!(out, "({})", action_hint(action));
    }
    out
}

pub(crate) fn product_card(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", product.id, product.name);
    let _ = writeln!(
        out,
        "  {}  |  {}  |  stock {}",
        format_cop(product.price),
        product.category_name,
        product.total_stock
    );
    let sizes = product.sizes();
    if !sizes.is_empty() {
        let _ = writeln!(out, "  sizes: {}", sizes.join(", "));
    }
    let colors = product.colors();
    if !colors.is_empty() {
        let _ = writeln!(out, "  colors: {}", colors.join(", "));
    }
    out
}

fn marked(values: &[&str], selected: Option<&str>) -> Vec<String> {
    values
        .iter()
        .map(|v| {
            if Some(*v) == selected {
                format!("[{v}]")
            } else {
                (*v).to_string()
            }
        })
        .collect()
}

pub(crate) fn product_detail(
    product: &Product,
    selection: &VariantSelection,
    whatsapp_phone: Option<&str>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.name);
    let _ = writeln!(out, "{}", format_cop(product.price));
    if !product.category_names.is_empty() {
        let _ = writeln!(out, "categories: {}", product.category_names.join(", "));
    }
    if let Some(absolute) = &product.absolute_category_name {
        let _ = writeln!(out, "line: {absolute}");
    }
    if let Some(description) = &product.description {
        let _ = writeln!(out, "\n{description}\n");
    }
    let images = product.detail_images();
    let _ = writeln!(out, "images: {} ({})", images.len(), images[0]);

    let sizes = product.sizes();
    if !sizes.is_empty() {
        let _ = writeln!(out, "sizes: {}", marked(&sizes, selection.size()).join(" "));
    }
    let colors = product.colors();
    if !colors.is_empty() {
        let _ = writeln!(
            out,
            "colors: {}",
            marked(&colors, selection.color()).join(" ")
        );
    }

    let stock = selection.displayed_stock(product);
    if selection.size().is_some() || selection.color().is_some() {
        let _ = writeln!(out, "stock: {stock} (total: {})", product.total_stock);
    } else {
        let _ = writeln!(out, "stock: {stock}");
    }

    if let Some(phone) = whatsapp_phone {
        let _ = writeln!(out, "ask on WhatsApp: {}", inquiry_link(phone, product, selection));
    }
    out
}

pub(crate) fn carousel(slides: &[CarouselSlide]) -> String {
    let mut out = String::new();
    for (i, slide) in slides.iter().enumerate() {
        let _ = write!(out, "{}. {}", i + 1, slide.title);
        if !slide.subtitle.is_empty() {
            let _ = write!(out, " - {}", slide.subtitle);
        }
        let _ = writeln!(out, "  [{} -> {}]", slide.cta_label, slide.cta_href);
    }
    out
}

pub(crate) fn absolute_bar(absolutes: &[AbsoluteCategory]) -> String {
    let mut labels = vec!["All".to_string()];
    labels.extend(absolutes.iter().map(|a| format!("{} (#{})", a.name, a.id)));
    format!("{}\n", labels.join(" | "))
}

pub(crate) fn category_tree(tree: &[Category]) -> String {
    let mut out = String::new();
    for parent in tree {
        let _ = writeln!(out, "{} (#{})", parent.name, parent.id);
        for child in &parent.children {
            let _ = writeln!(out, "  - {} (#{})", child.name, child.id);
        }
    }
    out
}

pub(crate) fn suggestion_list(list: &SuggestionList) -> String {
    if list.is_empty() {
        return "(no suggestions)\n".to_string();
    }
    let mut out = String::new();
    for (i, entry) in list.entries().iter().enumerate() {
        let cursor = if list.highlighted() == Some(i) { ">" } else { " " };
        let _ = writeln!(out, "{cursor} {i}: {}", entry.label());
    }
    out
}
