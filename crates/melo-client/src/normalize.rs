//! Normalization from raw backend JSON to the [`melo_core`] catalog types.
//!
//! The backend has grown several shapes for the same record over time
//! (Spanish and English field names, numbers as strings, nested or flat
//! image lists). Everything here works on [`serde_json::Value`] and never
//! fails on a missing or mistyped optional field.

use std::str::FromStr;

use melo_core::{
    AbsoluteCategory, CarouselSlide, Category, CategorySuggestion, ListingPage, Product,
    SlideKind, Suggestions, Variant,
};
use rust_decimal::Decimal;
use serde_json::Value;

/// Image shown when a product has no usable image at all.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300?text=No+Image";

/// Category label used when a product carries no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// First present, non-null value among `keys`.
fn field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|v| !v.is_null())
}

/// First non-empty string among `keys`.
fn text(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Coerces a JSON number or numeric string to a non-negative count.
/// Missing, negative, or unparseable values become 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_count(value: Option<&Value>) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            })
        }
        _ => None,
    };
    parsed.map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Coerces a JSON number or numeric string to a non-negative price.
fn coerce_price(value: Option<&Value>) -> Decimal {
    let raw = match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_owned(),
        _ => return Decimal::ZERO,
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
        .filter(|d| !d.is_sign_negative())
        .unwrap_or(Decimal::ZERO)
}

fn coerce_id(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn array<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    field(value, keys)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Media URLs
// ---------------------------------------------------------------------------

/// Media host for an API base URL: the base with its `/api` path segment and
/// everything after it removed.
///
/// `http://127.0.0.1:8000/api/` → `http://127.0.0.1:8000`
/// `https://host/shop/api/v1` → `https://host/shop`
#[must_use]
pub fn media_base(api_base_url: &str) -> String {
    let trimmed = api_base_url.trim_end_matches('/');
    let authority = trimmed.find("://").map_or(0, |i| i + 3);
    let path_start = trimmed[authority..]
        .find('/')
        .map_or(trimmed.len(), |i| authority + i);
    let (host, path) = trimmed.split_at(path_start);
    let kept: Vec<&str> = path.split('/').take_while(|seg| *seg != "api").collect();
    format!("{host}{}", kept.join("/"))
}

/// Resolves a raw image path against the media host.
#[must_use]
pub fn resolve_media_url(raw: &str, media_base: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_owned()
    } else if raw.starts_with('/') {
        format!("{media_base}{raw}")
    } else {
        format!("{media_base}/{raw}")
    }
}

/// URL of one image-list entry, which may be a bare string or an object.
fn image_entry_url(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Object(_) => text(entry, &["image_url", "image", "url"]),
        _ => None,
    }
}

fn is_main_image(entry: &Value) -> bool {
    entry
        .get("is_main")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Normalizes one raw product record.
///
/// Returns `None` only when `raw` is JSON `null`. A record without an `id`
/// gets id 0.
#[must_use]
pub fn normalize_product(raw: &Value, media_base: &str) -> Option<Product> {
    if raw.is_null() {
        return None;
    }

    let images = array(raw, &["images", "imagenes"]);
    let gallery: Vec<String> = images
        .iter()
        .filter_map(image_entry_url)
        .map(|url| resolve_media_url(&url, media_base))
        .collect();

    let primary = text(raw, &["main_image"])
        .or_else(|| {
            images
                .iter()
                .find(|entry| is_main_image(entry))
                .and_then(image_entry_url)
        })
        .or_else(|| images.iter().find_map(image_entry_url))
        .or_else(|| text(raw, &["image", "imagen"]));
    let image_url = primary.map_or_else(
        || PLACEHOLDER_IMAGE.to_owned(),
        |url| resolve_media_url(&url, media_base),
    );

    let variants: Vec<Variant> = array(raw, &["variants", "variantes"])
        .iter()
        .map(normalize_variant)
        .collect();
    let total_stock = if variants.is_empty() {
        coerce_count(field(raw, &["stock", "total_stock"]))
    } else {
        variants
            .iter()
            .fold(0_u32, |acc, v| acc.saturating_add(v.stock))
    };

    let category_names: Vec<String> = array(raw, &["categories", "categorias"])
        .iter()
        .filter_map(label_of)
        .collect();
    let category_name = category_names
        .first()
        .cloned()
        .or_else(|| field(raw, &["category", "categoria", "category_name"]).and_then(label_of))
        .unwrap_or_else(|| UNCATEGORIZED.to_owned());

    let absolute_category_name = field(
        raw,
        &["absolute_category", "categoria_absoluta", "absolute_category_name"],
    )
    .and_then(label_of);

    Some(Product {
        id: coerce_id(raw.get("id")).unwrap_or(0),
        name: text(raw, &["name", "nombre"]).unwrap_or_default(),
        price: coerce_price(field(raw, &["price", "precio"])),
        image_url,
        gallery,
        category_name,
        category_names,
        absolute_category_name,
        description: text(raw, &["description", "descripcion"]),
        variants,
        total_stock,
    })
}

fn normalize_variant(raw: &Value) -> Variant {
    Variant {
        size: text(raw, &["size", "talla"]),
        color: text(raw, &["color"]),
        stock: coerce_count(field(raw, &["stock"])),
    }
}

/// A name given either as a plain string or as an object with a name.
fn label_of(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Object(_) => text(raw, &["name", "nombre"]),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Listing envelope
// ---------------------------------------------------------------------------

/// Normalizes one listing response.
///
/// Accepts a paginated envelope (`results`/`items`/`products` plus paging
/// fields) or a bare array. `requested_page` is used when the envelope does
/// not say which page it is.
#[must_use]
pub fn normalize_listing(raw: &Value, media_base: &str, requested_page: u32) -> ListingPage {
    let records: &[Value] = match raw {
        Value::Array(items) => items,
        _ => array(raw, &["results", "items", "products", "productos"]),
    };
    let items: Vec<Product> = records
        .iter()
        .filter_map(|record| normalize_product(record, media_base))
        .collect();

    let page = coerce_id(field(raw, &["page", "current_page"]))
        .and_then(|p| u32::try_from(p).ok())
        .filter(|p| *p >= 1)
        .unwrap_or(requested_page.max(1));
    let total_pages = coerce_id(field(raw, &["total_pages", "num_pages"]))
        .and_then(|p| u32::try_from(p).ok());
    let count = coerce_id(field(raw, &["count", "total"])).and_then(|c| u64::try_from(c).ok());

    ListingPage {
        items,
        page,
        total_pages,
        count,
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Normalizes the category tree. Entries without an id are skipped.
#[must_use]
pub fn normalize_categories(raw: &Value) -> Vec<Category> {
    list_of(raw)
        .iter()
        .filter_map(normalize_category)
        .collect()
}

fn normalize_category(raw: &Value) -> Option<Category> {
    let id = coerce_id(raw.get("id"))?;
    Some(Category {
        id,
        name: text(raw, &["name", "nombre"]).unwrap_or_default(),
        children: array(raw, &["children", "hijas", "subcategories"])
            .iter()
            .filter_map(normalize_category)
            .collect(),
    })
}

#[must_use]
pub fn normalize_absolute_categories(raw: &Value) -> Vec<AbsoluteCategory> {
    list_of(raw)
        .iter()
        .filter_map(|entry| {
            Some(AbsoluteCategory {
                id: coerce_id(entry.get("id"))?,
                name: text(entry, &["name", "nombre"]).unwrap_or_default(),
                icon: text(entry, &["icon", "icono"]),
            })
        })
        .collect()
}

/// A bare array, or the `results` array of a paginated envelope.
fn list_of(raw: &Value) -> &[Value] {
    match raw {
        Value::Array(items) => items,
        _ => array(raw, &["results", "items"]),
    }
}

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

/// Normalizes backend carousel items, sorted stably by display order.
/// Items without an explicit order keep their response position.
#[must_use]
pub fn normalize_carousel(raw: &Value) -> Vec<CarouselSlide> {
    let mut slides: Vec<CarouselSlide> = list_of(raw)
        .iter()
        .enumerate()
        .map(|(position, item)| normalize_slide(item, position))
        .collect();
    CarouselSlide::sort_stable(&mut slides);
    slides
}

fn normalize_slide(raw: &Value, position: usize) -> CarouselSlide {
    let kind = match raw.get("type").and_then(Value::as_str) {
        Some("info") => SlideKind::Info,
        _ => SlideKind::Product,
    };
    let title = text(raw, &["custom_title", "customTitle"])
        .or_else(|| text(raw, &["product_name", "productName"]))
        .unwrap_or_else(|| "Featured".to_owned());
    let subtitle = text(raw, &["custom_subtitle", "customSubtitle"]).unwrap_or_default();

    let (default_label, default_href) = match kind {
        SlideKind::Info => ("See more".to_owned(), "#".to_owned()),
        SlideKind::Product => {
            let product_id = coerce_id(field(raw, &["product", "product_id", "productId"]));
            let href = product_id.map_or_else(|| "#".to_owned(), |id| format!("/productos/{id}"));
            ("See product".to_owned(), href)
        }
    };

    CarouselSlide {
        kind,
        title,
        subtitle,
        cta_label: text(raw, &["cta_label", "ctaLabel"]).unwrap_or(default_label),
        cta_href: text(raw, &["cta_href", "ctaHref"]).unwrap_or(default_href),
        order: coerce_id(field(raw, &["display_order", "order"]))
            .unwrap_or_else(|| i64::try_from(position).unwrap_or(i64::MAX)),
    }
}

// ---------------------------------------------------------------------------
// Autocomplete
// ---------------------------------------------------------------------------

/// Normalizes an autocomplete payload, truncated to the display limits.
///
/// Product entries may be bare names or objects with a name; category
/// entries are objects with an id and a name.
#[must_use]
pub fn normalize_suggestions(raw: &Value) -> Suggestions {
    let products = array(raw, &["productos", "products"])
        .iter()
        .filter_map(label_of)
        .collect();
    let categories = array(raw, &["categorias", "categories"])
        .iter()
        .filter_map(|entry| {
            Some(CategorySuggestion {
                id: coerce_id(entry.get("id"))?,
                name: text(entry, &["name", "nombre"])?,
            })
        })
        .collect();
    Suggestions {
        products,
        categories,
    }
    .truncated()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
