use super::*;
use serde_json::json;

const MEDIA: &str = "http://127.0.0.1:8000";

// -----------------------------------------------------------------------
// media_base / resolve_media_url
// -----------------------------------------------------------------------

#[test]
fn media_base_strips_api_suffix_and_trailing_slash() {
    assert_eq!(media_base("http://127.0.0.1:8000/api"), MEDIA);
    assert_eq!(media_base("http://127.0.0.1:8000/api/"), MEDIA);
    assert_eq!(media_base("https://melosport.co"), "https://melosport.co");
}

#[test]
fn media_base_drops_versioned_api_path() {
    assert_eq!(media_base("https://melosport.co/api/v1/"), "https://melosport.co");
    assert_eq!(
        media_base("https://melosport.co/tienda/api/v1"),
        "https://melosport.co/tienda"
    );
    assert_eq!(media_base("https://melosport.co/tienda"), "https://melosport.co/tienda");
}

#[test]
fn relative_media_path_resolves_against_host() {
    assert_eq!(
        resolve_media_url("/media/x.jpg", MEDIA),
        "http://127.0.0.1:8000/media/x.jpg"
    );
}

#[test]
fn bare_media_path_is_joined_with_single_slash() {
    assert_eq!(
        resolve_media_url("media/x.jpg", MEDIA),
        "http://127.0.0.1:8000/media/x.jpg"
    );
}

#[test]
fn absolute_media_url_passes_through() {
    assert_eq!(
        resolve_media_url("https://cdn.example.com/a.png", MEDIA),
        "https://cdn.example.com/a.png"
    );
}

// -----------------------------------------------------------------------
// normalize_product
// -----------------------------------------------------------------------

#[test]
fn null_record_is_skipped() {
    assert!(normalize_product(&Value::Null, MEDIA).is_none());
}

#[test]
fn empty_record_gets_defaults() {
    let product = normalize_product(&json!({}), MEDIA).unwrap();
    assert_eq!(product.id, 0);
    assert_eq!(product.name, "");
    assert_eq!(product.price, Decimal::ZERO);
    assert_eq!(product.image_url, PLACEHOLDER_IMAGE);
    assert_eq!(product.category_name, UNCATEGORIZED);
    assert_eq!(product.total_stock, 0);
    assert!(product.variants.is_empty());
}

#[test]
fn spanish_field_names_are_accepted() {
    let raw = json!({
        "id": 3,
        "nombre": "Balón Pro",
        "precio": "120000.00",
        "descripcion": "Balón oficial",
        "stock": "4",
    });
    let product = normalize_product(&raw, MEDIA).unwrap();
    assert_eq!(product.name, "Balón Pro");
    assert_eq!(product.price, Decimal::new(120_000, 0));
    assert_eq!(product.description.as_deref(), Some("Balón oficial"));
    assert_eq!(product.total_stock, 4);
}

#[test]
fn english_name_wins_over_spanish_alias() {
    let raw = json!({"name": "Ball", "nombre": "Balón"});
    let product = normalize_product(&raw, MEDIA).unwrap();
    assert_eq!(product.name, "Ball");
}

#[test]
fn numeric_price_and_string_id() {
    let raw = json!({"id": "15", "price": 89900});
    let product = normalize_product(&raw, MEDIA).unwrap();
    assert_eq!(product.id, 15);
    assert_eq!(product.price, Decimal::new(89_900, 0));
}

#[test]
fn negative_or_garbage_price_becomes_zero() {
    let negative = normalize_product(&json!({"price": -5}), MEDIA).unwrap();
    let garbage = normalize_product(&json!({"price": "gratis"}), MEDIA).unwrap();
    assert_eq!(negative.price, Decimal::ZERO);
    assert_eq!(garbage.price, Decimal::ZERO);
}

#[test]
fn main_image_field_has_top_precedence() {
    let raw = json!({
        "main_image": "/media/main.jpg",
        "images": [{"image_url": "/media/other.jpg", "is_main": true}],
        "image": "/media/legacy.jpg",
    });
    let product = normalize_product(&raw, MEDIA).unwrap();
    assert_eq!(product.image_url, "http://127.0.0.1:8000/media/main.jpg");
}

#[test]
fn flagged_main_image_beats_first_image() {
    let raw = json!({
        "images": [
            {"image_url": "/media/first.jpg", "is_main": false},
            {"image": "/media/flagged.jpg", "is_main": true},
        ],
    });
    let product = normalize_product(&raw, MEDIA).unwrap();
    assert_eq!(product.image_url, "http://127.0.0.1:8000/media/flagged.jpg");
    assert_eq!(product.gallery.len(), 2);
    assert_eq!(product.gallery[0], "http://127.0.0.1:8000/media/first.jpg");
}

#[test]
fn first_image_used_when_none_flagged() {
    let raw = json!({"images": ["media/a.jpg", "media/b.jpg"], "image": "/media/legacy.jpg"});
    let product = normalize_product(&raw, MEDIA).unwrap();
    assert_eq!(product.image_url, "http://127.0.0.1:8000/media/a.jpg");
}

#[test]
fn legacy_image_used_when_list_empty() {
    let raw = json!({"images": [], "image": "https://cdn.example.com/legacy.jpg"});
    let product = normalize_product(&raw, MEDIA).unwrap();
    assert_eq!(product.image_url, "https://cdn.example.com/legacy.jpg");
    assert!(product.gallery.is_empty());
}

#[test]
fn stock_is_sum_of_variants_when_present() {
    let raw = json!({
        "stock": 99,
        "variants": [
            {"size": "S", "color": "Red", "stock": 3},
            {"talla": "M", "color": "Blue", "stock": "2"},
            {"size": "L", "stock": -4},
            {"size": "XL", "stock": null},
        ],
    });
    let product = normalize_product(&raw, MEDIA).unwrap();
    assert_eq!(product.total_stock, 5);
    assert_eq!(product.variants[1].size.as_deref(), Some("M"));
    assert_eq!(product.variants[2].stock, 0);
    assert_eq!(product.variants[3].stock, 0);
}

#[test]
fn top_level_total_stock_used_without_variants() {
    let raw = json!({"total_stock": 12});
    let product = normalize_product(&raw, MEDIA).unwrap();
    assert_eq!(product.total_stock, 12);
}

#[test]
fn category_name_from_first_of_categories() {
    let raw = json!({
        "categories": [{"id": 1, "nombre": "Fútbol"}, {"id": 2, "name": "Balones"}],
        "category": "ignored",
    });
    let product = normalize_product(&raw, MEDIA).unwrap();
    assert_eq!(product.category_name, "Fútbol");
    assert_eq!(product.category_names, vec!["Fútbol", "Balones"]);
}

#[test]
fn category_name_falls_back_to_singular_field() {
    let raw = json!({"categories": [], "category": {"name": "Ropa"}});
    let product = normalize_product(&raw, MEDIA).unwrap();
    assert_eq!(product.category_name, "Ropa");
}

#[test]
fn absolute_category_object_or_string() {
    let object = normalize_product(&json!({"absolute_category": {"name": "Hombre"}}), MEDIA).unwrap();
    let string = normalize_product(&json!({"absolute_category": "Mujer"}), MEDIA).unwrap();
    assert_eq!(object.absolute_category_name.as_deref(), Some("Hombre"));
    assert_eq!(string.absolute_category_name.as_deref(), Some("Mujer"));
}

#[test]
fn normalization_is_idempotent() {
    let raw = json!({
        "id": 9,
        "name": "Guayos",
        "price": "250000",
        "images": [{"image_url": "/media/g.jpg", "is_main": true}],
        "variants": [{"size": "40", "color": "Negro", "stock": 2}],
        "categories": ["Calzado"],
    });
    assert_eq!(
        normalize_product(&raw, MEDIA),
        normalize_product(&raw, MEDIA)
    );
}

// -----------------------------------------------------------------------
// normalize_listing
// -----------------------------------------------------------------------

#[test]
fn listing_envelope_with_paging_fields() {
    let raw = json!({
        "results": [{"id": 1}, null, {"id": 2}],
        "page": 2,
        "total_pages": 4,
        "count": 38,
    });
    let page = normalize_listing(&raw, MEDIA, 1);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, Some(4));
    assert_eq!(page.count, Some(38));
    assert!(page.has_next());
}

#[test]
fn bare_array_listing_uses_requested_page() {
    let page = normalize_listing(&json!([{"id": 1}]), MEDIA, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.page, 3);
    assert_eq!(page.total_pages, None);
}

#[test]
fn listing_without_items_is_empty() {
    let page = normalize_listing(&json!({"detail": "nothing"}), MEDIA, 1);
    assert!(page.items.is_empty());
}

// -----------------------------------------------------------------------
// categories / absolute categories
// -----------------------------------------------------------------------

#[test]
fn category_tree_reads_hijas_and_skips_missing_ids() {
    let raw = json!([
        {"id": 1, "nombre": "Fútbol", "hijas": [{"id": 11, "nombre": "Balones"}, {"nombre": "sin id"}]},
        {"name": "huérfana"},
        {"id": 2, "name": "Ropa", "children": []},
    ]);
    let tree = normalize_categories(&raw);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(tree[0].children[0].name, "Balones");
    assert_eq!(tree[1].name, "Ropa");
}

#[test]
fn absolute_categories_read_icon_alias() {
    let raw = json!({"results": [{"id": 1, "nombre": "Hombre", "icono": "fa-male"}]});
    let absolutes = normalize_absolute_categories(&raw);
    assert_eq!(absolutes.len(), 1);
    assert_eq!(absolutes[0].icon.as_deref(), Some("fa-male"));
}

// -----------------------------------------------------------------------
// carousel
// -----------------------------------------------------------------------

#[test]
fn carousel_title_precedence_and_product_cta() {
    let raw = json!([
        {"product": 5, "product_name": "Camiseta", "display_order": 2},
        {"product": 6, "custom_title": "Oferta", "product_name": "Short", "display_order": 1},
        {"display_order": 3},
    ]);
    let slides = normalize_carousel(&raw);
    let titles: Vec<_> = slides.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Oferta", "Camiseta", "Featured"]);
    assert_eq!(slides[0].cta_label, "See product");
    assert_eq!(slides[0].cta_href, "/productos/6");
    assert_eq!(slides[2].cta_href, "#");
}

#[test]
fn carousel_info_items_get_info_cta() {
    let raw = json!([{"type": "info", "customTitle": "Envíos", "customSubtitle": "Gratis"}]);
    let slides = normalize_carousel(&raw);
    assert_eq!(slides[0].kind, SlideKind::Info);
    assert_eq!(slides[0].subtitle, "Gratis");
    assert_eq!(slides[0].cta_label, "See more");
    assert_eq!(slides[0].cta_href, "#");
}

#[test]
fn carousel_sort_keeps_position_for_equal_order() {
    let raw = json!([
        {"custom_title": "b", "display_order": 1},
        {"custom_title": "a", "display_order": 0},
        {"custom_title": "c", "display_order": 1},
    ]);
    let titles: Vec<_> = normalize_carousel(&raw)
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}

// -----------------------------------------------------------------------
// suggestions
// -----------------------------------------------------------------------

#[test]
fn suggestions_accept_spanish_keys_and_truncate() {
    let raw = json!({
        "productos": ["a", "b", "c", "d", "e", "f", "g"],
        "categorias": [
            {"id": 1, "name": "Fútbol"},
            {"id": 2, "name": "Ropa"},
            {"id": 3, "name": "Calzado"},
            {"id": 4, "name": "Natación"},
        ],
    });
    let suggestions = normalize_suggestions(&raw);
    assert_eq!(suggestions.products.len(), 5);
    assert_eq!(suggestions.categories.len(), 3);
    assert_eq!(suggestions.categories[2].name, "Calzado");
}

#[test]
fn suggestions_accept_english_keys_and_product_objects() {
    let raw = json!({
        "products": [{"name": "Balón"}, "Guayos"],
        "categories": [{"id": 7, "nombre": "Balones"}, {"name": "sin id"}],
    });
    let suggestions = normalize_suggestions(&raw);
    assert_eq!(suggestions.products, vec!["Balón", "Guayos"]);
    assert_eq!(suggestions.categories.len(), 1);
    assert_eq!(suggestions.categories[0].id, 7);
}

#[test]
fn suggestions_missing_lists_are_empty() {
    assert!(normalize_suggestions(&json!({})).is_empty());
}
