//! Catalog browsing handlers: listing, product detail, home page, and the
//! category tree.

use melo_client::Storefront;
use melo_core::{AppConfig, CategoryFilter, FilterState, VariantSelection};

use crate::render;
use crate::ProductsArgs;

/// Translates command-line flags into the same actions a shopper would take.
///
/// # Errors
///
/// Returns an error if the price range is invalid.
pub(crate) fn filters_from_args(args: &ProductsArgs) -> anyhow::Result<FilterState> {
    let mut filters = FilterState::new();
    if let Some(search) = &args.search {
        filters.submit_search(search);
    }
    for id in &args.categories {
        filters.toggle_category(*id);
    }
    for id in &args.absolute_categories {
        filters.toggle_absolute_category(*id);
    }
    filters.set_price_range(args.min, args.max)?;
    if let Some(sort) = &args.sort {
        filters.set_ordering_key(sort);
    }
    filters.set_in_stock(args.in_stock);
    filters.go_to_page(args.page);
    Ok(filters)
}

/// Print one page of the product listing.
///
/// # Errors
///
/// Returns an error if the config or filters are invalid. Backend failures
/// are rendered, not returned.
pub(crate) async fn run_products(config: &AppConfig, args: &ProductsArgs) -> anyhow::Result<()> {
    let storefront = Storefront::from_config(config)?;
    let filters = filters_from_args(args)?;

    let Some(view) = storefront.load_products(&filters).await else {
        return Ok(());
    };
    print!("{}", render::listing(&view, &filters));
    Ok(())
}

/// Print a product detail page.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched.
pub(crate) async fn run_product(
    config: &AppConfig,
    id: i64,
    size: Option<&str>,
    color: Option<&str>,
) -> anyhow::Result<()> {
    let storefront = Storefront::from_config(config)?;
    let product = storefront.load_product(id).await?;

    let mut selection = VariantSelection::for_detail(&product);
    if let Some(size) = size {
        if selection.size() != Some(size) {
            selection.toggle_size(size);
        }
    }
    if let Some(color) = color {
        if selection.color() != Some(color) {
            selection.toggle_color(color);
        }
    }

    print!(
        "{}",
        render::product_detail(&product, &selection, config.whatsapp_phone.as_deref())
    );
    Ok(())
}

/// Print the home page: carousel slides and the absolute-category bar.
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub(crate) async fn run_home(config: &AppConfig) -> anyhow::Result<()> {
    let storefront = Storefront::from_config(config)?;
    let (slides, absolutes) = futures::join!(
        storefront.load_carousel(),
        storefront.load_absolute_categories()
    );
    print!("{}", render::carousel(&slides));
    println!();
    print!("{}", render::absolute_bar(&absolutes));
    Ok(())
}

/// Print the category tree, optionally filtered.
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub(crate) async fn run_categories(config: &AppConfig, filter: &str) -> anyhow::Result<()> {
    let storefront = Storefront::from_config(config)?;
    let tree = storefront.load_categories().await;
    let visible = CategoryFilter::new(filter).apply(&tree);
    if visible.is_empty() {
        println!("no categories match \"{filter}\"");
        return Ok(());
    }
    print!("{}", render::category_tree(&visible));
    Ok(())
}
