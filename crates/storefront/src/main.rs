use anyhow::Context;
use clap::Parser;

use marketplace_catalog::{Catalog, Criteria, RawCriteria};
use marketplace_core::Entity;
use marketplace_storefront::StorefrontConfig;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Browse the seeded marketplace catalog")]
struct Args {
    /// Case-insensitive text matched against title and category
    #[arg(long, default_value = "")]
    search: String,

    /// Exact category key, or "all"
    #[arg(long, default_value = "all")]
    category: String,

    /// Condition to include (repeatable): new, like-new, good, fair
    #[arg(long)]
    condition: Vec<String>,

    /// Price bracket in display currency: under-X, X-Y, over-Z, or "all"
    #[arg(long, default_value = "all")]
    price_range: String,

    /// relevance, price-ascending, price-descending, rating-descending, newest, discount-descending
    #[arg(long, default_value = "relevance")]
    sort: String,

    /// Print the view as a JSON array
    #[arg(long)]
    json: bool,

    /// List the catalog's categories and exit
    #[arg(long)]
    categories: bool,
}

fn main() -> anyhow::Result<()> {
    marketplace_observability::init();
    let args = Args::parse();
    let config = StorefrontConfig::from_env();

    let catalog = Catalog::seeded().context("failed to load seeded catalog")?;

    if args.categories {
        for category in catalog.categories() {
            println!("{category}");
        }
        return Ok(());
    }

    let criteria = Criteria::from_raw(&RawCriteria {
        search: args.search,
        category: args.category,
        conditions: args.condition,
        price_range: args.price_range,
        sort_key: args.sort,
    });
    tracing::info!(?criteria, currency = %config.currency, "rendering catalog view");

    let engine = config.engine();
    let view = catalog.view(&engine, &criteria);

    if args.json {
        let out = serde_json::to_string_pretty(&view).context("failed to encode view")?;
        println!("{out}");
        return Ok(());
    }

    for product in &view {
        let discount = match product.discount_percent() {
            0 => String::new(),
            pct => format!("-{pct}%"),
        };
        let verified = if product.is_verified() { "verified" } else { "" };
        println!(
            "{:>4}  {:<32}  {:>10.2} {}  {:>5}  {:<8}  {}",
            product.id(),
            product.title(),
            engine.display_price(product),
            config.currency,
            discount,
            product.condition(),
            verified,
        );
    }
    println!("{} of {} products", view.len(), catalog.len());

    Ok(())
}
