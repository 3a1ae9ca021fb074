mod account;
mod catalog;
mod render;
mod suggest;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "melo")]
#[command(about = "MeloSport storefront catalog client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product listing
    Products(ProductsArgs),
    /// Show one product with its variants and stock
    Product {
        id: i64,
        /// Preselect a size
        #[arg(long)]
        size: Option<String>,
        /// Preselect a color
        #[arg(long)]
        color: Option<String>,
    },
    /// Show the home page: carousel and category bar
    Home,
    /// Show the category tree
    Categories {
        /// Accent-insensitive filter on category names
        #[arg(long)]
        filter: Option<String>,
    },
    /// Interactive autocomplete: one line of input per keystroke batch
    Suggest,
    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        message: String,
    },
    /// Obtain and store an access token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "MELO_PASSWORD")]
        password: String,
    },
    /// Remove the stored tokens
    Logout,
}

#[derive(Debug, Clone, Default, clap::Args)]
struct ProductsArgs {
    /// Free-text search
    #[arg(long)]
    search: Option<String>,
    /// Category id (repeatable)
    #[arg(long = "category")]
    categories: Vec<i64>,
    /// Absolute category id (repeatable)
    #[arg(long = "absolute")]
    absolute_categories: Vec<i64>,
    /// Minimum price in COP
    #[arg(long)]
    min: Option<Decimal>,
    /// Maximum price in COP
    #[arg(long)]
    max: Option<Decimal>,
    /// Sort key: price_asc, price_desc, name, stock_desc
    #[arg(long)]
    sort: Option<String>,
    /// Stock filter: `--in-stock` or `--in-stock true` for products with
    /// stock, `--in-stock false` for products without
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    in_stock: Option<bool>,
    #[arg(long, default_value = "1")]
    page: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = melo_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("melo: pass a subcommand, or --help for the list");
        return Ok(());
    };

    match command {
        Commands::Products(args) => catalog::run_products(&config, &args).await?,
        Commands::Product { id, size, color } => {
            catalog::run_product(&config, id, size.as_deref(), color.as_deref()).await?;
        }
        Commands::Home => catalog::run_home(&config).await?,
        Commands::Categories { filter } => {
            catalog::run_categories(&config, filter.as_deref().unwrap_or_default()).await?;
        }
        Commands::Suggest => suggest::run_suggest(&config).await?,
        Commands::Contact {
            name,
            email,
            phone,
            message,
        } => {
            account::run_contact(
                &config,
                melo_client::ContactMessage {
                    name,
                    email,
                    phone,
                    message,
                },
            )
            .await?;
        }
        Commands::Login { username, password } => {
            account::run_login(&config, &username, &password).await?;
        }
        Commands::Logout => account::run_logout(&config)?,
    }

    Ok(())
}
