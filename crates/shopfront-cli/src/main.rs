mod cart;
mod otp;
mod product;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use shopfront_client::{SearchBox, StorefrontClient};
use tracing_subscriber::EnvFilter;

use crate::cart::CartCommands;

#[derive(Debug, Parser)]
#[command(name = "shopfront")]
#[command(about = "Storefront client command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up the price of a product variant
    Price {
        #[arg(long)]
        product_id: Option<i64>,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// List the sizes and colors that can currently be bought
    Options {
        #[arg(long)]
        product_id: Option<i64>,
    },
    /// Search products by name
    Search {
        /// Search text; may be empty
        #[arg(default_value = "")]
        query: String,
    },
    /// Add a product variant to the cart
    AddToCart {
        #[arg(long)]
        product_id: i64,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long, default_value = "1")]
        quantity: u32,
    },
    /// Change or remove a cart line
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// List vouchers the cart qualifies for
    Vouchers {
        /// Current cart subtotal in whole currency units
        #[arg(long)]
        subtotal: u64,
        /// Category present in the cart; repeatable
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// Apply a voucher to the cart
    ApplyVoucher {
        #[arg(long)]
        voucher_id: i64,
        #[arg(long)]
        subtotal: u64,
        #[arg(long, default_value = "0")]
        min_amount: u64,
        #[arg(long, default_value = "0")]
        shipping: u64,
    },
    /// Replay keystrokes into the one-time-password input
    Otp {
        /// Digits typed at the focused cell; `-` is backspace
        #[arg(allow_hyphen_values = true)]
        keys: Vec<String>,
    },
}

impl Commands {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Commands::AddToCart { .. } | Commands::Cart { .. } | Commands::ApplyVoucher { .. }
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = shopfront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Commands::Otp { keys } = &cli.command {
        return otp::run_otp(&config, keys);
    }

    let client = StorefrontClient::new(&config)?;
    if cli.command.mutates() && client.csrf_token().is_none() {
        client.prime_session().await?;
    }

    match cli.command {
        Commands::Price {
            product_id,
            size,
            color,
        } => {
            product::run_price(&client, &config, product_id, size.as_deref(), color.as_deref())
                .await?;
        }
        Commands::Options { product_id } => {
            let available = client.get_available_options(product_id).await?;
            println!("sizes:  {}", available.sizes.join(", "));
            println!("colors: {}", available.colors.join(", "));
        }
        Commands::Search { query } => {
            let search = SearchBox::from_config(Arc::new(client), &config);
            search.on_input(&query).await?;
            let view = search.view();
            if let Some(err) = view.error {
                anyhow::bail!(err);
            }
            for hit in view.results {
                println!("{:>8}  {}", hit.id, hit.name);
            }
        }
        Commands::AddToCart {
            product_id,
            size,
            color,
            quantity,
        } => {
            product::run_add_to_cart(
                &client,
                &config,
                product_id,
                size.as_deref(),
                color.as_deref(),
                quantity,
            )
            .await?;
        }
        Commands::Cart { command } => cart::run_cart(&client, &config, command).await?,
        Commands::Vouchers {
            subtotal,
            categories,
        } => cart::run_vouchers(&client, subtotal, &categories).await?,
        Commands::ApplyVoucher {
            voucher_id,
            subtotal,
            min_amount,
            shipping,
        } => {
            cart::run_apply_voucher(&client, &config, voucher_id, subtotal, min_amount, shipping)
                .await?;
        }
        Commands::Otp { .. } => {}
    }

    Ok(())
}
