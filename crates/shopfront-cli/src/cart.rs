//! Cart and voucher command handlers.
//!
//! The CLI holds no rendered cart page, so each command builds a one-line
//! [`CartView`] from its arguments, runs the mutation against it and prints
//! the result.

use chrono::Utc;
use clap::Subcommand;
use rust_decimal::Decimal;
use shopfront_client::{CartController, CartOutcome, StorefrontClient, VoucherPanel};
use shopfront_core::totals::recalculate;
use shopfront_core::{eligible_vouchers, Amount, AppConfig, CartRow, CartView, Voucher};

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Increase a line's quantity by one
    Inc {
        item_id: i64,
        #[command(flatten)]
        line: LineArgs,
    },
    /// Decrease a line's quantity by one
    Dec {
        item_id: i64,
        #[command(flatten)]
        line: LineArgs,
    },
    /// Set a line's quantity
    Set {
        item_id: i64,
        #[arg(id = "new_quantity", value_name = "QUANTITY")]
        quantity: u32,
        #[command(flatten)]
        line: LineArgs,
    },
    /// Remove a line
    Remove {
        item_id: i64,
        #[command(flatten)]
        line: LineArgs,
    },
    /// Move a line to another size/color
    Variant {
        item_id: i64,
        #[arg(long)]
        product_id: i64,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[command(flatten)]
        line: LineArgs,
    },
}

/// Current state of the line as the user sees it.
#[derive(Debug, Clone, clap::Args)]
pub struct LineArgs {
    /// Quantity currently shown
    #[arg(long, default_value = "1")]
    pub quantity: u32,
    /// Unit price currently shown, in whole currency units
    #[arg(long, default_value = "0")]
    pub unit_price: u64,
    #[arg(long, default_value = "0")]
    pub shipping: u64,
}

fn line_view(config: &AppConfig, item_id: i64, line: &LineArgs) -> CartView {
    let label = config.currency_label.as_str();
    let mut view = CartView::new(label, Amount::new(line.shipping));
    view.push_row(CartRow::new(
        item_id,
        format!("item {item_id}"),
        line.quantity,
        Amount::new(line.unit_price),
        label,
    ));
    recalculate(&mut view);
    view
}

/// Runs one cart mutation and prints the re-rendered line and summary.
///
/// # Errors
///
/// Returns an error when the mutation failed and the cart must be reloaded.
pub(crate) async fn run_cart(
    client: &StorefrontClient,
    config: &AppConfig,
    command: CartCommands,
) -> anyhow::Result<()> {
    let controller = CartController::new(config);

    let (view, outcome) = match command {
        CartCommands::Inc { item_id, line } => {
            let mut view = line_view(config, item_id, &line);
            let outcome = controller.increment(client, &mut view, item_id).await;
            (view, outcome)
        }
        CartCommands::Dec { item_id, line } => {
            let mut view = line_view(config, item_id, &line);
            let outcome = controller.decrement(client, &mut view, item_id).await;
            (view, outcome)
        }
        CartCommands::Set {
            item_id,
            quantity,
            line,
        } => {
            let mut view = line_view(config, item_id, &line);
            let outcome = controller
                .set_quantity(client, &mut view, item_id, quantity)
                .await;
            (view, outcome)
        }
        CartCommands::Remove { item_id, line } => {
            let mut view = line_view(config, item_id, &line);
            let outcome = controller.remove(client, &mut view, item_id).await;
            (view, outcome)
        }
        CartCommands::Variant {
            item_id,
            product_id,
            size,
            color,
            line,
        } => {
            let mut view = line_view(config, item_id, &line);
            if let Ok(row) = view.row_mut(item_id) {
                row.product_id = Some(product_id);
            }
            let outcome = controller
                .change_variant(
                    client,
                    &mut view,
                    item_id,
                    line.quantity,
                    size.as_deref(),
                    color.as_deref(),
                )
                .await;
            (view, outcome)
        }
    };

    println!("{}", view.render());
    match outcome {
        CartOutcome::Updated => Ok(()),
        CartOutcome::Removed => {
            println!("line removed");
            Ok(())
        }
        CartOutcome::Reload => anyhow::bail!("cart update failed; reload the cart page"),
    }
}

/// Prints the vouchers a cart with `subtotal` and `categories` qualifies for.
///
/// # Errors
///
/// Returns an error if the voucher list cannot be fetched.
pub(crate) async fn run_vouchers(
    client: &StorefrontClient,
    subtotal: u64,
    categories: &[String],
) -> anyhow::Result<()> {
    let vouchers = client.get_vouchers().await?;
    let eligible = eligible_vouchers(&vouchers, Amount::new(subtotal), categories, Utc::now());
    tracing::info!(
        offered = vouchers.len(),
        eligible = eligible.len(),
        "vouchers fetched"
    );
    if eligible.is_empty() {
        println!("no eligible vouchers");
    }
    for voucher in eligible {
        println!("{}", voucher.label());
    }
    Ok(())
}

/// Applies a voucher to a cart with the given subtotal and prints the summary.
///
/// # Errors
///
/// Returns an error when the storefront rejects the voucher.
pub(crate) async fn run_apply_voucher(
    client: &StorefrontClient,
    config: &AppConfig,
    voucher_id: i64,
    subtotal: u64,
    min_amount: u64,
    shipping: u64,
) -> anyhow::Result<()> {
    let line = LineArgs {
        quantity: 1,
        unit_price: subtotal,
        shipping,
    };
    let mut view = line_view(config, 0, &line);
    let voucher = Voucher {
        id: voucher_id,
        categories: Vec::new(),
        discount: Decimal::ZERO,
        min_amount: Amount::new(min_amount),
        is_global: true,
        started_at: None,
        ended_at: None,
    };

    let applied = VoucherPanel::new().apply(client, &mut view, &voucher).await;
    println!("{}", view.render());
    if !applied {
        anyhow::bail!("voucher {voucher_id} was not applied");
    }
    Ok(())
}
