use crate::{
    context::RequestContext,
    domain::{product::Product, requests::product::ListProducts, response::ApiResponse},
    repository::ProductRepository,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use shared::errors::RepositoryError;

#[derive(Debug, Parser)]
#[command(name = "inventory", about = "Product inventory maintenance")]
pub struct Cli {
    /// Give up on the command after this many seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Apply pending schema migrations and exit.
    Migrate,
    /// Print one product.
    Show { product_id: String },
    /// Print a page of products ordered by id.
    List {
        #[arg(long, default_value_t = 50)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Walk the whole table instead of one page, `limit` rows per round trip.
        #[arg(long, conflicts_with = "offset")]
        all: bool,
    },
    Create {
        product_id: String,
        name: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        price: Decimal,
    },
    SetQuantity {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    SetName {
        product_id: String,
        name: String,
    },
    SetPrice {
        product_id: String,
        price: Decimal,
    },
    /// Add (or with a negative delta, remove) stock in one atomic update.
    Adjust {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    Delete { product_id: String },
}

/// Runs a data command and renders its JSON response. `Migrate` is handled
/// by the binary before a repository exists.
pub async fn execute(
    command: Command,
    repo: &ProductRepository,
    ctx: &RequestContext,
) -> Result<String> {
    let rendered = match command {
        Command::Migrate => ApiResponse::success("Migrations are applied at startup", ()).to_string(),
        Command::Show { product_id } => {
            let product = repo.query.find_by_id(ctx, &product_id).await?;
            let message = if product.is_some() {
                "Product retrieved successfully"
            } else {
                "Product not found"
            };
            ApiResponse::success(message, product).to_string()
        }
        Command::List { limit, offset, all } => {
            let products = if all {
                repo.pager(limit)?.collect_remaining(ctx).await?
            } else {
                repo.query
                    .list(ctx, &ListProducts::new(limit, offset))
                    .await?
            };
            ApiResponse::success(
                format!("{} products retrieved", products.len()),
                products,
            )
            .to_string()
        }
        Command::Create {
            product_id,
            name,
            quantity,
            price,
        } => {
            let product = Product::new(product_id, name, quantity, price);
            repo.command.create_product(ctx, &product).await?;
            ApiResponse::success("Product created successfully", product).to_string()
        }
        Command::SetQuantity {
            product_id,
            quantity,
        } => {
            repo.command
                .update_quantity(ctx, &product_id, quantity)
                .await?;
            updated(repo, ctx, &product_id, "Quantity updated successfully").await?
        }
        Command::SetName { product_id, name } => {
            repo.command.update_name(ctx, &product_id, &name).await?;
            updated(repo, ctx, &product_id, "Name updated successfully").await?
        }
        Command::SetPrice { product_id, price } => {
            repo.command.update_price(ctx, &product_id, price).await?;
            updated(repo, ctx, &product_id, "Price updated successfully").await?
        }
        Command::Adjust { product_id, delta } => {
            let quantity = repo
                .command
                .adjust_quantity(ctx, &product_id, delta)
                .await?;
            ApiResponse::success("Quantity adjusted successfully", quantity).to_string()
        }
        Command::Delete { product_id } => {
            let deleted = repo.command.delete_product(ctx, &product_id).await?;
            let message = if deleted {
                "Product deleted successfully"
            } else {
                "Product did not exist"
            };
            ApiResponse::success(message, deleted).to_string()
        }
    };

    Ok(rendered)
}

async fn updated(
    repo: &ProductRepository,
    ctx: &RequestContext,
    product_id: &str,
    message: &str,
) -> Result<String, RepositoryError> {
    let product = repo.query.find_by_id(ctx, product_id).await?;
    Ok(ApiResponse::success(message, product).to_string())
}
