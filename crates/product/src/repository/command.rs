use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    context::RequestContext,
    domain::{
        product::Product,
        requests::product::{UpdateNameRequest, UpdatePriceRequest, UpdateQuantityRequest},
    },
    model::product::{ProductRow, price_to_column},
    repository::with_transaction,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info, warn};
use validator::Validate;

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

enum Adjustment {
    Applied(i64),
    Overflow,
    Missing,
}

fn require_single_row(rows_affected: u64, product_id: &str) -> Result<(), RepositoryError> {
    if rows_affected == 0 {
        warn!("⚠️ No product with ID {:?}", product_id);
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        ctx: &RequestContext,
        product: &Product,
    ) -> Result<(), RepositoryError> {
        product.validate()?;
        let row = ProductRow::from(product);

        info!("🆕 Creating product {:?} ({})", row.product_id, row.name);

        let result = with_transaction(&self.db, ctx, |mut tx| async move {
            let result = sqlx::query(
                r#"
                INSERT INTO products (product_id, name, quantity, price)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (product_id) DO NOTHING
                "#,
            )
            .bind(row.product_id)
            .bind(row.name)
            .bind(row.quantity)
            .bind(row.price)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok(result)
        })
        .await
        .map_err(|e| {
            error!("❌ Failed to create product {:?}: {}", product.product_id, e);
            e
        })?;

        if result.rows_affected() == 0 {
            warn!("⚠️ Product {:?} already exists", product.product_id);
            return Err(RepositoryError::Conflict(format!(
                "product {} already exists",
                product.product_id
            )));
        }

        info!("✅ Created product {:?}", product.product_id);
        Ok(())
    }

    async fn update_quantity(
        &self,
        ctx: &RequestContext,
        product_id: &str,
        quantity: i64,
    ) -> Result<(), RepositoryError> {
        let req = UpdateQuantityRequest {
            product_id: product_id.to_string(),
            quantity,
        };
        req.validate()?;

        info!("🔄 Setting quantity of {:?} to {}", product_id, quantity);

        let result = with_transaction(&self.db, ctx, |mut tx| async move {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET quantity = $2
                WHERE product_id = $1
                "#,
            )
            .bind(req.product_id)
            .bind(req.quantity)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok(result)
        })
        .await
        .map_err(|e| {
            error!("❌ Failed to update quantity of {:?}: {}", product_id, e);
            e
        })?;

        require_single_row(result.rows_affected(), product_id)?;

        info!("✅ Quantity of {:?} is now {}", product_id, quantity);
        Ok(())
    }

    async fn update_name(
        &self,
        ctx: &RequestContext,
        product_id: &str,
        name: &str,
    ) -> Result<(), RepositoryError> {
        let req = UpdateNameRequest {
            product_id: product_id.to_string(),
            name: name.to_string(),
        };
        req.validate()?;

        info!("🔄 Renaming {:?}", product_id);

        let result = with_transaction(&self.db, ctx, |mut tx| async move {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET name = $2
                WHERE product_id = $1
                "#,
            )
            .bind(req.product_id)
            .bind(req.name)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok(result)
        })
        .await
        .map_err(|e| {
            error!("❌ Failed to rename {:?}: {}", product_id, e);
            e
        })?;

        require_single_row(result.rows_affected(), product_id)?;

        info!("✅ Renamed {:?}", product_id);
        Ok(())
    }

    async fn update_price(
        &self,
        ctx: &RequestContext,
        product_id: &str,
        price: Decimal,
    ) -> Result<(), RepositoryError> {
        let req = UpdatePriceRequest {
            product_id: product_id.to_string(),
            price,
        };
        req.validate()?;

        info!("🔄 Setting price of {:?} to {}", product_id, price);

        let result = with_transaction(&self.db, ctx, |mut tx| async move {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET price = $2
                WHERE product_id = $1
                "#,
            )
            .bind(req.product_id)
            .bind(price_to_column(req.price))
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok(result)
        })
        .await
        .map_err(|e| {
            error!("❌ Failed to update price of {:?}: {}", product_id, e);
            e
        })?;

        require_single_row(result.rows_affected(), product_id)?;

        info!("✅ Price of {:?} is now {}", product_id, price);
        Ok(())
    }

    async fn adjust_quantity(
        &self,
        ctx: &RequestContext,
        product_id: &str,
        delta: i64,
    ) -> Result<i64, RepositoryError> {
        info!("🔁 Adjusting quantity of {:?} by {}", product_id, delta);

        // Rows above the ceiling would overflow a 64-bit quantity.
        let ceiling = i64::MAX - delta.max(0);

        let adjustment = with_transaction(&self.db, ctx, |mut tx| async move {
            let updated = sqlx::query_scalar::<_, i64>(
                r#"
                UPDATE products
                SET quantity = quantity + $2
                WHERE product_id = $1 AND quantity <= $3
                RETURNING quantity
                "#,
            )
            .bind(product_id)
            .bind(delta)
            .bind(ceiling)
            .fetch_optional(&mut *tx)
            .await?;

            let adjustment = match updated {
                Some(quantity) => Adjustment::Applied(quantity),
                None => {
                    let existing = sqlx::query_scalar::<_, i64>(
                        r#"
                        SELECT quantity
                        FROM products
                        WHERE product_id = $1
                        "#,
                    )
                    .bind(product_id)
                    .fetch_optional(&mut *tx)
                    .await?;

                    match existing {
                        Some(_) => Adjustment::Overflow,
                        None => Adjustment::Missing,
                    }
                }
            };

            tx.commit().await?;
            Ok(adjustment)
        })
        .await
        .map_err(|e| {
            error!("❌ Failed to adjust quantity of {:?}: {}", product_id, e);
            e
        })?;

        match adjustment {
            Adjustment::Applied(new_quantity) => {
                info!(
                    "✅ Adjusted quantity of {:?} (new quantity: {})",
                    product_id, new_quantity
                );
                Ok(new_quantity)
            }
            Adjustment::Overflow => {
                warn!(
                    "⚠️ Adjusting {:?} by {} would overflow its quantity",
                    product_id, delta
                );
                Err(RepositoryError::Conflict(format!(
                    "adjusting product {product_id} by {delta} overflows its quantity"
                )))
            }
            Adjustment::Missing => {
                warn!("⚠️ No product with ID {:?}", product_id);
                Err(RepositoryError::NotFound)
            }
        }
    }

    async fn delete_product(
        &self,
        ctx: &RequestContext,
        product_id: &str,
    ) -> Result<bool, RepositoryError> {
        info!("❌ Deleting product {:?}", product_id);

        let result = with_transaction(&self.db, ctx, |mut tx| async move {
            let result = sqlx::query(
                r#"
                DELETE FROM products
                WHERE product_id = $1
                "#,
            )
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok(result)
        })
        .await
        .map_err(|e| {
            error!("❌ Failed to delete product {:?}: {}", product_id, e);
            e
        })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("✅ Product {:?} deleted", product_id);
        } else {
            info!("ℹ️ Product {:?} was already absent", product_id);
        }

        Ok(deleted)
    }
}
