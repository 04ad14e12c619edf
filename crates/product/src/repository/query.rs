use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    context::RequestContext,
    domain::{product::Product, requests::product::ListProducts},
    model::product::ProductRow,
    repository::with_connection,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use validator::Validate;

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        product_id: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        info!("🆔 Fetching product by ID: {:?}", product_id);

        let row = with_connection(&self.db, ctx, |mut conn| async move {
            sqlx::query_as::<_, ProductRow>(
                r#"
                SELECT product_id, name, quantity, price
                FROM products
                WHERE product_id = $1
                "#,
            )
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await
        })
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product {:?}: {}", product_id, e);
            e
        })?;

        row.map(Product::try_from).transpose()
    }

    async fn list(
        &self,
        ctx: &RequestContext,
        req: &ListProducts,
    ) -> Result<Vec<Product>, RepositoryError> {
        req.validate()?;

        info!(
            "🔍 Listing products | limit: {}, offset: {}",
            req.limit, req.offset
        );

        let limit = i64::from(req.limit);
        let offset = i64::from(req.offset);

        let rows = with_connection(&self.db, ctx, |mut conn| async move {
            sqlx::query_as::<_, ProductRow>(
                r#"
                SELECT product_id, name, quantity, price
                FROM products
                ORDER BY product_id ASC
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
        })
        .await
        .map_err(|e| {
            error!("❌ Failed to list products: {}", e);
            e
        })?;

        info!("✅ Listed {} products", rows.len());
        rows.into_iter().map(Product::try_from).collect()
    }

    async fn list_after(
        &self,
        ctx: &RequestContext,
        after: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Product>, RepositoryError> {
        ListProducts::new(limit, 0).validate()?;

        info!("🔍 Listing products after {:?} | limit: {}", after, limit);

        let limit = i64::from(limit);

        let rows = with_connection(&self.db, ctx, |mut conn| async move {
            match after {
                Some(after) => {
                    sqlx::query_as::<_, ProductRow>(
                        r#"
                        SELECT product_id, name, quantity, price
                        FROM products
                        WHERE product_id > $1
                        ORDER BY product_id ASC
                        LIMIT $2
                        "#,
                    )
                    .bind(after)
                    .bind(limit)
                    .fetch_all(&mut *conn)
                    .await
                }
                None => {
                    sqlx::query_as::<_, ProductRow>(
                        r#"
                        SELECT product_id, name, quantity, price
                        FROM products
                        ORDER BY product_id ASC
                        LIMIT $1
                        "#,
                    )
                    .bind(limit)
                    .fetch_all(&mut *conn)
                    .await
                }
            }
        })
        .await
        .map_err(|e| {
            error!("❌ Failed to list products after {:?}: {}", after, e);
            e
        })?;

        rows.into_iter().map(Product::try_from).collect()
    }
}
