use crate::{context::RequestContext, domain::product::Product};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    /// Inserts a new row. `Conflict` when `product_id` is already taken.
    async fn create_product(
        &self,
        ctx: &RequestContext,
        product: &Product,
    ) -> Result<(), RepositoryError>;
    async fn update_quantity(
        &self,
        ctx: &RequestContext,
        product_id: &str,
        quantity: i64,
    ) -> Result<(), RepositoryError>;
    async fn update_name(
        &self,
        ctx: &RequestContext,
        product_id: &str,
        name: &str,
    ) -> Result<(), RepositoryError>;
    async fn update_price(
        &self,
        ctx: &RequestContext,
        product_id: &str,
        price: Decimal,
    ) -> Result<(), RepositoryError>;
    /// Atomically adds `delta` (which may be negative) and returns the new
    /// quantity. `Conflict` when the result would drop below zero.
    async fn adjust_quantity(
        &self,
        ctx: &RequestContext,
        product_id: &str,
        delta: i64,
    ) -> Result<i64, RepositoryError>;
    /// `Ok(false)` when there was nothing to delete.
    async fn delete_product(
        &self,
        ctx: &RequestContext,
        product_id: &str,
    ) -> Result<bool, RepositoryError>;
}
