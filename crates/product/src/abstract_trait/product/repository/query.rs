use crate::{
    context::RequestContext,
    domain::{product::Product, requests::product::ListProducts},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        product_id: &str,
    ) -> Result<Option<Product>, RepositoryError>;
    async fn list(
        &self,
        ctx: &RequestContext,
        req: &ListProducts,
    ) -> Result<Vec<Product>, RepositoryError>;
    /// Keyset page: rows with `product_id` strictly greater than `after`.
    async fn list_after(
        &self,
        ctx: &RequestContext,
        after: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Product>, RepositoryError>;
}
