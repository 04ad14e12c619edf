mod command;
mod pager;
mod query;

pub use self::command::ProductCommandRepository;
pub use self::pager::ProductPager;
pub use self::query::ProductQueryRepository;

use crate::{
    abstract_trait::product::repository::{DynProductCommandRepository, DynProductQueryRepository},
    context::RequestContext,
};
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Any, Transaction, pool::PoolConnection};
use std::{fmt, future::Future, sync::Arc};

#[derive(Clone)]
pub struct ProductRepository {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
}

impl fmt::Debug for ProductRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductRepository")
            .field("query", &"ProductQueryRepository")
            .field("command", &"ProductCommandRepository")
            .finish()
    }
}

impl ProductRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query =
            Arc::new(ProductQueryRepository::new(pool.clone())) as DynProductQueryRepository;

        let command =
            Arc::new(ProductCommandRepository::new(pool.clone())) as DynProductCommandRepository;

        Self { query, command }
    }

    /// Lazily walks every product in `product_id` order, `page_size` rows per
    /// round trip.
    pub fn pager(&self, page_size: u32) -> Result<ProductPager, RepositoryError> {
        ProductPager::new(self.query.clone(), page_size)
    }
}

/// Runs `work` on a connection checked out for this call only. The
/// connection goes back to the pool when `work` finishes, fails, or is
/// dropped by cancellation or deadline expiry.
pub(crate) async fn with_connection<T, F, Fut>(
    pool: &ConnectionPool,
    ctx: &RequestContext,
    work: F,
) -> Result<T, RepositoryError>
where
    F: FnOnce(PoolConnection<Any>) -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    ctx.run(async move {
        let conn = pool.acquire().await?;
        work(conn).await.map_err(RepositoryError::from)
    })
    .await
}

/// Like [`with_connection`], but `work` runs inside a transaction and must
/// commit it. A transaction dropped before commit, including by cancellation
/// or deadline expiry mid-statement, is rolled back.
pub(crate) async fn with_transaction<T, F, Fut>(
    pool: &ConnectionPool,
    ctx: &RequestContext,
    work: F,
) -> Result<T, RepositoryError>
where
    F: FnOnce(Transaction<'static, Any>) -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    ctx.run(async move {
        let tx = pool.begin().await?;
        work(tx).await.map_err(RepositoryError::from)
    })
    .await
}
