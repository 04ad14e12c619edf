use crate::{
    abstract_trait::product::repository::DynProductQueryRepository,
    context::RequestContext,
    domain::{product::Product, requests::product::ListProducts},
};
use shared::errors::RepositoryError;
use std::fmt;
use tracing::debug;
use validator::Validate;

/// Keyset pager over `products`, ordered by `product_id`.
///
/// Nothing is fetched until [`ProductPager::next_page`] is awaited, and no
/// connection is held between pages. [`ProductPager::rewind`] starts over.
pub struct ProductPager {
    query: DynProductQueryRepository,
    page_size: u32,
    cursor: Option<String>,
    exhausted: bool,
}

impl fmt::Debug for ProductPager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductPager")
            .field("page_size", &self.page_size)
            .field("cursor", &self.cursor)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

impl ProductPager {
    pub fn new(query: DynProductQueryRepository, page_size: u32) -> Result<Self, RepositoryError> {
        ListProducts::new(page_size, 0).validate()?;

        Ok(Self {
            query,
            page_size,
            cursor: None,
            exhausted: false,
        })
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetches the next page, or `None` once every row has been returned.
    pub async fn next_page(
        &mut self,
        ctx: &RequestContext,
    ) -> Result<Option<Vec<Product>>, RepositoryError> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self
            .query
            .list_after(ctx, self.cursor.as_deref(), self.page_size)
            .await?;

        // A short page means the table has nothing past it.
        if page.len() < self.page_size as usize {
            self.exhausted = true;
        }

        let Some(last) = page.last() else {
            return Ok(None);
        };
        self.cursor = Some(last.product_id.clone());

        debug!(
            "📄 Pager fetched {} products (cursor: {:?})",
            page.len(),
            self.cursor
        );

        Ok(Some(page))
    }

    pub fn rewind(&mut self) {
        self.cursor = None;
        self.exhausted = false;
    }

    /// Drains the remaining pages into one vector.
    pub async fn collect_remaining(
        &mut self,
        ctx: &RequestContext,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut products = Vec::new();
        while let Some(page) = self.next_page(ctx).await? {
            products.extend(page);
        }
        Ok(products)
    }
}
