use crate::domain::product::Product;
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use sqlx::FromRow;

/// A `products` row as stored. `price` holds the exact decimal as text so
/// every backend keeps its full precision.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ProductRow {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub price: String,
}

/// Canonical text form of a price. Negative zero is stored as zero.
pub fn price_to_column(price: Decimal) -> String {
    let mut price = price;
    if price.is_zero() {
        price.set_sign_positive(true);
    }
    price.to_string()
}

pub fn price_from_column(raw: &str) -> Result<Decimal, RepositoryError> {
    raw.parse::<Decimal>().map_err(|e| {
        RepositoryError::Store(format!("price column holds {raw:?}, not a decimal: {e}"))
    })
}

impl From<&Product> for ProductRow {
    fn from(value: &Product) -> Self {
        ProductRow {
            product_id: value.product_id.clone(),
            name: value.name.clone(),
            quantity: value.quantity,
            price: price_to_column(value.price),
        }
    }
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(value: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            price: price_from_column(&value.price)?,
            product_id: value.product_id,
            name: value.name,
            quantity: value.quantity,
        })
    }
}
