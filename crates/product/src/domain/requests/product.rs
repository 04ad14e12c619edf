use crate::domain::product::validate_price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MAX_PAGE_SIZE: u32 = 500;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateQuantityRequest {
    pub product_id: String,

    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateNameRequest {
    pub product_id: String,

    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePriceRequest {
    pub product_id: String,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListProducts {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = MAX_PAGE_SIZE, message = "limit must be between 1 and 500"))]
    pub limit: u32,

    #[serde(default)]
    pub offset: u32,
}

impl ListProducts {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }
}

impl Default for ListProducts {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> u32 {
    50
}
