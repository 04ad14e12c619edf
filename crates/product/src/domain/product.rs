use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[validate(length(min = 1, message = "product_id must not be empty"))]
    pub product_id: String,

    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i64,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

impl Product {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        price: Decimal,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            quantity,
            price,
        }
    }
}

pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("negative")
            .with_message(Cow::Borrowed("price must not be negative")));
    }

    Ok(())
}
