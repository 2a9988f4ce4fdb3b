//! Products Data

use rust_decimal::Decimal;

use crate::domain::products::errors::ProductValidationError;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i64,
    pub price: Decimal,
    pub status: bool,
}

impl NewProduct {
    /// Trim the name and check every field against the product rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule the payload breaks.
    pub fn validated(self) -> Result<Self, ProductValidationError> {
        Ok(Self {
            name: validate_name(&self.name)?,
            quantity: validate_quantity(self.quantity)?,
            price: validate_price(self.price)?,
            status: self.status,
        })
    }
}

/// Product Update Data
///
/// Only the fields that are `Some` are written; the rest keep their stored
/// values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
    pub status: Option<bool>,
}

impl ProductUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.status.is_none()
    }

    /// Check the fields that are present; absent fields stay absent.
    ///
    /// # Errors
    ///
    /// Returns the first rule a present field breaks.
    pub fn validated(self) -> Result<Self, ProductValidationError> {
        Ok(Self {
            name: self.name.as_deref().map(validate_name).transpose()?,
            quantity: self.quantity.map(validate_quantity).transpose()?,
            price: self.price.map(validate_price).transpose()?,
            status: self.status,
        })
    }
}

/// Product list filter. Absent parameters do not constrain the result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductFilter {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub status: Option<bool>,
}

fn validate_name(name: &str) -> Result<String, ProductValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ProductValidationError::EmptyName);
    }

    Ok(name.to_string())
}

fn validate_quantity(quantity: i64) -> Result<i64, ProductValidationError> {
    if quantity < 0 {
        return Err(ProductValidationError::NegativeQuantity);
    }

    Ok(quantity)
}

// -0 is zero, not negative.
fn validate_price(price: Decimal) -> Result<Decimal, ProductValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductValidationError::NegativePrice);
    }

    Ok(price)
}
