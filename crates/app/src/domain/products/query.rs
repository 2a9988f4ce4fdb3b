//! Product Query Builder

use crate::{documents::Filter, domain::products::data::ProductFilter};

/// Translate list parameters into a store filter. Price bounds become one
/// inclusive range clause; `status` becomes an equality clause, including
/// when it is `false`.
#[must_use]
pub fn build_filter(params: &ProductFilter) -> Filter {
    let filter = Filter::new().range("price", params.min_price, params.max_price);

    match params.status {
        Some(status) => filter.eq("status", status),
        None => filter,
    }
}
