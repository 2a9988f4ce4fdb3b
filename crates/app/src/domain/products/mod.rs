//! Products

pub mod data;
pub mod errors;
pub mod mapper;
pub mod query;
pub mod records;
pub mod service;

pub use errors::{ProductValidationError, ProductsServiceError};
pub use service::*;
