//! Document Store

pub mod decimal;
pub mod errors;
pub mod filter;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use decimal::StoredDecimal;
pub use errors::DocumentStoreError;
pub use filter::{Condition, Filter};
pub use memory::MemoryDocumentStore;
pub use models::{Document, ID_FIELD};
pub use postgres::PgDocumentStore;
pub use store::*;
