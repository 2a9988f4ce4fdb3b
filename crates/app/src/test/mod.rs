//! Test support shared by the unit tests of this crate.

pub(crate) mod helpers;

pub use context::TestContext;
pub use db::TestDb;
