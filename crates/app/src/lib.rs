//! Product store application core: documents, domain services and the
//! blocking facade used by batch tooling.

pub mod blocking;
pub mod context;
pub mod database;
pub mod documents;
pub mod domain;
pub mod uuids;

#[cfg(test)]
mod test;
