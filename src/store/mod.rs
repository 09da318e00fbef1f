//! Durable local cache of station observations.

pub mod error;
pub mod observation_store;
mod schema;
