//! Ports implemented by the storage layer

mod repositories;

pub use repositories::*;
