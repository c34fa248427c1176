//! The catalog actor: product store, stock reservation, and low-stock
//! scanning.

pub mod error;
pub mod messages;
pub mod service;

pub use error::*;
pub use messages::*;
pub use service::*;
