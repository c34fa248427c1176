//! System orchestration, startup and shutdown, and process-level concerns.

pub mod order_log;
pub mod shop_system;
pub mod tracing;

pub use order_log::*;
pub use shop_system::*;
pub use self::tracing::*;
