//! Business domain entities. Pure data and behavior, no actor concerns.

pub mod cart;
pub mod customer;
pub mod order;
pub mod product;

pub use cart::*;
pub use customer::*;
pub use order::*;
pub use product::*;
