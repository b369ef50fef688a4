//! Common types used across the application.

pub mod money;
pub mod product_id;

pub use money::{Kilograms, Money, Price};
pub use product_id::{KeyKind, ProductId};
