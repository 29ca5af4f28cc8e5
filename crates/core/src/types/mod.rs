//! Newtype wrappers shared across Shopledger crates.

pub mod email;
pub mod id;
pub mod price;

pub use email::{Email, EmailError};
pub use id::{AccountId, CustomerId, OrderId, ProductId};
pub use price::{Price, PriceError};
