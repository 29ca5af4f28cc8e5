//! Domain models and request payload types.
//!
//! Each entity module holds the serialized entity struct plus the
//! validated payload types for it: a `New*` struct for creates (all rules
//! enforced) and a `*Patch` struct for partial updates (only fields
//! present in the request are validated and applied).

pub mod account;
pub mod customer;
pub mod order;
pub mod product;

pub use account::{Account, AccountPatch, NewAccount};
pub use customer::{Customer, CustomerPatch, NewCustomer};
pub use order::{NewOrder, Order, OrderPatch};
pub use product::{NewProduct, Product, ProductPatch};
