//! Session domain: entity, store trait, expiry policy

mod entity;
mod store;

pub use entity::Session;
pub use store::{AuthRequired, ExpiryPolicy, SessionStore, SessionToken};
