//! Domain layer - core entities, validation rules, and storage traits

pub mod account;
pub mod error;
pub mod session;

pub use error::{ConflictKind, DomainError};
