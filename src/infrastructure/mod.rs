//! Infrastructure layer - concrete implementations of the domain traits

pub mod account;
pub mod logging;
pub mod session;
