//! Session infrastructure: manager and in-memory store

pub mod in_memory;
pub mod manager;

pub use in_memory::InMemorySessionStore;
pub use manager::SessionManager;
