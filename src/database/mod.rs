//! Database module
//!
//! This module holds the store abstraction, its PostgreSQL implementation
//! and an in-process implementation.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod service;
pub mod store;

// Re-export commonly used database components
pub use connection::{DatabasePool, PoolConfig, create_pool, run_migrations, health_check};
pub use memory::MemoryStore;
pub use repositories::{UserRepository, GroupRepository, MemberRepository};
pub use service::DatabaseService;
pub use store::GroupStore;
