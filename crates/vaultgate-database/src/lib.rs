//! # vaultgate-database
//!
//! PostgreSQL connection management and the concrete [`UserStore`]
//! implementations: `PgUserStore` backed by sqlx for production and
//! `MemoryUserStore` for tests and single-process experiments.
//!
//! [`UserStore`]: vaultgate_core::traits::UserStore

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryUserStore;
pub use repositories::user::PgUserStore;
