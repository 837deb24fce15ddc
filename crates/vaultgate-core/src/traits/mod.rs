//! Collaborator traits implemented by the database crate.

pub mod store;

pub use store::UserStore;
