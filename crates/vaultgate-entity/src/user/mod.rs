//! User entity and related value objects.

pub mod model;
pub mod role;

pub use model::{NewUser, User, UserProfile};
pub use role::UserRole;
