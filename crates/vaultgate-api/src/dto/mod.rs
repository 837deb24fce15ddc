//! Request and response DTOs.

pub mod request;
pub mod response;

pub use request::{EncryptedEnvelope, LoginRequest, RefreshRequest, RegisterRequest};
pub use response::{AuthResponse, ErrorBody, ProfileResponse, UsersResponse};
