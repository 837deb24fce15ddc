//! Session token issuance and validation.

pub mod claims;
pub mod issuer;
pub mod validator;

pub use claims::Claims;
pub use issuer::TokenIssuer;
pub use validator::{RejectReason, TokenValidator};
