//! Authentication
//!
//! Password hashing, token issuance/verification, and the registration and
//! login workflows built on top of them.

pub mod handlers;
pub mod password;
pub mod service;
pub mod token;

pub use password::PasswordHasher;
pub use service::AuthService;
pub use token::{AccessTokenClaims, TokenService};
