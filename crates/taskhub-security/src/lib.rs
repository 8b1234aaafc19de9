//! # Taskhub Security
//!
//! JWT issuance and validation, Argon2 password hashing, and the
//! declarative role guards attached to private routes.

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::*;
pub use password::*;
pub use rbac::*;
