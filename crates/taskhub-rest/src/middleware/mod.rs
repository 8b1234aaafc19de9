//! HTTP middleware.

mod auth;
mod guard;
mod logging;

pub use auth::*;
pub use guard::*;
pub use logging::*;
