//! Role-based access control.

mod checker;

pub use checker::*;
