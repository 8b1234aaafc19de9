//! # Taskhub Server Library
//!
//! Component wiring and startup utilities for the Taskhub server binary.

pub mod di;
pub mod startup;
