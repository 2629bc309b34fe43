//! # Domain Layer
//!
//! Configuration, data records, error taxonomy and the traits the rest of the
//! bridge is written against.

pub mod config;
pub mod error;
pub mod passcode;
pub mod traits;
pub mod types;
