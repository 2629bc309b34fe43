//! # Strings Module
//!
//! Centralizes log lines and the text the station puts on the air.

pub mod logs;
pub mod messages;
