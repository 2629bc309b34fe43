//! # Messages
//!
//! Text sent to other stations over APRS-IS.

pub const NO_SPOTS: &str = "No POTA spots available";
pub const DEFAULT_BEACON: &str = "POTA Spot Server v1.0 - Send 'POTA' for spots";
