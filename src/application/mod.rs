//! # Application Layer
//!
//! Core behavior of the bridge: formatting spots, building frames,
//! dispatching inbound packets and running the APRS-IS session.

pub mod dispatcher;
pub mod formatter;
pub mod frames;
pub mod logging;
pub mod session;
