//! # Infrastructure Layer
//!
//! Talks to the outside world: the APRS-IS server and the POTA spotting API.
//! Implements the traits defined in the Domain layer (`FrameSink`, `SpotSource`).

pub mod aprs_is;
pub mod packet;
pub mod pota;
