//! # Domain Traits
//!
//! Seams between the dispatcher and the outside world, so the session and the
//! spot source are passed in explicitly and can be replaced in tests.

use async_trait::async_trait;

use crate::domain::error::TransportError;
use crate::domain::types::Spot;

/// Something that can put a raw frame on the APRS-IS connection.
#[async_trait]
pub trait FrameSink: Send {
    async fn send_raw(&mut self, frame: &str) -> Result<(), TransportError>;
}

/// Source of recent spots. Implementations never fail: errors become an empty list.
#[async_trait]
pub trait SpotSource: Send + Sync {
    async fn fetch(&self, limit: usize) -> Vec<Spot>;
}
