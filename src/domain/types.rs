//! # Domain Types
//!
//! Records that flow through one request: the spot fetched from the API, the
//! packet received from APRS-IS and the reply sent back.

use serde::{Deserialize, Deserializer};

/// One activator spot as reported by the spotting API.
///
/// Fields the API omits (or sends as `null`) stay `None`. Numeric values are
/// kept in their textual form so they print exactly as received.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Spot {
    #[serde(default, deserialize_with = "text_field")]
    pub activator: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub reference: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub mode: Option<String>,
}

#[cfg(test)]
impl Spot {
    pub fn new(activator: &str, frequency: &str, reference: &str, mode: &str) -> Self {
        Self {
            activator: Some(activator.to_string()),
            frequency: Some(frequency.to_string()),
            reference: Some(reference.to_string()),
            mode: Some(mode.to_string()),
        }
    }
}

fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketFormat {
    /// User-to-user message (`:ADDRESSEE:text`).
    Message,
    /// Position, status, telemetry, anything else.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageResponse {
    Ack,
    Rej,
}

/// A packet received from APRS-IS, reduced to what the bridge consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub format: PacketFormat,
    pub from: String,
    pub addressee: Option<String>,
    pub message_text: String,
    pub msg_no: Option<String>,
    pub response: Option<MessageResponse>,
    pub raw: String,
}

impl Packet {
    pub fn is_message_to(&self, identity: &str) -> bool {
        self.format == PacketFormat::Message && self.addressee.as_deref() == Some(identity)
    }
}

/// Inbound request extracted from a qualifying packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub sender: String,
    pub destination: String,
    /// Trimmed and lower-cased.
    pub body: String,
    pub msg_no: Option<String>,
}

impl InboundMessage {
    pub fn from_packet(packet: &Packet) -> Option<Self> {
        let destination = packet.addressee.clone()?;
        Some(Self {
            sender: packet.from.clone(),
            destination,
            body: packet.message_text.trim().to_lowercase(),
            msg_no: packet.msg_no.clone().filter(|n| !n.is_empty()),
        })
    }
}

/// One line of reply text addressed to a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub destination: String,
    pub text: String,
}
