//! # Outbound Frames
//!
//! Exact TNC2 text for the three frames the bridge transmits.

pub const PATH: &str = "APRS,TCPIP*";
pub const ADDRESSEE_WIDTH: usize = 9;

/// Status beacon: `ID>APRS,TCPIP*:>text`.
pub fn beacon(identity: &str, text: &str) -> String {
    format!("{identity}>{PATH}:>{text}")
}

/// Acknowledgement for message number `msg_no`.
pub fn ack(identity: &str, recipient: &str, msg_no: &str) -> String {
    format!("{identity}>{PATH}::{}:ack{msg_no}", addressee(recipient))
}

pub fn reply(identity: &str, recipient: &str, text: &str) -> String {
    format!("{identity}>{PATH}::{}:{text}", addressee(recipient))
}

/// Recipient left-aligned in a space-padded field of exactly nine characters.
pub fn addressee(recipient: &str) -> String {
    let clipped: String = recipient.chars().take(ADDRESSEE_WIDTH).collect();
    format!("{clipped:<width$}", width = ADDRESSEE_WIDTH)
}
