//! # APRS Packet Parsing
//!
//! Turns one APRS-IS text line (`SRC>DEST,PATH:BODY`) into a [`Packet`].
//! Only user-to-user messages are decoded in detail; every other body is
//! tagged [`PacketFormat::Other`] and carried through untouched.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::error::PacketError;
use crate::domain::types::{MessageResponse, Packet, PacketFormat};

static MESSAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:(.{9}):(.*)$").expect("message pattern"));

static RESPONSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(ack|rej)([A-Za-z0-9]{1,5})(?:\}.*)?\s*$").expect("response pattern")
});

static MSG_NO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)\{([A-Za-z0-9]{1,5})(?:\}[A-Za-z0-9]{0,5})?\s*$").expect("msgno pattern")
});

pub fn parse(line: &str) -> Result<Packet, PacketError> {
    let raw = line.trim_end_matches(['\r', '\n']);
    let (header, body) = raw.split_once(':').ok_or(PacketError::MissingHeader)?;
    let (from, _path) = header.split_once('>').ok_or(PacketError::MissingHeader)?;
    if from.trim().is_empty() {
        return Err(PacketError::EmptySource);
    }

    let mut packet = Packet {
        format: PacketFormat::Other,
        from: from.trim().to_string(),
        addressee: None,
        message_text: String::new(),
        msg_no: None,
        response: None,
        raw: raw.to_string(),
    };

    let Some(caps) = MESSAGE.captures(body) else {
        return Ok(packet);
    };

    packet.format = PacketFormat::Message;
    packet.addressee = Some(caps[1].trim().to_string());
    let text = &caps[2];

    if let Some(resp) = RESPONSE.captures(text) {
        packet.response = Some(if &resp[1] == "ack" {
            MessageResponse::Ack
        } else {
            MessageResponse::Rej
        });
        packet.msg_no = Some(resp[2].to_string());
    } else if let Some(numbered) = MSG_NO.captures(text) {
        packet.message_text = numbered[1].to_string();
        packet.msg_no = Some(numbered[2].to_string());
    } else {
        packet.message_text = text.to_string();
    }

    Ok(packet)
}
