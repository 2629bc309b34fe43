//! # Inbound Dispatcher
//!
//! Decides what to do with each packet from APRS-IS. Messages addressed to
//! this station that mention a request keyword are answered with an optional
//! ack followed by one reply per formatted spot line. Nothing here returns an
//! error: every failure is logged and the receive loop carries on.

use std::time::Duration;

use crate::application::formatter::MessageFormatter;
use crate::application::frames;
use crate::domain::config::PacingConfig;
use crate::domain::traits::{FrameSink, SpotSource};
use crate::domain::types::{InboundMessage, OutboundReply, Packet};
use crate::strings::logs;

pub const KEYWORDS: [&str; 4] = ["pota", "spot", "spots", "help"];

/// Delays between outbound frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pacing {
    pub ack_delay: Duration,
    pub reply_delay: Duration,
}

impl Pacing {
    pub fn from_config(config: &PacingConfig) -> Self {
        Self {
            ack_delay: Duration::from_secs(config.ack_delay_secs),
            reply_delay: Duration::from_secs(config.reply_delay_secs),
        }
    }
}

/// What happened to one packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// Not a message, or not addressed to us.
    Ignored,
    /// Addressed to us but no request keyword.
    NotRequest,
    Answered {
        acked: bool,
        sent: usize,
        failed: usize,
    },
}

pub struct InboundDispatcher<S> {
    identity: String,
    spots: S,
    limit: usize,
    pacing: Pacing,
}

impl<S: SpotSource> InboundDispatcher<S> {
    pub fn new(identity: impl Into<String>, spots: S, limit: usize, pacing: Pacing) -> Self {
        Self {
            identity: identity.into(),
            spots,
            limit,
            pacing,
        }
    }

    /// True if the (already case-folded) body asks for spots.
    pub fn is_request(body: &str) -> bool {
        KEYWORDS.iter().any(|k| body.contains(k))
    }

    pub async fn handle<F: FrameSink>(&self, packet: &Packet, sink: &mut F) -> HandleOutcome {
        if !packet.is_message_to(&self.identity) {
            tracing::trace!("ignored: {}", packet.raw);
            return HandleOutcome::Ignored;
        }
        let Some(msg) = InboundMessage::from_packet(packet) else {
            return HandleOutcome::Ignored;
        };

        tracing::info!(
            "{}",
            logs::message_received(
                &msg.sender,
                &msg.destination,
                &msg.body,
                msg.msg_no.as_deref()
            )
        );

        if !Self::is_request(&msg.body) {
            return HandleOutcome::NotRequest;
        }

        tracing::info!("{}", logs::PROCESSING_REQUEST);
        let spots = self.spots.fetch(self.limit).await;
        let replies: Vec<OutboundReply> = MessageFormatter::format(&spots)
            .into_iter()
            .map(|text| OutboundReply {
                destination: msg.sender.clone(),
                text,
            })
            .collect();

        let acked = match &msg.msg_no {
            Some(msg_no) => self.send_ack(sink, &msg.sender, msg_no).await,
            None => false,
        };

        let total = replies.len();
        let mut sent = 0;
        let mut failed = 0;
        for (idx, reply) in replies.iter().enumerate() {
            if idx > 0 {
                tokio::time::sleep(self.pacing.reply_delay).await;
            }
            let frame = frames::reply(&self.identity, &reply.destination, &reply.text);
            match sink.send_raw(&frame).await {
                Ok(()) => {
                    sent += 1;
                    tracing::info!("{}", logs::reply_sent(idx + 1, total, &reply.text));
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!("{}", logs::reply_failed(idx + 1, total, &e.to_string()));
                }
            }
        }

        HandleOutcome::Answered {
            acked,
            sent,
            failed,
        }
    }

    async fn send_ack<F: FrameSink>(&self, sink: &mut F, sender: &str, msg_no: &str) -> bool {
        let frame = frames::ack(&self.identity, sender, msg_no);
        match sink.send_raw(&frame).await {
            Ok(()) => {
                tracing::info!("{}", logs::ack_sent(sender, msg_no));
                tokio::time::sleep(self.pacing.ack_delay).await;
                true
            }
            Err(e) => {
                tracing::error!("{}", logs::ack_failed(sender, &e.to_string()));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::TransportError;
    use crate::domain::types::{MessageResponse, PacketFormat, Spot};
    use crate::infrastructure::packet;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ID: &str = "AI5KP-10";

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<String>,
        /// When each successful frame went out.
        sent_at: Vec<tokio::time::Instant>,
        /// Zero-based send attempts that should fail.
        fail_on: Vec<usize>,
        attempts: usize,
    }

    #[async_trait]
    impl FrameSink for RecordingSink {
        async fn send_raw(&mut self, frame: &str) -> Result<(), TransportError> {
            let attempt = self.attempts;
            self.attempts += 1;
            if self.fail_on.contains(&attempt) {
                return Err(TransportError::Closed);
            }
            self.frames.push(frame.to_string());
            self.sent_at.push(tokio::time::Instant::now());
            Ok(())
        }
    }

    struct FixedSpots {
        spots: Vec<Spot>,
        calls: AtomicUsize,
        last_limit: Mutex<Option<usize>>,
    }

    impl FixedSpots {
        fn new(spots: Vec<Spot>) -> Self {
            Self {
                spots,
                calls: AtomicUsize::new(0),
                last_limit: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl SpotSource for FixedSpots {
        async fn fetch(&self, limit: usize) -> Vec<Spot> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_limit.lock().unwrap() = Some(limit);
            self.spots.iter().take(limit).cloned().collect()
        }
    }

    fn dispatcher(spots: Vec<Spot>) -> InboundDispatcher<FixedSpots> {
        InboundDispatcher::new(ID, FixedSpots::new(spots), 5, Pacing::default())
    }

    fn two_spots() -> Vec<Spot> {
        vec![
            Spot::new("W1ABC", "14.260", "K-1234", "SSB"),
            Spot::new("K2XYZ", "7.074", "K-0001", "FT8"),
        ]
    }

    fn message(text: &str) -> Packet {
        packet::parse(&format!("N0CALL>APRS,TCPIP*::{:<9}:{}", ID, text)).unwrap()
    }

    #[tokio::test]
    async fn non_message_packets_are_ignored() {
        let d = dispatcher(two_spots());
        let mut sink = RecordingSink::default();
        let pkt = packet::parse("N0CALL>APRS:>pota status").unwrap();
        assert_eq!(pkt.format, PacketFormat::Other);

        assert_eq!(d.handle(&pkt, &mut sink).await, HandleOutcome::Ignored);
        assert!(sink.frames.is_empty());
        assert_eq!(d.spots.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn messages_for_other_stations_are_ignored() {
        let d = dispatcher(two_spots());
        let mut sink = RecordingSink::default();
        let pkt = packet::parse("N0CALL>APRS::AI5KP-1  :pota{1").unwrap();

        assert_eq!(d.handle(&pkt, &mut sink).await, HandleOutcome::Ignored);
        assert!(sink.frames.is_empty());
    }

    #[tokio::test]
    async fn messages_without_keywords_get_no_reply() {
        let d = dispatcher(two_spots());
        let mut sink = RecordingSink::default();

        let outcome = d.handle(&message("hello there{5"), &mut sink).await;
        assert_eq!(outcome, HandleOutcome::NotRequest);
        assert!(sink.frames.is_empty());
        assert_eq!(d.spots.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn incoming_acks_are_not_answered() {
        let d = dispatcher(two_spots());
        let mut sink = RecordingSink::default();
        let pkt = message("ack12");
        assert_eq!(pkt.response, Some(MessageResponse::Ack));

        assert_eq!(d.handle(&pkt, &mut sink).await, HandleOutcome::NotRequest);
        assert!(sink.frames.is_empty());
    }

    #[tokio::test]
    async fn keyword_match_is_case_insensitive_and_fetches_five() {
        let d = dispatcher(two_spots());
        let mut sink = RecordingSink::default();

        let outcome = d.handle(&message("POTA please"), &mut sink).await;
        assert_eq!(
            outcome,
            HandleOutcome::Answered {
                acked: false,
                sent: 2,
                failed: 0
            }
        );
        assert_eq!(*d.spots.last_limit.lock().unwrap(), Some(5));
        assert_eq!(
            sink.frames,
            vec![
                "AI5KP-10>APRS,TCPIP*::N0CALL   :1:W1ABC 14.260 K-1234 SSB",
                "AI5KP-10>APRS,TCPIP*::N0CALL   :2:K2XYZ 7.074 K-0001 FT8",
            ]
        );
    }

    #[tokio::test]
    async fn ack_is_sent_before_replies() {
        let d = dispatcher(two_spots());
        let mut sink = RecordingSink::default();

        let outcome = d.handle(&message("any spots?{7"), &mut sink).await;
        assert_eq!(
            outcome,
            HandleOutcome::Answered {
                acked: true,
                sent: 2,
                failed: 0
            }
        );
        assert_eq!(sink.frames.len(), 3);
        assert_eq!(sink.frames[0], "AI5KP-10>APRS,TCPIP*::N0CALL   :ack7");
        assert_eq!(
            sink.frames.iter().filter(|f| f.contains(":ack")).count(),
            1
        );
    }

    #[tokio::test]
    async fn empty_fetch_still_answers() {
        let d = dispatcher(Vec::new());
        let mut sink = RecordingSink::default();

        d.handle(&message("help"), &mut sink).await;
        assert_eq!(
            sink.frames,
            vec!["AI5KP-10>APRS,TCPIP*::N0CALL   :No POTA spots available"]
        );
    }

    #[tokio::test]
    async fn failed_ack_does_not_stop_replies() {
        let d = dispatcher(two_spots());
        let mut sink = RecordingSink {
            fail_on: vec![0],
            ..RecordingSink::default()
        };

        let outcome = d.handle(&message("pota{9"), &mut sink).await;
        assert_eq!(
            outcome,
            HandleOutcome::Answered {
                acked: false,
                sent: 2,
                failed: 0
            }
        );
        assert_eq!(sink.frames.len(), 2);
    }

    #[tokio::test]
    async fn failed_reply_does_not_stop_later_replies() {
        let d = dispatcher(two_spots());
        let mut sink = RecordingSink {
            fail_on: vec![0],
            ..RecordingSink::default()
        };

        let outcome = d.handle(&message("spots"), &mut sink).await;
        assert_eq!(
            outcome,
            HandleOutcome::Answered {
                acked: false,
                sent: 1,
                failed: 1
            }
        );
        assert_eq!(
            sink.frames,
            vec!["AI5KP-10>APRS,TCPIP*::N0CALL   :2:K2XYZ 7.074 K-0001 FT8"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn replies_are_paced_after_ack_and_between_lines() {
        let d = InboundDispatcher::new(
            ID,
            FixedSpots::new(two_spots()),
            5,
            Pacing::from_config(&PacingConfig::default()),
        );
        let mut sink = RecordingSink::default();
        let start = tokio::time::Instant::now();

        d.handle(&message("pota{3"), &mut sink).await;

        assert_eq!(sink.frames.len(), 3);
        let at = &sink.sent_at;
        assert_eq!(at[0] - start, Duration::ZERO);
        assert_eq!(at[1] - at[0], Duration::from_secs(1));
        assert_eq!(at[2] - at[1], Duration::from_secs(2));
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_ack_skips_ack_pause() {
        let d = InboundDispatcher::new(
            ID,
            FixedSpots::new(two_spots()),
            5,
            Pacing::from_config(&PacingConfig::default()),
        );
        let mut sink = RecordingSink {
            fail_on: vec![0],
            ..RecordingSink::default()
        };
        let start = tokio::time::Instant::now();

        d.handle(&message("pota{4"), &mut sink).await;

        assert_eq!(sink.frames.len(), 2);
        assert_eq!(sink.sent_at[0] - start, Duration::ZERO);
        assert_eq!(sink.sent_at[1] - sink.sent_at[0], Duration::from_secs(2));
    }

    #[test]
    fn keyword_detection() {
        type D = InboundDispatcher<FixedSpots>;
        assert!(D::is_request("pota"));
        assert!(D::is_request("any spots today"));
        assert!(D::is_request("need help"));
        assert!(!D::is_request("hello"));
        assert!(!D::is_request("SPOT"));
    }

    #[test]
    fn pacing_from_config() {
        let pacing = Pacing::from_config(&PacingConfig::default());
        assert_eq!(pacing.ack_delay, Duration::from_secs(1));
        assert_eq!(pacing.reply_delay, Duration::from_secs(2));
    }
}
