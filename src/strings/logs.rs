pub const STARTING: &str = "Starting POTA APRS-IS bridge...";

pub fn station(identity: &str) -> String {
    format!("Station: {identity}")
}

pub fn config_load_fail(err: &str) -> String {
    format!("Failed to load configuration: {err}")
}

pub const CONFIG_INVALID: &str = "Invalid configuration";

pub fn passcode_mismatch(identity: &str) -> String {
    format!(
        "Passcode does not match the value derived from {identity}; the server may reject the login"
    )
}

pub const HTTP_CLIENT_FAILED: &str = "Failed to build HTTP client";

// Connection
pub fn connecting(host: &str, port: u16) -> String {
    format!("Connecting to APRS-IS at {host}:{port}...")
}

pub fn connect_failed(err: &str) -> String {
    format!("Failed to connect to APRS-IS: {err}")
}

pub const CONNECT_FATAL: &str = "Could not establish APRS-IS connection";
pub const CONNECTED: &str = "✅ Connected to APRS-IS";

pub fn login_response(line: &str) -> String {
    format!("Login response: {line}")
}

pub fn connection_lost(err: &str) -> String {
    format!("APRS-IS connection lost: {err}")
}

pub fn reconnecting(addr: &str) -> String {
    format!("Reconnecting to {addr}...")
}

pub const RECONNECTED: &str = "Reconnected to APRS-IS";

pub fn reconnect_failed(err: &str) -> String {
    format!("Reconnect failed: {err}")
}

pub fn close_failed(err: &str) -> String {
    format!("Error while closing connection: {err}")
}

pub const DISCONNECTED: &str = "Disconnected from APRS-IS";

// Session
pub const BEACON_SENT: &str = "Beacon sent";
pub const BEACON_FAILED: &str = "Failed to send beacon";
pub const SESSION_REUSED: &str = "Session already started";
pub const LISTENING: &str = "Listening for messages...";
pub const SHUTDOWN_REQUESTED: &str = "Shutting down...";

pub fn signal_unavailable(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

pub fn packet_skipped(line: &str, err: &str) -> String {
    format!("Skipping unparsable line {line:?}: {err}")
}

// Requests
pub fn message_received(
    sender: &str,
    destination: &str,
    body: &str,
    msg_no: Option<&str>,
) -> String {
    match msg_no {
        Some(no) => format!("📨 Message {sender} -> {destination}: {body:?} (#{no})"),
        None => format!("📨 Message {sender} -> {destination}: {body:?}"),
    }
}

pub const PROCESSING_REQUEST: &str = "Processing spot request";

pub fn ack_sent(sender: &str, msg_no: &str) -> String {
    format!("Sent ack{msg_no} to {sender}")
}

pub fn ack_failed(sender: &str, err: &str) -> String {
    format!("Failed to ack {sender}: {err}")
}

pub fn reply_sent(idx: usize, total: usize, text: &str) -> String {
    format!("Sent reply {idx}/{total}: {text}")
}

pub fn request_answered(acked: bool, sent: usize, failed: usize) -> String {
    format!("Request done: acked={acked} sent={sent} failed={failed}")
}

pub fn reply_failed(idx: usize, total: usize, err: &str) -> String {
    format!("Failed to send reply {idx}/{total}: {err}")
}

// POTA API
pub fn spots_fetched(count: usize) -> String {
    format!("Fetched {count} spots from POTA API")
}

pub const FETCH_TIMEOUT: &str = "POTA API request timed out";

pub fn fetch_failed(err: &str) -> String {
    format!("POTA API request failed: {err}")
}
