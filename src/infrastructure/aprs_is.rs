//! # APRS-IS Client
//!
//! Minimal line-oriented client for an APRS-IS server: connect and log in,
//! send raw frames, and pull packets with transparent reconnection.
//! Implements [`FrameSink`] so the dispatcher can reply through it.

use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use crate::domain::config::AppConfig;
use crate::domain::error::TransportError;
use crate::domain::traits::FrameSink;
use crate::domain::types::Packet;
use crate::infrastructure::packet;
use crate::strings::logs;

const LOGIN_TIMEOUT: Duration = Duration::from_secs(30);
const SOFTWARE: &str = "pota-aprs";

struct Connection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

pub struct AprsIsClient {
    identity: String,
    passcode: String,
    addr: String,
    filter: Option<String>,
    reconnect_delay: Duration,
    conn: Option<Connection>,
}

impl AprsIsClient {
    pub fn new(
        identity: impl Into<String>,
        passcode: impl Into<String>,
        addr: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            passcode: passcode.into(),
            addr: addr.into(),
            filter: None,
            reconnect_delay: Duration::from_secs(5),
            conn: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let addr = format!("{}:{}", config.aprs_is.host, config.aprs_is.port);
        let mut client = Self::new(config.identity(), config.station.passcode.trim(), addr);
        client.filter = config
            .aprs_is
            .filter
            .as_ref()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());
        client.reconnect_delay = config.reconnect_delay();
        client
    }

    #[cfg(test)]
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    #[cfg(test)]
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    pub fn login_line(&self) -> String {
        let mut line = format!(
            "user {} pass {} vers {} {}",
            self.identity,
            self.passcode,
            SOFTWARE,
            env!("CARGO_PKG_VERSION")
        );
        if let Some(filter) = &self.filter {
            line.push_str(" filter ");
            line.push_str(filter);
        }
        line
    }

    /// Open the TCP connection and log in. Replaces any existing connection.
    pub async fn connect(&mut self) -> Result<(), TransportError> {
        self.conn = None;
        let stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|source| TransportError::Connect {
                addr: self.addr.clone(),
                source,
            })?;
        let (read_half, write_half) = stream.into_split();
        let mut conn = Connection {
            reader: BufReader::new(read_half),
            writer: write_half,
        };

        let login = format!("{}\r\n", self.login_line());
        conn.writer.write_all(login.as_bytes()).await?;
        conn.writer.flush().await?;

        match tokio::time::timeout(LOGIN_TIMEOUT, read_logresp(&mut conn.reader)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(TransportError::LoginRejected(
                    "no login response from server".to_string(),
                ));
            }
        }

        self.conn = Some(conn);
        Ok(())
    }

    /// Next packet from the server. Comments and unparsable lines are skipped;
    /// a dropped connection is re-established until it succeeds.
    pub async fn next_packet(&mut self) -> Packet {
        loop {
            let line = match self.read_line().await {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("{}", logs::connection_lost(&e.to_string()));
                    self.reconnect().await;
                    continue;
                }
            };

            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') {
                tracing::debug!("server: {}", line);
                continue;
            }
            match packet::parse(line) {
                Ok(packet) => return packet,
                Err(e) => tracing::debug!("{}", logs::packet_skipped(line, &e.to_string())),
            }
        }
    }

    /// Decoded lossily, so a line that is not UTF-8 still arrives as a packet.
    async fn read_line(&mut self) -> Result<String, TransportError> {
        let conn = self.conn.as_mut().ok_or(TransportError::Closed)?;
        let mut buf = Vec::new();
        let read = conn.reader.read_until(b'\n', &mut buf).await?;
        if read == 0 {
            return Err(TransportError::Closed);
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    async fn reconnect(&mut self) {
        self.conn = None;
        loop {
            tokio::time::sleep(self.reconnect_delay).await;
            tracing::info!("{}", logs::reconnecting(&self.addr));
            match self.connect().await {
                Ok(()) => {
                    tracing::info!("{}", logs::RECONNECTED);
                    return;
                }
                Err(e) => tracing::warn!("{}", logs::reconnect_failed(&e.to_string())),
            }
        }
    }

    /// Shut down the write side and drop the connection.
    pub async fn close(&mut self) -> Result<(), TransportError> {
        match self.conn.take() {
            Some(mut conn) => {
                conn.writer.shutdown().await?;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

async fn read_logresp(reader: &mut BufReader<OwnedReadHalf>) -> Result<(), TransportError> {
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Err(TransportError::Closed);
        }
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("# logresp") {
            tracing::info!("{}", logs::login_response(line));
            let status = rest
                .split_whitespace()
                .nth(1)
                .unwrap_or_default()
                .trim_end_matches(',');
            return if status == "verified" {
                Ok(())
            } else {
                Err(TransportError::LoginRejected(line.to_string()))
            };
        }
        tracing::debug!("server: {}", line);
    }
}

#[async_trait]
impl FrameSink for AprsIsClient {
    async fn send_raw(&mut self, frame: &str) -> Result<(), TransportError> {
        let conn = self.conn.as_mut().ok_or(TransportError::Closed)?;
        conn.writer.write_all(frame.as_bytes()).await?;
        conn.writer.write_all(b"\r\n").await?;
        conn.writer.flush().await?;
        Ok(())
    }
}
