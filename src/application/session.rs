//! # Session Manager
//!
//! Owns the single APRS-IS connection for the life of the process:
//! validate config, connect, beacon, then hand every packet to the
//! dispatcher until interrupted.

use anyhow::{Context, Result};

use crate::application::dispatcher::{HandleOutcome, InboundDispatcher, Pacing};
use crate::application::frames;
use crate::domain::config::AppConfig;
use crate::domain::traits::{FrameSink, SpotSource};
use crate::infrastructure::aprs_is::AprsIsClient;
use crate::infrastructure::pota::SpotFetcher;
use crate::strings::logs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Listening,
    ShuttingDown,
}

pub struct SessionManager {
    config: AppConfig,
    state: SessionState,
}

impl SessionManager {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: SessionState::NotStarted,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Runs until Ctrl-C. Returns an error only for startup failures
    /// (bad configuration, first connection, beacon).
    pub async fn run(&mut self) -> Result<()> {
        if self.state != SessionState::NotStarted {
            anyhow::bail!(logs::SESSION_REUSED);
        }
        let identity = self.config.identity();
        tracing::info!("{}", logs::STARTING);
        tracing::info!("{}", logs::station(&identity));

        self.config.validate().context(logs::CONFIG_INVALID)?;
        if !self.config.passcode_matches() {
            tracing::warn!("{}", logs::passcode_mismatch(&identity));
        }

        let fetcher = SpotFetcher::from_config(&self.config).context(logs::HTTP_CLIENT_FAILED)?;
        let dispatcher = InboundDispatcher::new(
            identity.clone(),
            fetcher,
            self.config.pota.limit,
            Pacing::from_config(&self.config.pacing),
        );

        let mut client = AprsIsClient::from_config(&self.config);
        tracing::info!(
            "{}",
            logs::connecting(&self.config.aprs_is.host, self.config.aprs_is.port)
        );
        if let Err(e) = client.connect().await {
            tracing::error!("{}", logs::connect_failed(&e.to_string()));
            self.shutdown(&mut client).await;
            return Err(e).context(logs::CONNECT_FATAL);
        }
        tracing::info!("{}", logs::CONNECTED);

        let beacon = frames::beacon(&identity, &self.config.beacon.text);
        if let Err(e) = client.send_raw(&beacon).await {
            self.shutdown(&mut client).await;
            return Err(e).context(logs::BEACON_FAILED);
        }
        tracing::info!("{}", logs::BEACON_SENT);

        self.state = SessionState::Listening;
        tracing::info!("{}", logs::LISTENING);

        tokio::select! {
            () = listen(&mut client, &dispatcher) => {}
            () = interrupted() => tracing::info!("{}", logs::SHUTDOWN_REQUESTED),
        }

        self.shutdown(&mut client).await;
        Ok(())
    }

    async fn shutdown(&mut self, client: &mut AprsIsClient) {
        self.state = SessionState::ShuttingDown;
        if let Err(e) = client.close().await {
            tracing::debug!("{}", logs::close_failed(&e.to_string()));
        }
        tracing::info!("{}", logs::DISCONNECTED);
    }
}

/// Sequential receive loop: each packet is fully handled before the next is read.
async fn listen<S: SpotSource>(client: &mut AprsIsClient, dispatcher: &InboundDispatcher<S>) {
    loop {
        let packet = client.next_packet().await;
        if let HandleOutcome::Answered {
            acked,
            sent,
            failed,
        } = dispatcher.handle(&packet, &mut *client).await
        {
            tracing::debug!("{}", logs::request_answered(acked, sent, failed));
        }
    }
}

async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("{}", logs::signal_unavailable(&e.to_string()));
        std::future::pending::<()>().await;
    }
}
