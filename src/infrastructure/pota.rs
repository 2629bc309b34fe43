//! # POTA Spot Fetcher
//!
//! Single best-effort GET against the spotting API. Any failure (timeout,
//! transport, status, payload) is logged here and surfaces as an empty list.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::config::AppConfig;
use crate::domain::error::FetchError;
use crate::domain::traits::SpotSource;
use crate::domain::types::Spot;
use crate::strings::logs;

pub struct SpotFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl SpotFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.pota.endpoint.clone(), config.fetch_timeout())
    }

    async fn try_fetch(&self, limit: usize) -> Result<Vec<Spot>, FetchError> {
        let res = self.client.get(&self.endpoint).send().await?;
        if !res.status().is_success() {
            return Err(FetchError::Status(res.status()));
        }
        let body = res.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Payload(e.to_string()))?;
        let serde_json::Value::Array(items) = value else {
            return Err(FetchError::Payload("expected a JSON array".to_string()));
        };

        tracing::info!("{}", logs::spots_fetched(items.len()));

        items
            .into_iter()
            .take(limit)
            .map(serde_json::from_value::<Spot>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FetchError::Payload(e.to_string()))
    }
}

#[async_trait]
impl SpotSource for SpotFetcher {
    async fn fetch(&self, limit: usize) -> Vec<Spot> {
        match self.try_fetch(limit).await {
            Ok(spots) => spots,
            Err(FetchError::Timeout) => {
                tracing::error!("{}", logs::FETCH_TIMEOUT);
                Vec::new()
            }
            Err(e) => {
                tracing::error!("{}", logs::fetch_failed(&e.to_string()));
                Vec::new()
            }
        }
    }
}
