//! # Configuration
//!
//! Loads and validates the bridge configuration (`data/config.yaml` by default).
//! Every section except `station` has working defaults; `station` defaults to
//! sentinel values so an unedited file fails validation.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::domain::error::ConfigError;
use crate::domain::passcode;

pub const DEFAULT_CONFIG_PATH: &str = "data/config.yaml";
pub const CALLSIGN_SENTINEL: &str = "YOUR-CALL";
pub const PASSCODE_SENTINEL: &str = "YOUR-PASSCODE";
pub const PASSCODE_ENV: &str = "APRS_PASSCODE";

/// Main application configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub station: StationConfig,
    #[serde(default)]
    pub aprs_is: AprsIsConfig,
    #[serde(default)]
    pub pota: PotaConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub beacon: BeaconConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Station identity on the APRS-IS network.
#[derive(Debug, Deserialize, Clone)]
pub struct StationConfig {
    #[serde(default = "default_callsign")]
    pub callsign: String,
    #[serde(default = "default_ssid")]
    pub ssid: String,
    #[serde(default = "default_passcode")]
    pub passcode: String,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            callsign: default_callsign(),
            ssid: default_ssid(),
            passcode: default_passcode(),
        }
    }
}

fn default_callsign() -> String {
    CALLSIGN_SENTINEL.to_string()
}
fn default_ssid() -> String {
    "10".to_string()
}
fn default_passcode() -> String {
    PASSCODE_SENTINEL.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AprsIsConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Optional server-side filter appended to the login line.
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_secs: u64,
}

impl Default for AprsIsConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            filter: None,
            reconnect_delay_secs: default_reconnect_delay(),
        }
    }
}

fn default_host() -> String {
    "rotate.aprs.net".to_string()
}
fn default_port() -> u16 {
    14580
}
fn default_reconnect_delay() -> u64 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct PotaConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for PotaConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_fetch_timeout(),
            limit: default_limit(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.pota.app/spot/activator".to_string()
}
fn default_fetch_timeout() -> u64 {
    10
}
fn default_limit() -> usize {
    5
}

/// Delays that keep outbound traffic under the network's rate limits.
#[derive(Debug, Deserialize, Clone)]
pub struct PacingConfig {
    #[serde(default = "default_ack_delay")]
    pub ack_delay_secs: u64,
    #[serde(default = "default_reply_delay")]
    pub reply_delay_secs: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            ack_delay_secs: default_ack_delay(),
            reply_delay_secs: default_reply_delay(),
        }
    }
}

fn default_ack_delay() -> u64 {
    1
}
fn default_reply_delay() -> u64 {
    2
}

#[derive(Debug, Deserialize, Clone)]
pub struct BeaconConfig {
    #[serde(default = "default_beacon_text")]
    pub text: String,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            text: default_beacon_text(),
        }
    }
}

fn default_beacon_text() -> String {
    crate::strings::messages::DEFAULT_BEACON.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub directory: String,
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_dir(),
            file: default_log_file(),
        }
    }
}

fn default_log_dir() -> String {
    "logs".to_string()
}
fn default_log_file() -> String {
    "pota_aprs.log".to_string()
}

impl AppConfig {
    /// Read and parse a YAML config file. Does not validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Apply `APRS_PASSCODE` (when set and non-empty) over the file value.
    pub fn apply_env_overrides(&mut self) {
        self.apply_passcode_override(std::env::var(PASSCODE_ENV).ok());
    }

    fn apply_passcode_override(&mut self, value: Option<String>) {
        if let Some(passcode) = value
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            self.station.passcode = passcode;
        }
    }

    /// Reject sentinel or malformed station settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let callsign = self.station.callsign.trim();
        let passcode = self.station.passcode.trim();

        if callsign == CALLSIGN_SENTINEL {
            return Err(ConfigError::Unset("callsign"));
        }
        if passcode == PASSCODE_SENTINEL {
            return Err(ConfigError::Unset("passcode"));
        }
        if callsign.is_empty() {
            return Err(ConfigError::Invalid {
                field: "callsign",
                reason: "must not be empty".to_string(),
            });
        }
        if passcode.parse::<i32>().is_err() {
            return Err(ConfigError::Invalid {
                field: "passcode",
                reason: format!("'{passcode}' is not numeric"),
            });
        }
        Ok(())
    }

    /// Full station identity, e.g. `AI5KP-10`.
    pub fn identity(&self) -> String {
        let callsign = self.station.callsign.trim().to_uppercase();
        let ssid = self.station.ssid.trim();
        if ssid.is_empty() {
            callsign
        } else {
            format!("{callsign}-{ssid}")
        }
    }

    /// True when the configured passcode matches the one derived from the callsign.
    pub fn passcode_matches(&self) -> bool {
        self.station
            .passcode
            .trim()
            .parse::<i32>()
            .is_ok_and(|p| p == passcode::compute(&self.station.callsign))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.pota.timeout_secs)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.aprs_is.reconnect_delay_secs)
    }
}
