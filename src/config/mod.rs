//! Configuration for the inbound setup tool
//!
//! Configuration is environment-driven (with `.env` support via dotenvy) and
//! exposed as an explicit [`SetupConfig`] structure passed into the
//! reconciler. Required values fail loading with an explicit error; everything
//! else has a documented default.
//!
//! # Modules
//! - `env`: Environment variable loading
//! - `utils`: Utility functions for configuration parsing

use crate::livekit::SipSetupError;

mod env;
mod utils;

/// Default inbound number provisioned when `SIP_INBOUND_NUMBER` is unset.
pub const DEFAULT_INBOUND_NUMBER: &str = "+912271264190";
/// Default agent dispatched into rooms created for inbound calls.
pub const DEFAULT_AGENT_NAME: &str = "voice-assistant";
/// Default prefix for per-call room names.
pub const DEFAULT_ROOM_PREFIX: &str = "call-";
/// Default trunk display name.
pub const DEFAULT_TRUNK_NAME: &str = "Inbound Trunk";
/// Default dispatch rule display name.
pub const DEFAULT_DISPATCH_NAME: &str = "Inbound Agent Dispatch";

/// Setup configuration
///
/// Everything the reconciler needs for one provisioning run:
/// - LiveKit project URL and API credential pair (required)
/// - Target inbound number and agent name
/// - Trunk/dispatch display names, room prefix, allow-list, noise suppression
#[derive(Debug, Clone)]
pub struct SetupConfig {
    // LiveKit connection
    pub livekit_url: String,
    pub livekit_api_key: String,
    pub livekit_api_secret: String,

    // Provisioning targets
    pub inbound_number: String,
    pub agent_name: String,

    // Resource naming and trunk behavior
    pub trunk_name: String,
    pub dispatch_name: String,
    pub room_prefix: String,
    pub allowed_addresses: Vec<String>,
    pub krisp_enabled: bool,
}

impl SetupConfig {
    /// Derive the SIP ingress endpoint from the project URL.
    ///
    /// The project id is the first dot-separated label of the URL host, with
    /// scheme and port stripped: `wss://myproject.livekit.cloud` becomes
    /// `myproject.sip.livekit.cloud`. A URL without a usable host is an
    /// explicit configuration error.
    pub fn sip_endpoint(&self) -> Result<String, SipSetupError> {
        let host = self
            .livekit_url
            .trim()
            .trim_start_matches("wss://")
            .trim_start_matches("ws://")
            .trim_start_matches("https://")
            .trim_start_matches("http://");

        let project_id = host
            .split('.')
            .next()
            .unwrap_or_default()
            .split(':')
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        if project_id.is_empty() {
            return Err(SipSetupError::InvalidConfig(format!(
                "LIVEKIT_URL '{}' does not contain a project host",
                self.livekit_url
            )));
        }

        Ok(format!("{project_id}.sip.livekit.cloud"))
    }
}

/// Validate a room-name prefix: alphanumeric characters, '-' and '_' only.
pub(crate) fn validate_room_prefix(prefix: &str) -> Result<(), String> {
    if prefix.is_empty() {
        return Err("Room prefix cannot be empty".to_string());
    }
    if let Some(ch) = prefix
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
    {
        return Err(format!(
            "Room prefix contains invalid character '{ch}' - only alphanumeric, '-' and '_' are allowed"
        ));
    }
    Ok(())
}
