use std::env;

use crate::livekit::SipSetupError;
use crate::utils::validate_inbound_number;

use super::utils::{parse_bool, parse_list};
use super::{
    DEFAULT_AGENT_NAME, DEFAULT_DISPATCH_NAME, DEFAULT_INBOUND_NUMBER, DEFAULT_ROOM_PREFIX,
    DEFAULT_TRUNK_NAME, SetupConfig, validate_room_prefix,
};

fn required(name: &str) -> Result<String, SipSetupError> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SipSetupError::InvalidConfig(format!("{name} must be set")))
}

impl SetupConfig {
    /// Load configuration from environment variables
    ///
    /// Also loads from a `.env` file if present using dotenvy. The LiveKit
    /// URL and API credential pair are required; everything else falls back
    /// to the documented defaults.
    ///
    /// # Errors
    /// Returns an error if:
    /// - `LIVEKIT_URL`, `LIVEKIT_API_KEY` or `LIVEKIT_API_SECRET` is missing
    /// - The inbound number is not E.164-like (`+` followed by digits)
    /// - The room prefix contains characters other than alphanumerics, '-', '_'
    pub fn from_env() -> Result<Self, SipSetupError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let livekit_url = required("LIVEKIT_URL")?;
        let livekit_api_key = required("LIVEKIT_API_KEY")?;
        let livekit_api_secret = required("LIVEKIT_API_SECRET")?;

        let inbound_number = env::var("SIP_INBOUND_NUMBER")
            .unwrap_or_else(|_| DEFAULT_INBOUND_NUMBER.to_string());
        let inbound_number = validate_inbound_number(&inbound_number)
            .map_err(|e| SipSetupError::InvalidConfig(format!("SIP_INBOUND_NUMBER: {e}")))?;

        let agent_name =
            env::var("SIP_AGENT_NAME").unwrap_or_else(|_| DEFAULT_AGENT_NAME.to_string());
        if agent_name.trim().is_empty() {
            return Err(SipSetupError::InvalidConfig(
                "SIP_AGENT_NAME cannot be empty".to_string(),
            ));
        }

        let trunk_name =
            env::var("SIP_TRUNK_NAME").unwrap_or_else(|_| DEFAULT_TRUNK_NAME.to_string());
        let dispatch_name =
            env::var("SIP_DISPATCH_NAME").unwrap_or_else(|_| DEFAULT_DISPATCH_NAME.to_string());

        let room_prefix =
            env::var("SIP_ROOM_PREFIX").unwrap_or_else(|_| DEFAULT_ROOM_PREFIX.to_string());
        validate_room_prefix(&room_prefix)
            .map_err(|e| SipSetupError::InvalidConfig(format!("SIP_ROOM_PREFIX: {e}")))?;

        // Accept traffic from any source address unless an allow-list is given
        let allowed_addresses = env::var("SIP_ALLOWED_ADDRESSES")
            .ok()
            .map(|v| parse_list(&v))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| vec!["0.0.0.0/0".to_string()]);

        let krisp_enabled = env::var("SIP_KRISP_ENABLED")
            .ok()
            .and_then(|v| parse_bool(&v))
            .unwrap_or(true);

        Ok(SetupConfig {
            livekit_url,
            livekit_api_key,
            livekit_api_secret,
            inbound_number,
            agent_name,
            trunk_name,
            dispatch_name,
            room_prefix,
            allowed_addresses,
            krisp_enabled,
        })
    }
}
