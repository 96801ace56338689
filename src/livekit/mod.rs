//! # LiveKit SIP Integration Module
//!
//! This module provides the telephony control-plane surface used by the
//! inbound setup tool: a [`SipService`] trait describing the operations the
//! reconciler needs (list/delete/create trunks and dispatch rules), and a
//! LiveKit-backed implementation.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use sip_inbound_setup::livekit::LiveKitSipClient;
//! use sip_inbound_setup::{SetupConfig, reconciler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SetupConfig::from_env()?;
//!     let client = LiveKitSipClient::new(
//!         &config.livekit_url,
//!         &config.livekit_api_key,
//!         &config.livekit_api_secret,
//!     );
//!
//!     let summary = reconciler::run(&client, &config).await?;
//!     println!("Trunk: {}", summary.trunk_id);
//!     Ok(())
//! }
//! ```

mod sip_client;
mod types;

// Re-export public types and traits
pub use sip_client::{LiveKitSipClient, SipService};
pub use types::{DispatchSpec, SetupSummary, SipSetupError, TrunkSpec};
