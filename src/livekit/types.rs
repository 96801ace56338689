use serde::Serialize;

/// Desired state for the inbound SIP trunk created by a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrunkSpec {
    /// Display name of the trunk
    pub name: String,
    /// Phone numbers the trunk accepts (a single number for inbound setup)
    pub numbers: Vec<String>,
    /// Allowed source IP addresses/CIDR blocks
    pub allowed_addresses: Vec<String>,
    /// Enable Krisp noise suppression on inbound audio
    pub krisp_enabled: bool,
}

/// Desired state for the dispatch rule bound to the new trunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSpec {
    /// Display name of the dispatch rule
    pub name: String,
    /// Trunk ids the rule applies to (the freshly created trunk)
    pub trunk_ids: Vec<String>,
    /// Prefix for per-call room names ("individual" dispatch variant)
    pub room_prefix: String,
    /// Agent dispatched into each created room
    pub agent_name: String,
}

/// Result of a completed reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct SetupSummary {
    pub trunk_id: String,
    pub dispatch_rule_id: String,
    /// SIP ingress endpoint derived from the project URL
    pub sip_endpoint: String,
    /// Dispatch rules removed during conflict cleanup, in deletion order
    pub deleted_rule_ids: Vec<String>,
    /// Trunks removed during conflict cleanup, in deletion order
    pub deleted_trunk_ids: Vec<String>,
}

/// Error types for SIP provisioning
#[derive(Debug, thiserror::Error)]
pub enum SipSetupError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}
