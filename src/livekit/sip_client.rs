use async_trait::async_trait;
use livekit_api::services::sip::{ListSIPDispatchRuleFilter, ListSIPInboundTrunkFilter, SIPClient};
use livekit_protocol as proto;

use crate::utils::sip_api_client::SipApiClient;

use super::types::{DispatchSpec, SipSetupError, TrunkSpec};

/// Telephony control-plane operations used by the reconciler.
///
/// The production implementation talks to LiveKit; tests substitute an
/// in-memory implementation so the reconciliation sequence can be verified
/// without a live control plane.
#[async_trait]
pub trait SipService: Send + Sync {
    /// Fetch the full list of existing inbound trunks.
    async fn list_inbound_trunks(&self)
    -> Result<Vec<proto::SipInboundTrunkInfo>, SipSetupError>;

    /// Fetch the full list of existing dispatch rules.
    async fn list_dispatch_rules(&self)
    -> Result<Vec<proto::SipDispatchRuleInfo>, SipSetupError>;

    /// Delete a dispatch rule by id.
    async fn delete_dispatch_rule(&self, rule_id: &str) -> Result<(), SipSetupError>;

    /// Delete a trunk by id. Dependent dispatch rules must already be gone.
    async fn delete_trunk(&self, trunk_id: &str) -> Result<(), SipSetupError>;

    /// Create an inbound trunk and return its newly assigned id.
    async fn create_inbound_trunk(&self, spec: &TrunkSpec) -> Result<String, SipSetupError>;

    /// Create a dispatch rule and return its newly assigned id.
    async fn create_dispatch_rule(&self, spec: &DispatchSpec) -> Result<String, SipSetupError>;

    /// Release the client handle. Called on every exit path, success or failure.
    async fn close(&self);
}

/// LiveKit-backed [`SipService`].
///
/// List and delete calls go through the official `livekit-api` SIP client.
/// The two create calls go through the raw Twirp client, which can set
/// `krisp_enabled` on the trunk and a `room_config` with agent dispatch on
/// the rule - neither is exposed by the upstream SDK's option structs.
pub struct LiveKitSipClient {
    sip_client: SIPClient,
    api_client: SipApiClient,
}

impl LiveKitSipClient {
    pub fn new(url: &str, api_key: &str, api_secret: &str) -> Self {
        let sip_client = SIPClient::with_api_key(url, api_key, api_secret);
        let api_client = SipApiClient::new(url, api_key, api_secret);

        Self {
            sip_client,
            api_client,
        }
    }
}

#[async_trait]
impl SipService for LiveKitSipClient {
    async fn list_inbound_trunks(
        &self,
    ) -> Result<Vec<proto::SipInboundTrunkInfo>, SipSetupError> {
        self.sip_client
            .list_sip_inbound_trunk(ListSIPInboundTrunkFilter::All)
            .await
            .map_err(|e| {
                SipSetupError::ConnectionFailed(format!("Failed to list SIP inbound trunks: {e}"))
            })
    }

    async fn list_dispatch_rules(
        &self,
    ) -> Result<Vec<proto::SipDispatchRuleInfo>, SipSetupError> {
        self.sip_client
            .list_sip_dispatch_rule(ListSIPDispatchRuleFilter::All)
            .await
            .map_err(|e| {
                SipSetupError::ConnectionFailed(format!("Failed to list SIP dispatch rules: {e}"))
            })
    }

    async fn delete_dispatch_rule(&self, rule_id: &str) -> Result<(), SipSetupError> {
        self.sip_client
            .delete_sip_dispatch_rule(rule_id)
            .await
            .map(|_| ())
            .map_err(|e| {
                SipSetupError::ConnectionFailed(format!(
                    "Failed to delete SIP dispatch rule {rule_id}: {e}"
                ))
            })
    }

    async fn delete_trunk(&self, trunk_id: &str) -> Result<(), SipSetupError> {
        self.sip_client
            .delete_sip_trunk(trunk_id)
            .await
            .map(|_| ())
            .map_err(|e| {
                SipSetupError::ConnectionFailed(format!(
                    "Failed to delete SIP trunk {trunk_id}: {e}"
                ))
            })
    }

    async fn create_inbound_trunk(&self, spec: &TrunkSpec) -> Result<String, SipSetupError> {
        let info = self.api_client.create_sip_inbound_trunk(spec).await?;
        Ok(info.sip_trunk_id)
    }

    async fn create_dispatch_rule(&self, spec: &DispatchSpec) -> Result<String, SipSetupError> {
        let info = self.api_client.create_sip_dispatch_rule(spec).await?;
        Ok(info.sip_dispatch_rule_id)
    }

    async fn close(&self) {
        // Both underlying clients are reqwest-based; their connection pools
        // are released when the handles drop. Nothing to flush.
    }
}
