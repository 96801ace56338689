use http::header::{AUTHORIZATION, CONTENT_TYPE};
use livekit_api::access_token::{AccessToken, AccessTokenError, SIPGrants};
use livekit_protocol as proto;
use prost::Message;
use reqwest::Client;

use crate::livekit::{DispatchSpec, SipSetupError, TrunkSpec};

/// Minimal LiveKit SIP API client for the two create calls the upstream SDK
/// does not fully cover: `CreateSIPInboundTrunk` with `krisp_enabled`, and
/// `CreateSIPDispatchRule` with a `room_config` carrying agent dispatch.
#[derive(Clone)]
pub struct SipApiClient {
    host: String,
    api_key: String,
    api_secret: String,
    client: Client,
}

impl SipApiClient {
    pub fn new(
        host: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        let host = Self::normalize_host(host.into());
        Self {
            host,
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            client: Client::new(),
        }
    }

    fn normalize_host(host: String) -> String {
        if host.starts_with("ws://") {
            host.replacen("ws://", "http://", 1)
        } else if host.starts_with("wss://") {
            host.replacen("wss://", "https://", 1)
        } else {
            host
        }
    }

    fn auth_header(&self) -> Result<String, AccessTokenError> {
        let token = AccessToken::with_api_key(&self.api_key, &self.api_secret)
            .with_sip_grants(SIPGrants {
                admin: true,
                ..Default::default()
            })
            .to_jwt()?;
        Ok(format!("Bearer {token}"))
    }

    fn twirp_endpoint(&self, method: &str) -> String {
        format!(
            "{}/twirp/livekit.SIP/{}",
            self.host.trim_end_matches('/'),
            method
        )
    }

    /// POST a protobuf-encoded Twirp request and decode the protobuf response.
    async fn twirp_request<Req, Resp>(
        &self,
        method: &str,
        request: &Req,
    ) -> Result<Resp, SipSetupError>
    where
        Req: Message,
        Resp: Message + Default,
    {
        let url = self.twirp_endpoint(method);

        let auth_header = self.auth_header().map_err(|e| {
            SipSetupError::ConnectionFailed(format!("Failed to create auth token: {e}"))
        })?;

        let mut buf = Vec::new();
        request.encode(&mut buf).map_err(|e| {
            SipSetupError::ConnectionFailed(format!("Failed to encode SIP request: {e}"))
        })?;

        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/protobuf")
            .header(AUTHORIZATION, auth_header)
            .body(buf)
            .send()
            .await
            .map_err(|e| {
                SipSetupError::ConnectionFailed(format!("Failed to send SIP request: {e}"))
            })?;

        if resp.status().is_success() {
            let bytes = resp.bytes().await.map_err(|e| {
                SipSetupError::ConnectionFailed(format!("Failed to read SIP response: {e}"))
            })?;
            Resp::decode(bytes.as_ref()).map_err(|e| {
                SipSetupError::ConnectionFailed(format!("Failed to decode SIP response: {e}"))
            })
        } else {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            Err(SipSetupError::ConnectionFailed(format!(
                "LiveKit SIP returned {status}: {body}"
            )))
        }
    }

    /// Create an inbound SIP trunk with the noise-suppression flag set.
    pub async fn create_sip_inbound_trunk(
        &self,
        spec: &TrunkSpec,
    ) -> Result<proto::SipInboundTrunkInfo, SipSetupError> {
        let request = proto::CreateSipInboundTrunkRequest {
            trunk: Some(proto::SipInboundTrunkInfo {
                name: spec.name.clone(),
                numbers: spec.numbers.clone(),
                allowed_addresses: spec.allowed_addresses.clone(),
                krisp_enabled: spec.krisp_enabled,
                ..Default::default()
            }),
        };

        self.twirp_request("CreateSIPInboundTrunk", &request).await
    }

    /// Create a dispatch rule using the "individual" variant (one room per
    /// call, names under `room_prefix`) with the named agent dispatched into
    /// each created room.
    pub async fn create_sip_dispatch_rule(
        &self,
        spec: &DispatchSpec,
    ) -> Result<proto::SipDispatchRuleInfo, SipSetupError> {
        let rule = proto::SipDispatchRule {
            rule: Some(proto::sip_dispatch_rule::Rule::DispatchRuleIndividual(
                proto::SipDispatchRuleIndividual {
                    room_prefix: spec.room_prefix.clone(),
                    pin: String::new(),
                    ..Default::default()
                },
            )),
        };

        let dispatch_rule = proto::SipDispatchRuleInfo {
            name: spec.name.clone(),
            trunk_ids: spec.trunk_ids.clone(),
            rule: Some(rule),
            room_config: Some(proto::RoomConfiguration {
                agents: vec![proto::RoomAgentDispatch {
                    agent_name: spec.agent_name.clone(),
                    metadata: String::new(),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            ..Default::default()
        };

        let request = proto::CreateSipDispatchRuleRequest {
            dispatch_rule: Some(dispatch_rule),
            ..Default::default()
        };

        self.twirp_request("CreateSIPDispatchRule", &request).await
    }
}
