//! Reconciliation of inbound SIP provisioning.
//!
//! Converges remote LiveKit state onto the desired shape: exactly one inbound
//! trunk carrying the target number, and exactly one dispatch rule bound to
//! that trunk which dispatches the configured agent into per-call rooms.
//!
//! Conflicts are resolved by delete-and-recreate, never in-place mutation.
//! Dispatch rules reference trunks, so the cascade deletes rules strictly
//! before their trunks to satisfy the control plane's referential
//! constraints. All remote calls are awaited one at a time; the ordering is a
//! correctness requirement, not an artifact.

use crate::config::SetupConfig;
use crate::livekit::{DispatchSpec, SetupSummary, SipService, SipSetupError, TrunkSpec};

/// Run one reconciliation, releasing the client handle on every exit path.
///
/// This is the entry point callers should use: it performs [`reconcile`] and
/// then unconditionally calls [`SipService::close`], whether the run
/// succeeded or aborted on a failed remote call.
pub async fn run(
    sip: &dyn SipService,
    config: &SetupConfig,
) -> Result<SetupSummary, SipSetupError> {
    let result = reconcile(sip, config).await;
    sip.close().await;
    result
}

/// The reconciliation procedure: discover conflicts, cascade-delete
/// dependents, delete conflicting trunks, create the new trunk/rule pair.
///
/// Any failed remote call aborts immediately with no compensating action;
/// the only cleanup guarantee (client release) lives in [`run`].
pub async fn reconcile(
    sip: &dyn SipService,
    config: &SetupConfig,
) -> Result<SetupSummary, SipSetupError> {
    // Fail on a malformed project URL before touching remote state.
    let sip_endpoint = config.sip_endpoint()?;

    tracing::info!(
        "Checking for existing configuration for {}",
        config.inbound_number
    );
    let trunks = sip.list_inbound_trunks().await?;

    let conflicting: Vec<_> = trunks
        .into_iter()
        .filter(|t| t.numbers.iter().any(|n| n == &config.inbound_number))
        .collect();

    let mut deleted_rule_ids = Vec::new();
    let mut deleted_trunk_ids = Vec::new();

    if conflicting.is_empty() {
        tracing::info!("No conflicting configuration found");
    } else {
        for trunk in &conflicting {
            tracing::info!(
                "Found conflicting trunk: {} (name: {})",
                trunk.sip_trunk_id,
                trunk.name
            );
        }

        // Dispatch rules referencing a conflicting trunk must go first.
        let rules = sip.list_dispatch_rules().await?;
        for rule in rules {
            let references_conflict = rule
                .trunk_ids
                .iter()
                .any(|id| conflicting.iter().any(|t| &t.sip_trunk_id == id));
            if references_conflict {
                tracing::info!(
                    "Deleting linked dispatch rule: {} (name: {})",
                    rule.sip_dispatch_rule_id,
                    rule.name
                );
                sip.delete_dispatch_rule(&rule.sip_dispatch_rule_id).await?;
                deleted_rule_ids.push(rule.sip_dispatch_rule_id);
            }
        }

        for trunk in &conflicting {
            tracing::info!("Deleting conflicting trunk: {}", trunk.sip_trunk_id);
            sip.delete_trunk(&trunk.sip_trunk_id).await?;
            deleted_trunk_ids.push(trunk.sip_trunk_id.clone());
        }
        tracing::info!("Cleanup complete");
    }

    tracing::info!("Creating inbound trunk for {}", config.inbound_number);
    let trunk_spec = TrunkSpec {
        name: config.trunk_name.clone(),
        numbers: vec![config.inbound_number.clone()],
        allowed_addresses: config.allowed_addresses.clone(),
        krisp_enabled: config.krisp_enabled,
    };
    let trunk_id = sip.create_inbound_trunk(&trunk_spec).await?;
    tracing::info!("Created trunk: {trunk_id}");

    tracing::info!("Creating dispatch rule for agent '{}'", config.agent_name);
    let dispatch_spec = DispatchSpec {
        name: config.dispatch_name.clone(),
        trunk_ids: vec![trunk_id.clone()],
        room_prefix: config.room_prefix.clone(),
        agent_name: config.agent_name.clone(),
    };
    let dispatch_rule_id = sip.create_dispatch_rule(&dispatch_spec).await?;
    tracing::info!("Created dispatch rule: {dispatch_rule_id}");

    Ok(SetupSummary {
        trunk_id,
        dispatch_rule_id,
        sip_endpoint,
        deleted_rule_ids,
        deleted_trunk_ids,
    })
}
