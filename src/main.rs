use std::env;

use anyhow::anyhow;

use sip_inbound_setup::livekit::LiveKitSipClient;
use sip_inbound_setup::{SetupConfig, reconciler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Initialize crypto provider for TLS connections
    // This must be done before any TLS connections are attempted
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install default crypto provider"))?;

    // Configuration is environment-driven; reject stray arguments
    if let Some(arg) = env::args().nth(1) {
        anyhow::bail!("Unexpected argument '{arg}'. Configuration is read from the environment");
    }

    let config = SetupConfig::from_env()?;
    let sip_endpoint = config.sip_endpoint()?;

    println!("{}", "=".repeat(60));
    println!("LIVEKIT INBOUND SETUP");
    println!("{}", "=".repeat(60));
    println!();
    println!("SIP endpoint: {sip_endpoint}");
    println!("Inbound number: {}", config.inbound_number);

    let client = LiveKitSipClient::new(
        &config.livekit_url,
        &config.livekit_api_key,
        &config.livekit_api_secret,
    );

    let summary = reconciler::run(&client, &config).await?;

    println!();
    println!("{}", "=".repeat(60));
    println!("SETUP COMPLETE");
    println!("{}", "=".repeat(60));
    println!();
    println!("Inbound trunk: {}", summary.trunk_id);
    println!("  Number: {}", config.inbound_number);
    println!();
    println!("Dispatch rule: {}", summary.dispatch_rule_id);
    println!("  Agent: {}", config.agent_name);
    if !summary.deleted_trunk_ids.is_empty() {
        println!();
        println!(
            "Replaced {} conflicting trunk(s) and {} dispatch rule(s)",
            summary.deleted_trunk_ids.len(),
            summary.deleted_rule_ids.len()
        );
    }
    println!();
    println!("IMPORTANT - Set your provider's primary URI to:");
    println!("  {}", summary.sip_endpoint);

    Ok(())
}
