pub mod config;
pub mod livekit;
pub mod reconciler;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::SetupConfig;
pub use livekit::{
    DispatchSpec, LiveKitSipClient, SetupSummary, SipService, SipSetupError, TrunkSpec,
};
pub use reconciler::{reconcile, run};
