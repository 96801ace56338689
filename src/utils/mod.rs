pub mod phone_validation;
pub use phone_validation::validate_inbound_number;
pub mod sip_api_client;
pub use sip_api_client::SipApiClient;
