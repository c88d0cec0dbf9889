pub mod app;
pub mod domain;
pub mod error;
pub mod infra;
pub mod telemetry;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::registration_service::{FormState, RegistrationForm, RegistrationService};
pub use domain::contract::{ContractCall, ContractInterface};
pub use domain::registration::{
    ContentIdentifier, FileUpload, FormVariant, MetadataDocument, RegistrationInput,
    RegistrationReceipt,
};
pub use error::RegistrationError;
pub use infra::config::Settings;
pub use infra::evm::{JsonRpcWallet, WalletSession};
pub use infra::pinata::{PinataClient, PinningService};
