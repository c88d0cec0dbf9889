//! The registration pipeline.
//!
//! A `RegistrationForm` is one form instance. Submitting it:
//! 1.  Validates the input (file, connected wallet, expiry in the standard form).
//! 2.  Pins the file and gets back its content identifier.
//! 3.  Builds the metadata document around that identifier and pins it.
//! 4.  Calls `registerIP` with the metadata identifier as `tokenURI`.
//!
//! Only a fully successful run moves the form from `Editing` to `Submitted`.
//! Nothing is rolled back on failure: no on-chain state exists before step 4.

use crate::domain::contract::ContractInterface;
use crate::domain::registration::{
    expiry_to_unix, FormVariant, MetadataDocument, RegistrationInput, RegistrationReceipt,
    SubmissionSummary, TransactionReference,
};
use crate::error::{RegistrationError, Result};
use crate::infra::config::Settings;
use crate::infra::evm::{format_address, JsonRpcWallet, WalletSession};
use crate::infra::pinata::{PinataClient, PinningService};
use primitive_types::H160;
use std::sync::Arc;
use tracing::{info, warn};

/// Message logged once a registration transaction has been submitted.
pub const REGISTERED_MESSAGE: &str = "IP Registered via Pinata!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitted,
}

/// Shared collaborators of every form instance.
#[derive(Clone)]
pub struct RegistrationService {
    pinning: Arc<dyn PinningService>,
    wallet: Arc<dyn WalletSession>,
    contract: ContractInterface,
    explorer_base_url: String,
}

impl RegistrationService {
    pub fn new(
        pinning: Arc<dyn PinningService>,
        wallet: Arc<dyn WalletSession>,
        contract: ContractInterface,
        explorer_base_url: impl Into<String>,
    ) -> Self {
        RegistrationService {
            pinning,
            wallet,
            contract,
            explorer_base_url: explorer_base_url.into(),
        }
    }

    /// Wires the Pinata and JSON-RPC clients from resolved settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Arc::new(PinataClient::from_settings(settings)),
            Arc::new(JsonRpcWallet::from_settings(settings)),
            ContractInterface::new(settings.contract_address, settings.form_variant),
            settings.explorer_base_url.clone(),
        )
    }

    pub fn variant(&self) -> FormVariant {
        self.contract.variant
    }

    /// Same collaborators, different field set / contract signature.
    pub fn with_variant(&self, variant: FormVariant) -> Self {
        let mut service = self.clone();
        service.contract.variant = variant;
        service
    }

    /// A fresh form instance in the `Editing` state.
    pub fn new_form(&self) -> RegistrationForm {
        RegistrationForm {
            service: self.clone(),
            state: FormState::Editing,
            receipt: None,
        }
    }
}

pub struct RegistrationForm {
    service: RegistrationService,
    state: FormState,
    receipt: Option<RegistrationReceipt>,
}

impl RegistrationForm {
    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn variant(&self) -> FormVariant {
        self.service.variant()
    }

    /// Receipt of the successful submission, once `Submitted`.
    pub fn receipt(&self) -> Option<&RegistrationReceipt> {
        self.receipt.as_ref()
    }

    /// Runs the whole pipeline. Errors leave the form in `Editing`.
    pub async fn submit(&mut self, input: RegistrationInput) -> Result<RegistrationReceipt> {
        if self.state == FormState::Submitted {
            return Err(RegistrationError::Validation(
                "Form already submitted".to_string(),
            ));
        }

        match self.run(&input).await {
            Ok(receipt) => {
                info!("> Registration: {} tx={}", REGISTERED_MESSAGE, receipt.transaction.hash);
                self.state = FormState::Submitted;
                self.receipt = Some(receipt.clone());
                Ok(receipt)
            }
            Err(e) => {
                warn!("> Registration: submission failed: {}", e);
                Err(e)
            }
        }
    }

    async fn validate(&self, input: &RegistrationInput) -> Result<H160> {
        if input.file.is_none() {
            return Err(RegistrationError::fill_all_fields());
        }
        if self.variant() == FormVariant::Standard {
            let expiry = input
                .expiry_date()
                .ok_or_else(RegistrationError::fill_all_fields)?;
            expiry_to_unix(expiry)?;
        }
        self.service
            .wallet
            .connected_address()
            .await?
            .ok_or_else(RegistrationError::fill_all_fields)
    }

    async fn run(&self, input: &RegistrationInput) -> Result<RegistrationReceipt> {
        let recipient = self.validate(input).await?;
        let file = input
            .file
            .as_ref()
            .ok_or_else(RegistrationError::fill_all_fields)?;
        let variant = self.variant();

        info!(
            "> Registration: {} form, file={} ({} bytes), recipient={}",
            variant,
            file.name,
            file.bytes.len(),
            format_address(&recipient)
        );

        let image_uri = self.service.pinning.upload_file(&file.bytes, &file.name).await?;

        let metadata = MetadataDocument::build(&file.name, input, image_uri.clone(), variant);
        let token_uri = self.service.pinning.upload_json(&metadata).await?;

        let call = self
            .service
            .contract
            .register_ip_call(recipient, token_uri.as_str(), input)?;
        let hash = self.service.wallet.submit_write(recipient, &call).await?;

        Ok(RegistrationReceipt {
            image_uri,
            token_uri,
            transaction: TransactionReference::new(hash, &self.service.explorer_base_url),
            summary: SubmissionSummary::from_input(input, &file.name, variant),
            recipient: format_address(&recipient),
        })
    }
}
