//! Static description of the on-chain IP registry and the single write call it exposes.

use crate::domain::registration::{expiry_to_unix, FormVariant, RegistrationInput, ONE_YEAR_SECS};
use crate::error::{RegistrationError, Result};
use primitive_types::{H160, U256};

pub mod abi;

pub use abi::{AbiType, AbiValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub ty: AbiType,
}

const fn param(name: &'static str, ty: AbiType) -> Param {
    Param { name, ty }
}

/// A contract function's ABI entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractFunction {
    pub name: &'static str,
    pub params: &'static [Param],
}

impl ContractFunction {
    /// Canonical signature used for the selector, e.g. `registerIP(address,string,bool,bool,uint256)`.
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.params.iter().map(|p| p.ty.canonical()).collect();
        format!("{}({})", self.name, types.join(","))
    }

    pub fn selector(&self) -> [u8; 4] {
        abi::selector(&self.signature())
    }
}

pub const REGISTER_IP_STANDARD: ContractFunction = ContractFunction {
    name: "registerIP",
    params: &[
        param("recipient", AbiType::Address),
        param("tokenURI", AbiType::String),
        param("commercialUse", AbiType::Bool),
        param("derivativesAllowed", AbiType::Bool),
        param("expiry", AbiType::Uint256),
    ],
};

pub const REGISTER_IP_HERITAGE: ContractFunction = ContractFunction {
    name: "registerIP",
    params: &[
        param("recipient", AbiType::Address),
        param("tokenURI", AbiType::String),
        param("commercialUse", AbiType::Bool),
        param("derivativesAllowed", AbiType::Bool),
        param("duration", AbiType::Uint256),
        param("location", AbiType::String),
        param("custodialCommunity", AbiType::String),
        param("distributionRegion", AbiType::String),
    ],
};

impl FormVariant {
    pub fn register_function(&self) -> &'static ContractFunction {
        match self {
            FormVariant::Standard => &REGISTER_IP_STANDARD,
            FormVariant::Heritage => &REGISTER_IP_HERITAGE,
        }
    }
}

/// A fully specified write call, ready to be encoded into calldata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub address: H160,
    pub function: &'static ContractFunction,
    pub args: Vec<AbiValue>,
}

impl ContractCall {
    /// Checks the arguments against the ABI entry and returns selector + encoded arguments.
    pub fn calldata(&self) -> Result<Vec<u8>> {
        if self.args.len() != self.function.params.len() {
            return Err(RegistrationError::Transaction(format!(
                "{} expects {} arguments, got {}",
                self.function.name,
                self.function.params.len(),
                self.args.len()
            )));
        }
        for (p, arg) in self.function.params.iter().zip(&self.args) {
            if p.ty != arg.abi_type() {
                return Err(RegistrationError::Transaction(format!(
                    "argument '{}' of {} must be {}, got {}",
                    p.name,
                    self.function.name,
                    p.ty.canonical(),
                    arg.abi_type().canonical()
                )));
            }
        }
        Ok(abi::encode_call(&self.function.signature(), &self.args))
    }
}

/// The deployed registry: its address plus the variant that decides the argument list.
#[derive(Debug, Clone, Copy)]
pub struct ContractInterface {
    pub address: H160,
    pub variant: FormVariant,
}

impl ContractInterface {
    pub fn new(address: H160, variant: FormVariant) -> Self {
        ContractInterface { address, variant }
    }

    pub fn register_ip_call(
        &self,
        recipient: H160,
        token_uri: &str,
        input: &RegistrationInput,
    ) -> Result<ContractCall> {
        let mut args = vec![
            AbiValue::Address(recipient),
            AbiValue::String(token_uri.to_string()),
            AbiValue::Bool(input.commercial_use_allowed),
            AbiValue::Bool(input.derivatives_allowed),
        ];
        match self.variant {
            FormVariant::Standard => {
                let expiry = input
                    .expiry_date()
                    .ok_or_else(RegistrationError::fill_all_fields)?;
                args.push(AbiValue::Uint(U256::from(expiry_to_unix(expiry)?)));
            }
            FormVariant::Heritage => {
                args.push(AbiValue::Uint(U256::from(ONE_YEAR_SECS)));
                args.push(AbiValue::String(input.location.clone()));
                args.push(AbiValue::String(input.custodial_community.clone()));
                args.push(AbiValue::String(input.distribution_region.clone()));
            }
        }
        Ok(ContractCall {
            address: self.address,
            function: self.variant.register_function(),
            args,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signatures_follow_param_types() {
        assert_eq!(
            REGISTER_IP_STANDARD.signature(),
            "registerIP(address,string,bool,bool,uint256)"
        );
        assert_eq!(
            REGISTER_IP_HERITAGE.signature(),
            "registerIP(address,string,bool,bool,uint256,string,string,string)"
        );
        assert_ne!(REGISTER_IP_STANDARD.selector(), REGISTER_IP_HERITAGE.selector());
    }

    #[test]
    fn standard_call_encodes_expiry_timestamp() {
        let contract = ContractInterface::new(H160::from_low_u64_be(1), FormVariant::Standard);
        let input = RegistrationInput {
            commercial_use_allowed: true,
            expiry: Some("2026-01-01".into()),
            ..Default::default()
        };
        let call = contract
            .register_ip_call(H160::from_low_u64_be(2), "ipfs://Qm456", &input)
            .unwrap();
        assert_eq!(call.args[1], AbiValue::String("ipfs://Qm456".into()));
        assert_eq!(call.args[4], AbiValue::Uint(U256::from(1_767_225_600u64)));

        let data = call.calldata().unwrap();
        assert_eq!(&data[..4], &REGISTER_IP_STANDARD.selector());
        // selector + 5 head words + string length + one data word
        assert_eq!(data.len(), 4 + 7 * 32);
    }

    #[test]
    fn heritage_call_sends_one_year_duration() {
        let contract = ContractInterface::new(H160::from_low_u64_be(1), FormVariant::Heritage);
        let call = contract
            .register_ip_call(H160::from_low_u64_be(2), "ipfs://QmX", &RegistrationInput::default())
            .unwrap();
        assert_eq!(call.args.len(), 8);
        assert_eq!(call.args[4], AbiValue::Uint(U256::from(31_536_000u64)));
        assert!(call.calldata().is_ok());
    }

    #[test]
    fn mismatched_arguments_are_rejected() {
        let call = ContractCall {
            address: H160::zero(),
            function: &REGISTER_IP_STANDARD,
            args: vec![AbiValue::Bool(true)],
        };
        assert!(matches!(call.calldata(), Err(RegistrationError::Transaction(_))));

        let call = ContractCall {
            address: H160::zero(),
            function: &REGISTER_IP_STANDARD,
            args: vec![
                AbiValue::Address(H160::zero()),
                AbiValue::Bool(true),
                AbiValue::Bool(true),
                AbiValue::Bool(true),
                AbiValue::Uint(U256::zero()),
            ],
        };
        let err = call.calldata().unwrap_err().to_string();
        assert!(err.contains("tokenURI"));
    }
}
