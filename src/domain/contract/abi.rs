// Minimal Solidity ABI encoder for the value types the registry contract takes.
//
// Layout: 4-byte selector, then one 32-byte head word per argument. Static values
// live in the head; `string` puts its offset (relative to the start of the
// argument block) in the head and length + right-padded bytes in the tail.

use primitive_types::{H160, U256};
use tiny_keccak::{Hasher, Keccak};

const WORD: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiType {
    Address,
    Bool,
    Uint256,
    String,
}

impl AbiType {
    pub fn canonical(&self) -> &'static str {
        match self {
            AbiType::Address => "address",
            AbiType::Bool => "bool",
            AbiType::Uint256 => "uint256",
            AbiType::String => "string",
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, AbiType::String)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Address(H160),
    Bool(bool),
    Uint(U256),
    String(String),
}

impl AbiValue {
    pub fn abi_type(&self) -> AbiType {
        match self {
            AbiValue::Address(_) => AbiType::Address,
            AbiValue::Bool(_) => AbiType::Bool,
            AbiValue::Uint(_) => AbiType::Uint256,
            AbiValue::String(_) => AbiType::String,
        }
    }
}

pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut out = [0u8; 32];
    hasher.update(input);
    hasher.finalize(&mut out);
    out
}

/// First four bytes of keccak-256 over the canonical signature, e.g. `transfer(address,uint256)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

fn static_word(value: &AbiValue) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    match value {
        AbiValue::Address(a) => word[12..].copy_from_slice(a.as_bytes()),
        AbiValue::Bool(b) => word[31] = u8::from(*b),
        AbiValue::Uint(u) => u.to_big_endian(&mut word),
        AbiValue::String(_) => {}
    }
    word
}

fn usize_word(n: usize) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    U256::from(n).to_big_endian(&mut word);
    word
}

/// Encodes arguments (without selector).
pub fn encode_args(args: &[AbiValue]) -> Vec<u8> {
    let head_len = args.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for arg in args {
        match arg {
            AbiValue::String(s) => {
                head.extend_from_slice(&usize_word(head_len + tail.len()));
                let bytes = s.as_bytes();
                tail.extend_from_slice(&usize_word(bytes.len()));
                tail.extend_from_slice(bytes);
                let pad = (WORD - bytes.len() % WORD) % WORD;
                tail.extend(std::iter::repeat(0u8).take(pad));
            }
            _ => head.extend_from_slice(&static_word(arg)),
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Selector followed by encoded arguments.
pub fn encode_call(signature: &str, args: &[AbiValue]) -> Vec<u8> {
    let mut data = selector(signature).to_vec();
    data.extend_from_slice(&encode_args(args));
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_selector() {
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn static_args_fill_one_word_each() {
        let to = H160::from_low_u64_be(0xbeef);
        let data = encode_args(&[AbiValue::Address(to), AbiValue::Uint(U256::from(1_000u64))]);
        assert_eq!(data.len(), 64);
        assert_eq!(&data[30..32], &[0xbe, 0xef]);
        assert_eq!(&data[62..64], &[0x03, 0xe8]);
    }

    #[test]
    fn string_goes_to_tail_with_offset_and_padding() {
        let data = encode_args(&[
            AbiValue::Bool(true),
            AbiValue::String("ipfs://Qm456".to_string()),
            AbiValue::Uint(U256::from(7u64)),
        ]);
        // 3 head words + length word + one padded data word
        assert_eq!(data.len(), 5 * 32);
        assert_eq!(data[31], 1);
        // offset of the string = 3 * 32
        assert_eq!(data[63], 96);
        assert_eq!(data[95], 7);
        // length
        assert_eq!(data[127], 12);
        assert_eq!(&data[128..140], b"ipfs://Qm456");
        assert!(data[140..].iter().all(|b| *b == 0));
    }

    #[test]
    fn empty_string_has_no_data_words() {
        let data = encode_args(&[AbiValue::String(String::new())]);
        assert_eq!(data.len(), 64);
        assert_eq!(data[31], 32);
        assert!(data[32..].iter().all(|b| *b == 0));
    }
}
