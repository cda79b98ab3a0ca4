//! Address policy for destination chains and local address helpers
//!
//! Ethereum-style chain tags require a 20-byte hex address; mixed-case input
//! must carry a valid EIP-55 checksum. Every other chain tag accepts any
//! non-empty string.

use crate::error::ContractError;
use crate::hash::keccak256;

/// Chain tags validated as EVM addresses
pub const EVM_CHAIN_IDS: [&str; 2] = ["eth", "ethropsten"];

/// Hex characters in an EVM address (without 0x)
const EVM_ADDRESS_HEX_LEN: usize = 40;

/// Validate a destination address for the given chain tag.
pub fn validate_destination(chain_id: &str, address: &str) -> Result<(), ContractError> {
    if is_evm_chain(chain_id) {
        return validate_evm_address(address);
    }

    if address.is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "empty address".to_string(),
        });
    }
    Ok(())
}

pub fn is_evm_chain(chain_id: &str) -> bool {
    EVM_CHAIN_IDS.contains(&chain_id)
}

/// Validate a 0x-optional, 40-hex-char address with EIP-55 for mixed case
pub fn validate_evm_address(address: &str) -> Result<(), ContractError> {
    let hex_part = address.strip_prefix("0x").unwrap_or(address);

    if hex_part.len() != EVM_ADDRESS_HEX_LEN {
        return Err(ContractError::InvalidAddress {
            reason: format!(
                "EVM address must be {} hex characters, got {}",
                EVM_ADDRESS_HEX_LEN,
                hex_part.len()
            ),
        });
    }

    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ContractError::InvalidAddress {
            reason: "EVM address contains non-hex characters".to_string(),
        });
    }

    let is_lower = hex_part == hex_part.to_ascii_lowercase();
    let is_upper = hex_part == hex_part.to_ascii_uppercase();
    if is_lower || is_upper {
        return Ok(());
    }

    if eip55_checksum(hex_part) != hex_part {
        return Err(ContractError::InvalidAddress {
            reason: "invalid EIP-55 checksum".to_string(),
        });
    }
    Ok(())
}

/// EIP-55 mixed-case form of a 40-char hex address (no 0x)
pub fn eip55_checksum(hex_part: &str) -> String {
    let lower = hex_part.to_ascii_lowercase();
    let hash = keccak256(lower.as_bytes());

    lower
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

// ============================================================================
// Bech32 payload decoding
// ============================================================================

/// Bech32 character set
const BECH32_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Bech32 checksum length in characters
const BECH32_CHECKSUM_LEN: usize = 6;

/// Decode the payload bytes of a bech32 address, ignoring the human-readable
/// prefix.
///
/// A validator's operator address and its account address share the payload,
/// so comparing payloads matches the two. The checksum is not verified; the
/// inputs come from the chain itself.
pub fn bech32_payload(addr: &str) -> Option<Vec<u8>> {
    let lower = addr.to_ascii_lowercase();
    let (_, data_part) = lower.rsplit_once('1')?;
    if data_part.len() <= BECH32_CHECKSUM_LEN {
        return None;
    }

    let data = &data_part[..data_part.len() - BECH32_CHECKSUM_LEN];
    let mut values = Vec::with_capacity(data.len());
    for c in data.bytes() {
        let idx = BECH32_CHARSET.iter().position(|&x| x == c)?;
        values.push(idx as u8);
    }

    convert_bits(&values, 5, 8)
}

/// Regroup 5-bit values into bytes, rejecting non-zero padding
fn convert_bits(data: &[u8], from_bits: u32, to_bits: u32) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut result = Vec::new();
    let max_v = (1u32 << to_bits) - 1;

    for &value in data {
        acc = (acc << from_bits) | value as u32;
        bits += from_bits;

        while bits >= to_bits {
            bits -= to_bits;
            result.push(((acc >> bits) & max_v) as u8);
        }
    }

    if bits >= from_bits || ((acc << (to_bits - bits)) & max_v) != 0 {
        return None;
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_checksummed_addresses() {
        for addr in [
            "0x9fB8A18fF402680b47387AE0F4e38229EC64f098",
            "0xd18a02cafC6715c2e096636aB3349E4B79FAeCE7",
        ] {
            validate_destination("ethropsten", addr).unwrap();
            validate_destination("eth", addr).unwrap();
        }
    }

    #[test]
    fn test_accepts_single_case_addresses() {
        validate_destination("eth", "0x9fb8a18ff402680b47387ae0f4e38229ec64f098").unwrap();
        validate_destination("eth", "0x8617E340B3D01FA5F11F306F4090FD50E238070D").unwrap();
        // 0x prefix is optional
        validate_destination("eth", "9fb8a18ff402680b47387ae0f4e38229ec64f098").unwrap();
    }

    #[test]
    fn test_rejects_bad_checksum() {
        let err = validate_destination("eth", "0x9fb8A18fF402680b47387AE0F4e38229EC64f098")
            .unwrap_err();
        assert!(matches!(err, ContractError::InvalidAddress { .. }));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err =
            validate_destination("eth", "0x9fB8A18fF402680b47387AE0F4e38229EC64f0").unwrap_err();
        assert!(matches!(err, ContractError::InvalidAddress { .. }));
    }

    #[test]
    fn test_rejects_non_hex() {
        let err = validate_destination("eth", "0x9fB8A18fF402680b47387AE0F4e38229EC64f09z")
            .unwrap_err();
        assert!(matches!(err, ContractError::InvalidAddress { .. }));
    }

    #[test]
    fn test_other_chains_are_permissive() {
        validate_destination("btc", "anything goes").unwrap();
        assert!(validate_destination("btc", "").is_err());
    }

    #[test]
    fn test_eip55_checksum() {
        assert_eq!(
            eip55_checksum("d18a02cafc6715c2e096636ab3349e4b79faece7"),
            "d18a02cafC6715c2e096636aB3349E4B79FAeCE7"
        );
    }

    #[test]
    fn test_bech32_payload_shared_across_prefixes() {
        // Same 20-byte payload under account and operator prefixes
        let account = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";
        let operator = "cosmosvaloper1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5z7dlqe";
        let a = bech32_payload(account).unwrap();
        let b = bech32_payload(operator).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
        assert_eq!(a[0], 0x01);
    }

    #[test]
    fn test_bech32_payload_rejects_garbage() {
        assert!(bech32_payload("no-separator").is_none());
        assert!(bech32_payload("cosmos1qqqqqq").is_none());
        // 'b' is outside the bech32 alphabet
        assert!(bech32_payload("cosmos1bypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu").is_none());
    }
}
