//! Claim key decoding
//!
//! A claim key is written as `<tag><base58 tail>`, where the tag is one of the
//! legacy `EOS`/`REM` prefixes or `PUB_K1_`. The tail decodes to a compressed
//! secp256k1 point followed by a 4-byte checksum.

use crate::error::ContractError;

/// Recognised key-encoding tags, longest first
pub const CLAIM_KEY_PREFIXES: [&str; 3] = ["PUB_K1_", "EOS", "REM"];

/// Compressed secp256k1 public key length
pub const COMPRESSED_KEY_LEN: usize = 33;

/// Trailing checksum length of the encoded key
pub const KEY_CHECKSUM_LEN: usize = 4;

/// A decoded claim key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimKey {
    /// The key with its tag removed; part of the swap hash
    pub tail: String,
    /// Compressed SEC1 point used for signature verification
    pub public_key: [u8; COMPRESSED_KEY_LEN],
}

impl ClaimKey {
    /// Parse a prefixed claim key string.
    pub fn parse(key: &str) -> Result<Self, ContractError> {
        let tail = CLAIM_KEY_PREFIXES
            .iter()
            .find_map(|prefix| key.strip_prefix(*prefix))
            .ok_or_else(|| ContractError::InvalidClaimKey {
                reason: "unknown key prefix".to_string(),
            })?;

        let raw = bs58::decode(tail)
            .into_vec()
            .map_err(|e| ContractError::InvalidClaimKey {
                reason: format!("invalid base58: {}", e),
            })?;

        if raw.len() != COMPRESSED_KEY_LEN + KEY_CHECKSUM_LEN {
            return Err(ContractError::InvalidClaimKey {
                reason: format!(
                    "expected {} bytes, got {}",
                    COMPRESSED_KEY_LEN + KEY_CHECKSUM_LEN,
                    raw.len()
                ),
            });
        }

        if raw[0] != 0x02 && raw[0] != 0x03 {
            return Err(ContractError::InvalidClaimKey {
                reason: "not a compressed secp256k1 point".to_string(),
            });
        }

        let mut public_key = [0u8; COMPRESSED_KEY_LEN];
        public_key.copy_from_slice(&raw[..COMPRESSED_KEY_LEN]);

        Ok(Self {
            tail: tail.to_string(),
            public_key,
        })
    }
}
