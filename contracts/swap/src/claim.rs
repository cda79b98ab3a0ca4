//! Claim voucher verification
//!
//! The claim-key holder signs the claim digest with secp256k1. Signatures are
//! accepted in compact `r || s` form, or with a leading recovery byte which
//! is ignored since the expected key is already known.

use cosmwasm_std::Api;

use crate::error::ContractError;
use crate::keys::ClaimKey;

/// Compact secp256k1 signature length
pub const COMPACT_SIGNATURE_LEN: usize = 64;

/// Check that `signature` over `digest` was produced by `key`.
pub fn verify_claim(
    api: &dyn Api,
    key: &ClaimKey,
    digest: &[u8; 32],
    signature: &[u8],
) -> Result<(), ContractError> {
    let compact = match signature.len() {
        COMPACT_SIGNATURE_LEN => signature,
        len if len == COMPACT_SIGNATURE_LEN + 1 => &signature[1..],
        len => {
            return Err(ContractError::InvalidSignature {
                reason: format!("expected 64 or 65 bytes, got {}", len),
            })
        }
    };

    let valid = api
        .secp256k1_verify(digest, compact, &key.public_key)
        .map_err(|e| ContractError::InvalidSignature {
            reason: e.to_string(),
        })?;

    if !valid {
        return Err(ContractError::InvalidSignature {
            reason: "signature does not match claim key".to_string(),
        });
    }

    Ok(())
}
