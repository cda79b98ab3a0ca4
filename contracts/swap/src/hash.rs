//! Digest construction for swap identity and claim vouchers
//!
//! Both digests are sha256 over `*`-joined text fields, so a voucher issuer or
//! an off-chain watcher can reproduce them with nothing but a string join.
//!
//! # Swap hash
//! ```text
//! sha256(claimKeyTail * txid * localChainId * amount * destAddress * destChainId * tsSeconds)
//! ```
//!
//! # Claim digest
//! ```text
//! sha256(receiver * txid * localChainId * amount * destAddress * destChainId * tsSeconds)
//! sha256(receiver * ownerKey * activeKey * txid * ... * tsSeconds)   // new account
//! ```

use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

use crate::msg::SwapTerms;

/// Field delimiter of the canonical payloads
pub const PAYLOAD_DELIMITER: &str = "*";

/// Compute sha256 hash of arbitrary data
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Join payload fields with the canonical delimiter
pub fn join(fields: &[&str]) -> String {
    fields.join(PAYLOAD_DELIMITER)
}

/// Fields shared by the swap hash and the claim digest
fn swap_payload_fields<'a>(
    terms: &'a SwapTerms,
    local_chain_id: &'a str,
    amount: &'a str,
    timestamp: &'a str,
) -> [&'a str; 6] {
    [
        terms.external_tx_id.as_str(),
        local_chain_id,
        amount,
        terms.destination_address.as_str(),
        terms.destination_chain_id.as_str(),
        timestamp,
    ]
}

/// Compute the swap hash identifying one external event.
///
/// `claim_key_tail` is the claim key with its type prefix removed, so the
/// same key spelled with a different legacy prefix maps to the same swap.
pub fn compute_swap_hash(
    terms: &SwapTerms,
    claim_key_tail: &str,
    local_chain_id: &str,
) -> [u8; 32] {
    let amount = terms.amount.to_string();
    let timestamp = terms.swap_timestamp.seconds().to_string();

    let mut fields = vec![claim_key_tail];
    fields.extend(swap_payload_fields(terms, local_chain_id, &amount, &timestamp));

    sha256(join(&fields).as_bytes())
}

/// Compute the digest the claim-key holder signs.
///
/// `new_account` carries `(owner_key, active_key)` for the account-provisioning
/// claim; plain claims omit both fields from the payload.
pub fn compute_claim_digest(
    terms: &SwapTerms,
    receiver: &str,
    new_account: Option<(&str, &str)>,
    local_chain_id: &str,
) -> [u8; 32] {
    let amount = terms.amount.to_string();
    let timestamp = terms.swap_timestamp.seconds().to_string();

    let mut fields = vec![receiver];
    if let Some((owner_key, active_key)) = new_account {
        fields.push(owner_key);
        fields.push(active_key);
    }
    fields.extend(swap_payload_fields(terms, local_chain_id, &amount, &timestamp));

    sha256(join(&fields).as_bytes())
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}
