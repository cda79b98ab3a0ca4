//! Swap Bridge Contract - Quorum-Confirmed Cross-Chain Swaps
//!
//! Moves value between this chain and an external chain without a single
//! trusted oracle.
//!
//! # Inbound Flow (Init)
//! 1. A user deposits on the external chain, committing to a one-time claim key
//! 2. Each validator's watcher observes the deposit and calls `Init` with the
//!    swap tuple
//! 3. Calls fold into one swap keyed by the swap hash; the call that observes
//!    a live 2/3+1 quorum mints the amount into the bridge
//!
//! # Claims
//! - `Finish` / `FinishWithNewAccount`: the claim-key holder signs a digest
//!   naming the receiver; the validator reward goes to the reward pool and the
//!   rest to the receiver (minus the stake of a newly provisioned account)
//! - `Cancel`: once the claim window has lapsed, anyone may refund the swap;
//!   the remainder is burned and announced for return on the external chain
//!
//! # Outbound Flow (Redeem)
//! A user sends the token to the bridge with a `"<chain> <address>"` memo;
//! the bridge burns it and emits a `swap_outbound` event for the watchers.
//!
//! # Security
//! - The swap hash is the only replay guard; one entry per external event
//! - Quorum is recomputed against the live validator set on every check
//! - Issuance happens exactly once per swap, guarded by its status
//! - Claim and cancel windows are disjoint
//! - Expired entries are garbage collected in bounded batches

pub mod address_policy;
pub mod claim;
pub mod contract;
pub mod error;
mod execute;
pub mod hash;
pub mod keys;
pub mod ledger;
pub mod msg;
mod query;
pub mod state;
pub mod validators;

pub use crate::error::{ContractError, ErrorKind};
pub use crate::hash::{compute_claim_digest, compute_swap_hash, sha256};
pub use crate::keys::ClaimKey;
pub use crate::validators::quorum_threshold;
