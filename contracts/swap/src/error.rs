//! Error types for the swap bridge contract
//!
//! Every variant belongs to exactly one [`ErrorKind`]; callers (and off-chain
//! watchers reading failed transactions) can rely on the kind tag while the
//! message carries the specific reason.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

/// Failure classes of the swap state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or wrong signer
    Authorization,
    /// Malformed amount, currency, address, timestamp, memo or key
    Validation,
    /// Duplicate attestation by the same validator
    Replay,
    /// Unknown swap, terminal swap, missing quorum, paused bridge
    State,
    /// Claim or cancel attempted outside its time window
    Window,
    /// Signature does not match the claim key
    Crypto,
    /// Storage, serialization or host errors
    Internal,
}

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    #[error("Unauthorized: {caller} is not an active validator")]
    NotValidator { caller: String },

    #[error("Unauthorized: {sender} is not the bridged token")]
    UnknownToken { sender: String },

    // ========================================================================
    // Admin Errors
    // ========================================================================

    #[error("No pending admin change")]
    NoPendingAdmin,

    #[error("Timelock not expired: {remaining_seconds} seconds remaining")]
    TimelockNotExpired { remaining_seconds: u64 },

    #[error("Invalid swap windows: claim window {claim_window}s must be non-zero and below lifetime {lifetime}s")]
    InvalidSwapWindows { lifetime: u64, claim_window: u64 },

    /// Garbage-collected hashes would become acceptable again
    #[error("Swap lifetime can only shrink: current {current}s, requested {requested}s")]
    SwapLifetimeIncrease { current: u64, requested: u64 },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Unrecognized public key format: {reason}")]
    InvalidClaimKey { reason: String },

    #[error("Symbol precision mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("The quantity must be greater than the swap fee: {floor}")]
    BelowSwapFloor { floor: Uint128 },

    #[error("Minimum amount for chain {chain_id} is {min_amount}")]
    BelowChainMinimum { chain_id: String, min_amount: Uint128 },

    #[error("Chain not supported: {chain_id}")]
    ChainNotSupported { chain_id: String },

    #[error("Inbound swaps disabled for chain {chain_id}")]
    InboundDisabled { chain_id: String },

    #[error("Outbound swaps disabled for chain {chain_id}")]
    OutboundDisabled { chain_id: String },

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Not valid memo: {reason}")]
    InvalidMemo { reason: String },

    #[error("Swap timestamp is in the future")]
    TimestampInFuture,

    #[error("Swap lifetime expired")]
    SwapLifetimeExpired,

    #[error("Invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },

    // ========================================================================
    // Replay Errors
    // ========================================================================

    #[error("Approval already exists for {validator}")]
    AttestationAlreadyExists { validator: String },

    // ========================================================================
    // State Errors
    // ========================================================================

    #[error("Bridge is paused")]
    BridgePaused,

    #[error("Swap doesn't exist")]
    SwapNotFound,

    #[error("Swap already canceled")]
    SwapAlreadyCanceled,

    #[error("Swap already finished")]
    SwapAlreadyFinished,

    #[error("Not enough active approvals: {attested} of {required}")]
    QuorumNotReached { attested: u32, required: u32 },

    #[error("Account registry not configured")]
    AccountRegistryMissing,

    // ========================================================================
    // Window Errors
    // ========================================================================

    #[error("Swap expired at {expired_at}")]
    SwapExpired { expired_at: u64 },

    #[error("Active swap lifetime expired, cancel swap, please")]
    ClaimWindowExpired,

    #[error("Active swap lifetime not expired: cancel allowed after {opens_at}")]
    ClaimWindowActive { opens_at: u64 },

    // ========================================================================
    // Crypto Errors
    // ========================================================================

    #[error("Invalid signature: {reason}")]
    InvalidSignature { reason: String },
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::Std(_) => ErrorKind::Internal,

            ContractError::Unauthorized
            | ContractError::UnauthorizedPendingAdmin
            | ContractError::NotValidator { .. }
            | ContractError::UnknownToken { .. } => ErrorKind::Authorization,

            ContractError::NoPendingAdmin | ContractError::TimelockNotExpired { .. } => {
                ErrorKind::State
            }

            ContractError::InvalidSwapWindows { .. }
            | ContractError::SwapLifetimeIncrease { .. }
            | ContractError::InvalidClaimKey { .. }
            | ContractError::CurrencyMismatch { .. }
            | ContractError::InvalidAmount { .. }
            | ContractError::BelowSwapFloor { .. }
            | ContractError::BelowChainMinimum { .. }
            | ContractError::ChainNotSupported { .. }
            | ContractError::InboundDisabled { .. }
            | ContractError::OutboundDisabled { .. }
            | ContractError::InvalidAddress { .. }
            | ContractError::InvalidMemo { .. }
            | ContractError::TimestampInFuture
            | ContractError::SwapLifetimeExpired
            | ContractError::InvalidHashLength { .. } => ErrorKind::Validation,

            ContractError::AttestationAlreadyExists { .. } => ErrorKind::Replay,

            ContractError::BridgePaused
            | ContractError::SwapNotFound
            | ContractError::SwapAlreadyCanceled
            | ContractError::SwapAlreadyFinished
            | ContractError::QuorumNotReached { .. }
            | ContractError::AccountRegistryMissing => ErrorKind::State,

            ContractError::SwapExpired { .. }
            | ContractError::ClaimWindowExpired
            | ContractError::ClaimWindowActive { .. } => ErrorKind::Window,

            ContractError::InvalidSignature { .. } => ErrorKind::Crypto,
        }
    }
}
