//! Message types for the swap bridge contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Coin, Timestamp, Uint128};

use crate::state::{BridgeParameters, ChainEntry, ValidatorSource};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for contract management
    pub admin: String,
    /// CW20 contract of the bridged asset
    pub token: String,
    /// Currency tag every swap amount must carry
    pub native_denom: String,
    /// Receives validator rewards
    pub reward_pool: String,
    /// Account registry for `FinishWithNewAccount` (optional)
    pub account_registry: Option<String>,
    pub validator_source: ValidatorSource,
    pub min_account_stake: Uint128,
    pub default_validator_reward: Uint128,
    /// Defaults to 180 days
    pub swap_lifetime: Option<u64>,
    /// Defaults to 7 days
    pub claim_window: Option<u64>,
    pub local_chain_id: String,
    pub external_bridge_address: String,
    pub external_return_chain_id: String,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// The tuple identifying one external event.
///
/// The swap hash is derived from these fields, so every call that refers to a
/// swap carries the full tuple rather than the hash.
#[cw_serde]
pub struct SwapTerms {
    /// External-chain transaction id
    pub external_tx_id: String,
    /// Prefixed claim key (`EOS…`, `REM…` or `PUB_K1_…`)
    pub claim_key: String,
    /// Amount in the native denom
    pub amount: Coin,
    /// Address on the chain the swap originated from
    pub destination_address: String,
    pub destination_chain_id: String,
    /// External event time (seconds precision)
    pub swap_timestamp: Timestamp,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Inbound Swaps
    // ========================================================================
    /// Create or attest a swap; issues tokens once quorum is reached.
    ///
    /// Authorization: anyone may create an entry, only active validators
    /// attest.
    Init { swap: SwapTerms },

    // ========================================================================
    // Claims
    // ========================================================================
    /// Pay out an issued swap to `receiver`.
    ///
    /// Authorization: anyone holding a signature by the claim key over the
    /// claim digest.
    Finish {
        receiver: String,
        swap: SwapTerms,
        signature: Binary,
    },

    /// Pay out an issued swap while provisioning a new account for
    /// `receiver`.
    FinishWithNewAccount {
        receiver: String,
        owner_key: String,
        active_key: String,
        swap: SwapTerms,
        signature: Binary,
    },

    /// Refund a swap whose claim window has lapsed. No signature required.
    Cancel { swap: SwapTerms },

    // ========================================================================
    // Outbound Redemption
    // ========================================================================
    /// CW20 receive hook for redemptions to an external chain
    Receive(cw20::Cw20ReceiveMsg),

    // ========================================================================
    // Configuration (admin only)
    // ========================================================================
    SetBridgeParameters {
        local_chain_id: String,
        external_bridge_address: String,
        external_return_chain_id: String,
    },

    /// Register or update an external chain
    AddChain {
        chain_id: String,
        inbound_enabled: bool,
        outbound_enabled: bool,
        min_inbound_amount: Uint128,
        min_outbound_amount: Uint128,
    },

    /// Override the validator reward for one chain
    SetValidatorReward { chain_id: String, reward: Uint128 },

    SetMinAccountStake { amount: Uint128 },

    SetSwapWindows { swap_lifetime: u64, claim_window: u64 },

    SetValidatorSource { source: ValidatorSource },

    SetCollaborators {
        reward_pool: String,
        account_registry: Option<String>,
    },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    Pause {},
    Unpause {},
    /// Propose a new admin (7-day timelock)
    ProposeAdmin { new_admin: String },
    AcceptAdmin {},
    CancelAdminProposal {},
}

/// CW20 receive hook payload
#[cw_serde]
pub enum ReceiveMsg {
    /// Burn the sent tokens for payout on an external chain.
    ///
    /// `memo` is `"<destination chain id> <destination address>"`.
    Redeem { memo: String },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(BridgeParameters)]
    BridgeParameters {},

    #[returns(Option<ChainEntry>)]
    Chain { chain_id: String },

    #[returns(ChainsResponse)]
    Chains {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Effective reward for a chain (override or default)
    #[returns(ValidatorRewardResponse)]
    ValidatorReward { chain_id: String },

    #[returns(Option<SwapResponse>)]
    Swap { swap_hash: Binary },

    /// Swaps in creation order
    #[returns(SwapsResponse)]
    Swaps {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Live quorum status of a swap
    #[returns(QuorumResponse)]
    Quorum { swap_hash: Binary },

    #[returns(ComputeHashResponse)]
    ComputeSwapHash { swap: SwapTerms },

    /// Digest the claim key must sign; pass both keys for the new-account
    /// form
    #[returns(ComputeHashResponse)]
    ComputeClaimDigest {
        receiver: String,
        owner_key: Option<String>,
        active_key: Option<String>,
        swap: SwapTerms,
    },

    #[returns(ValidateAddressResponse)]
    ValidateAddress { chain_id: String, address: String },

    #[returns(Option<PendingAdminResponse>)]
    PendingAdmin {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub paused: bool,
    pub token: Addr,
    pub native_denom: String,
    pub reward_pool: Addr,
    pub account_registry: Option<Addr>,
    pub validator_source: ValidatorSource,
    pub min_account_stake: Uint128,
    pub default_validator_reward: Uint128,
    pub swap_lifetime: u64,
    pub claim_window: u64,
}

#[cw_serde]
pub struct ChainsResponse {
    pub chains: Vec<ChainEntry>,
}

#[cw_serde]
pub struct ValidatorRewardResponse {
    pub chain_id: String,
    pub reward: Uint128,
}

#[cw_serde]
pub struct SwapResponse {
    pub id: u64,
    pub swap_hash: Binary,
    pub external_tx_id: String,
    pub swap_timestamp: Timestamp,
    /// "initialized", "issued", "finished" or "canceled"
    pub status: String,
    pub attestations: Vec<Addr>,
    /// Seconds since epoch after which the entry may be garbage collected
    pub expires_at: u64,
    /// Seconds since epoch after which only `Cancel` is allowed
    pub claim_window_ends_at: u64,
}

#[cw_serde]
pub struct SwapsResponse {
    pub swaps: Vec<SwapResponse>,
}

#[cw_serde]
pub struct QuorumResponse {
    /// Size of the live validator set
    pub validator_count: u32,
    /// Attestations from currently active validators
    pub active_attestations: u32,
    pub threshold: u32,
    pub reached: bool,
}

#[cw_serde]
pub struct ComputeHashResponse {
    pub hash: Binary,
}

#[cw_serde]
pub struct ValidateAddressResponse {
    pub valid: bool,
    pub reason: Option<String>,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_address: Addr,
    pub execute_after: Timestamp,
}
