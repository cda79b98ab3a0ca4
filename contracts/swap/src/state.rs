//! State definitions for the swap bridge contract
//!
//! The swap registry is the only state mutated by ordinary users and
//! validators. Chain entries, bridge parameters and the config are written
//! exclusively through admin handlers.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;

// ============================================================================
// Core Configuration
// ============================================================================

/// Where the live validator set comes from
#[cw_serde]
pub enum ValidatorSource {
    /// The chain's staking module (active validator operators)
    Staking {},
    /// An external registry contract answering `ValidatorSetQueryMsg`
    Registry { contract: String },
}

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for contract management
    pub admin: Addr,
    /// Whether swaps are currently paused
    pub paused: bool,
    /// CW20 contract of the bridged asset (the bridge must be its minter)
    pub token: Addr,
    /// Currency tag every swap amount must carry
    pub native_denom: String,
    /// Receives the validator reward deducted from each claim
    pub reward_pool: Addr,
    /// Provisions new identities for `FinishWithNewAccount`
    pub account_registry: Option<Addr>,
    /// Validator set provider
    pub validator_source: ValidatorSource,
    /// Minimum stake of a freshly provisioned account
    pub min_account_stake: Uint128,
    /// Validator reward for chains without an explicit override
    pub default_validator_reward: Uint128,
    /// Seconds after the swap timestamp before an entry expires
    pub swap_lifetime: u64,
    /// Seconds after the swap timestamp during which `Finish` is allowed
    pub claim_window: u64,
}

/// Pending admin change proposal
#[cw_serde]
pub struct PendingAdmin {
    /// Proposed new admin address
    pub new_address: Addr,
    /// Block time when the change can be executed
    pub execute_after: Timestamp,
}

/// Identifiers bound into every digest
#[cw_serde]
pub struct BridgeParameters {
    /// This chain's identifier
    pub local_chain_id: String,
    /// Bridge contract on the external chain
    pub external_bridge_address: String,
    /// Chain id used by the external bridge for returns
    pub external_return_chain_id: String,
}

/// Per external chain configuration
#[cw_serde]
pub struct ChainEntry {
    pub chain_id: String,
    /// Accept external -> local swaps (`Init`)
    pub inbound_enabled: bool,
    /// Accept local -> external redemptions (`Receive`)
    pub outbound_enabled: bool,
    pub min_inbound_amount: Uint128,
    pub min_outbound_amount: Uint128,
}

// ============================================================================
// Swap Registry
// ============================================================================

#[cw_serde]
#[derive(Copy)]
pub enum SwapStatus {
    /// Collecting attestations
    Initialized,
    /// Quorum reached, tokens issued into the bridge pool
    Issued,
    /// Claimed by the claim-key holder (terminal)
    Finished,
    /// Refunded after the claim window lapsed (terminal)
    Canceled,
}

impl SwapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStatus::Initialized => "initialized",
            SwapStatus::Issued => "issued",
            SwapStatus::Finished => "finished",
            SwapStatus::Canceled => "canceled",
        }
    }
}

/// One entry per distinct external event
#[cw_serde]
pub struct SwapRequest {
    /// Local insertion sequence number
    pub id: u64,
    /// External-chain transaction id
    pub external_tx_id: String,
    /// Deterministic digest of the swap tuple, immutable once created
    pub swap_hash: [u8; 32],
    /// External event time
    pub swap_timestamp: Timestamp,
    pub status: SwapStatus,
    /// Validators that attested, insertion-ordered, no duplicates
    pub attestations: Vec<Addr>,
}

impl SwapRequest {
    pub fn has_attested(&self, validator: &Addr) -> bool {
        self.attestations.iter().any(|a| a == validator)
    }

    /// First second at which the entry is past its lifetime
    pub fn expires_at(&self, lifetime: u64) -> u64 {
        self.swap_timestamp.seconds().saturating_add(lifetime)
    }
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:swap-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 7 days in seconds for admin change timelock
pub const ADMIN_TIMELOCK_DURATION: u64 = 604_800;

/// Default swap lifetime (180 days)
pub const DEFAULT_SWAP_LIFETIME: u64 = 15_552_000;

/// Default claim window (7 days)
pub const DEFAULT_CLAIM_WINDOW: u64 = 604_800;

/// Maximum expired entries removed by a single cleanup pass
pub const CLEANUP_MAX_DELETIONS: usize = 10;

/// Maximum entries visited by a single cleanup pass
pub const CLEANUP_SCAN_LIMIT: usize = 50;

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Pending admin proposal (if any)
pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");

/// Digest parameters
pub const PARAMS: Item<BridgeParameters> = Item::new("params");

/// Key: chain id, Value: ChainEntry
pub const CHAINS: Map<&str, ChainEntry> = Map::new("chains");

/// Per-chain validator reward overrides
/// Key: chain id, Value: reward amount
pub const VALIDATOR_REWARDS: Map<&str, Uint128> = Map::new("validator_rewards");

/// Next swap sequence number
pub const NEXT_SWAP_ID: Item<u64> = Item::new("next_swap_id");

/// Swap registry in creation order
/// Key: id, Value: SwapRequest
pub const SWAPS: Map<u64, SwapRequest> = Map::new("swaps");

/// Hash index into SWAPS
/// Key: 32-byte swap hash, Value: id
pub const SWAP_BY_HASH: Map<&[u8], u64> = Map::new("swap_by_hash");

// ============================================================================
// Helpers
// ============================================================================

/// Validator reward for `chain_id`, falling back to the configured default
pub fn validator_reward(
    storage: &dyn Storage,
    config: &Config,
    chain_id: &str,
) -> StdResult<Uint128> {
    Ok(VALIDATOR_REWARDS
        .may_load(storage, chain_id)?
        .unwrap_or(config.default_validator_reward))
}

/// Load a registered chain
pub fn load_chain(storage: &dyn Storage, chain_id: &str) -> Result<ChainEntry, ContractError> {
    CHAINS
        .may_load(storage, chain_id)?
        .ok_or_else(|| ContractError::ChainNotSupported {
            chain_id: chain_id.to_string(),
        })
}
