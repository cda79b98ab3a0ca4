//! Query handlers for the swap bridge contract.

use cosmwasm_std::{Binary, Deps, Order, StdError, StdResult};
use cw_storage_plus::Bound;

use crate::address_policy::validate_destination;
use crate::error::ContractError;
use crate::hash::{compute_claim_digest, compute_swap_hash};
use crate::keys::ClaimKey;
use crate::msg::{
    ChainsResponse, ComputeHashResponse, ConfigResponse, PendingAdminResponse, QuorumResponse,
    SwapResponse, SwapTerms, SwapsResponse, ValidateAddressResponse, ValidatorRewardResponse,
};
use crate::state::{
    validator_reward, BridgeParameters, ChainEntry, Config, SwapRequest, CHAINS, CONFIG, PARAMS,
    PENDING_ADMIN, SWAPS, SWAP_BY_HASH,
};
use crate::validators::ActiveValidatorSet;

fn to_std(err: ContractError) -> StdError {
    match err {
        ContractError::Std(e) => e,
        other => StdError::generic_err(other.to_string()),
    }
}

fn swap_response(request: SwapRequest, config: &Config) -> SwapResponse {
    SwapResponse {
        id: request.id,
        swap_hash: Binary::from(request.swap_hash.to_vec()),
        external_tx_id: request.external_tx_id.clone(),
        swap_timestamp: request.swap_timestamp,
        status: request.status.as_str().to_string(),
        expires_at: request.expires_at(config.swap_lifetime),
        claim_window_ends_at: request.expires_at(config.claim_window),
        attestations: request.attestations,
    }
}

fn load_by_hash(deps: Deps, swap_hash: &Binary) -> StdResult<Option<SwapRequest>> {
    if swap_hash.len() != 32 {
        return Err(to_std(ContractError::InvalidHashLength {
            got: swap_hash.len(),
        }));
    }
    match SWAP_BY_HASH.may_load(deps.storage, swap_hash.as_slice())? {
        Some(id) => SWAPS.may_load(deps.storage, id),
        None => Ok(None),
    }
}

// ============================================================================
// Configuration Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        paused: config.paused,
        token: config.token,
        native_denom: config.native_denom,
        reward_pool: config.reward_pool,
        account_registry: config.account_registry,
        validator_source: config.validator_source,
        min_account_stake: config.min_account_stake,
        default_validator_reward: config.default_validator_reward,
        swap_lifetime: config.swap_lifetime,
        claim_window: config.claim_window,
    })
}

pub fn query_bridge_parameters(deps: Deps) -> StdResult<BridgeParameters> {
    PARAMS.load(deps.storage)
}

pub fn query_pending_admin(deps: Deps) -> StdResult<Option<PendingAdminResponse>> {
    let pending = PENDING_ADMIN.may_load(deps.storage)?;
    Ok(pending.map(|p| PendingAdminResponse {
        new_address: p.new_address,
        execute_after: p.execute_after,
    }))
}

// ============================================================================
// Chain Queries
// ============================================================================

pub fn query_chain(deps: Deps, chain_id: String) -> StdResult<Option<ChainEntry>> {
    CHAINS.may_load(deps.storage, &chain_id)
}

pub fn query_chains(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<ChainsResponse> {
    let limit = limit.unwrap_or(10).min(50) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let chains = CHAINS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, chain)| chain))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ChainsResponse { chains })
}

pub fn query_validator_reward(deps: Deps, chain_id: String) -> StdResult<ValidatorRewardResponse> {
    let config = CONFIG.load(deps.storage)?;
    let reward = validator_reward(deps.storage, &config, &chain_id)?;
    Ok(ValidatorRewardResponse { chain_id, reward })
}

pub fn query_validate_address(chain_id: String, address: String) -> ValidateAddressResponse {
    match validate_destination(&chain_id, &address) {
        Ok(()) => ValidateAddressResponse {
            valid: true,
            reason: None,
        },
        Err(e) => ValidateAddressResponse {
            valid: false,
            reason: Some(e.to_string()),
        },
    }
}

// ============================================================================
// Swap Queries
// ============================================================================

pub fn query_swap(deps: Deps, swap_hash: Binary) -> StdResult<Option<SwapResponse>> {
    let config = CONFIG.load(deps.storage)?;
    Ok(load_by_hash(deps, &swap_hash)?.map(|r| swap_response(r, &config)))
}

pub fn query_swaps(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<SwapsResponse> {
    let config = CONFIG.load(deps.storage)?;
    let limit = limit.unwrap_or(10).min(50) as usize;
    let start = start_after.map(Bound::exclusive);

    let swaps = SWAPS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, request)| swap_response(request, &config)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(SwapsResponse { swaps })
}

/// Quorum status against the live validator set.
pub fn query_quorum(deps: Deps, swap_hash: Binary) -> StdResult<QuorumResponse> {
    let config = CONFIG.load(deps.storage)?;
    let request = load_by_hash(deps, &swap_hash)?
        .ok_or_else(|| to_std(ContractError::SwapNotFound))?;
    let validators =
        ActiveValidatorSet::load(&deps.querier, &config.validator_source).map_err(to_std)?;

    Ok(QuorumResponse {
        validator_count: validators.size(),
        active_attestations: validators.count_active(&request.attestations),
        threshold: validators.threshold(),
        reached: validators.is_quorum(&request.attestations),
    })
}

pub fn query_compute_swap_hash(deps: Deps, swap: SwapTerms) -> StdResult<ComputeHashResponse> {
    let params = PARAMS.load(deps.storage)?;
    let key = ClaimKey::parse(&swap.claim_key).map_err(to_std)?;
    let hash = compute_swap_hash(&swap, &key.tail, &params.local_chain_id);
    Ok(ComputeHashResponse {
        hash: Binary::from(hash.to_vec()),
    })
}

pub fn query_compute_claim_digest(
    deps: Deps,
    receiver: String,
    owner_key: Option<String>,
    active_key: Option<String>,
    swap: SwapTerms,
) -> StdResult<ComputeHashResponse> {
    let params = PARAMS.load(deps.storage)?;
    let new_account = match (&owner_key, &active_key) {
        (Some(owner), Some(active)) => Some((owner.as_str(), active.as_str())),
        (None, None) => None,
        _ => {
            return Err(StdError::generic_err(
                "owner_key and active_key must be given together",
            ))
        }
    };
    let hash = compute_claim_digest(&swap, &receiver, new_account, &params.local_chain_id);
    Ok(ComputeHashResponse {
        hash: Binary::from(hash.to_vec()),
    })
}
