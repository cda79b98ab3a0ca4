//! Configuration handlers (admin only).
//!
//! Chain registry, bridge parameters, rewards, stake floor, swap windows and
//! collaborator addresses.

use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::execute::admin::load_config_as_admin;
use crate::state::{
    load_chain, BridgeParameters, ChainEntry, ValidatorSource, CHAINS, CONFIG, PARAMS,
    VALIDATOR_REWARDS,
};

fn require_non_empty(field: &str, value: &str) -> Result<(), ContractError> {
    if value.trim().is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: format!("{} must not be empty", field),
        });
    }
    Ok(())
}

/// Claim window must be non-zero and strictly inside the lifetime
pub fn validate_swap_windows(swap_lifetime: u64, claim_window: u64) -> Result<(), ContractError> {
    if claim_window == 0 || claim_window >= swap_lifetime {
        return Err(ContractError::InvalidSwapWindows {
            lifetime: swap_lifetime,
            claim_window,
        });
    }
    Ok(())
}

// ============================================================================
// Bridge Parameters
// ============================================================================

/// Replace the identifiers bound into digests.
///
/// Stored swap hashes keep the parameters they were computed with.
pub fn execute_set_bridge_parameters(
    deps: DepsMut,
    info: MessageInfo,
    local_chain_id: String,
    external_bridge_address: String,
    external_return_chain_id: String,
) -> Result<Response, ContractError> {
    load_config_as_admin(deps.storage, &info.sender)?;
    require_non_empty("local_chain_id", &local_chain_id)?;

    let params = BridgeParameters {
        local_chain_id,
        external_bridge_address,
        external_return_chain_id,
    };
    PARAMS.save(deps.storage, &params)?;

    Ok(Response::new()
        .add_attribute("method", "set_bridge_parameters")
        .add_attribute("local_chain_id", params.local_chain_id)
        .add_attribute("external_bridge_address", params.external_bridge_address)
        .add_attribute("external_return_chain_id", params.external_return_chain_id))
}

// ============================================================================
// Chain Registry
// ============================================================================

/// Register a chain or overwrite its entry.
pub fn execute_add_chain(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: String,
    inbound_enabled: bool,
    outbound_enabled: bool,
    min_inbound_amount: Uint128,
    min_outbound_amount: Uint128,
) -> Result<Response, ContractError> {
    load_config_as_admin(deps.storage, &info.sender)?;
    require_non_empty("chain_id", &chain_id)?;

    let existed = CHAINS.has(deps.storage, &chain_id);
    let entry = ChainEntry {
        chain_id: chain_id.clone(),
        inbound_enabled,
        outbound_enabled,
        min_inbound_amount,
        min_outbound_amount,
    };
    CHAINS.save(deps.storage, &chain_id, &entry)?;

    Ok(Response::new()
        .add_attribute("method", "add_chain")
        .add_attribute("chain_id", chain_id)
        .add_attribute("updated", existed.to_string())
        .add_attribute("inbound_enabled", inbound_enabled.to_string())
        .add_attribute("outbound_enabled", outbound_enabled.to_string())
        .add_attribute("min_inbound_amount", min_inbound_amount)
        .add_attribute("min_outbound_amount", min_outbound_amount))
}

// ============================================================================
// Rewards & Stake
// ============================================================================

/// Override the validator reward for a registered chain.
pub fn execute_set_validator_reward(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: String,
    reward: Uint128,
) -> Result<Response, ContractError> {
    load_config_as_admin(deps.storage, &info.sender)?;
    load_chain(deps.storage, &chain_id)?;

    VALIDATOR_REWARDS.save(deps.storage, &chain_id, &reward)?;

    Ok(Response::new()
        .add_attribute("method", "set_validator_reward")
        .add_attribute("chain_id", chain_id)
        .add_attribute("reward", reward))
}

pub fn execute_set_min_account_stake(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_admin(deps.storage, &info.sender)?;
    config.min_account_stake = amount;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_min_account_stake")
        .add_attribute("amount", amount))
}

// ============================================================================
// Windows, Validators, Collaborators
// ============================================================================

/// Replace the swap windows. The lifetime may shrink but never grow.
pub fn execute_set_swap_windows(
    deps: DepsMut,
    info: MessageInfo,
    swap_lifetime: u64,
    claim_window: u64,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_admin(deps.storage, &info.sender)?;
    validate_swap_windows(swap_lifetime, claim_window)?;

    // A longer lifetime would reopen hashes already garbage collected
    if swap_lifetime > config.swap_lifetime {
        return Err(ContractError::SwapLifetimeIncrease {
            current: config.swap_lifetime,
            requested: swap_lifetime,
        });
    }

    config.swap_lifetime = swap_lifetime;
    config.claim_window = claim_window;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_swap_windows")
        .add_attribute("swap_lifetime", swap_lifetime.to_string())
        .add_attribute("claim_window", claim_window.to_string()))
}

pub fn execute_set_validator_source(
    deps: DepsMut,
    info: MessageInfo,
    source: ValidatorSource,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_admin(deps.storage, &info.sender)?;

    let source_attr = match &source {
        ValidatorSource::Staking {} => "staking".to_string(),
        ValidatorSource::Registry { contract } => {
            deps.api.addr_validate(contract)?;
            contract.clone()
        }
    };
    config.validator_source = source;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_validator_source")
        .add_attribute("source", source_attr))
}

/// Replace the reward pool and account registry addresses.
pub fn execute_set_collaborators(
    deps: DepsMut,
    info: MessageInfo,
    reward_pool: String,
    account_registry: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_admin(deps.storage, &info.sender)?;

    config.reward_pool = deps.api.addr_validate(&reward_pool)?;
    config.account_registry = account_registry
        .map(|a| deps.api.addr_validate(&a))
        .transpose()?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_collaborators")
        .add_attribute("reward_pool", config.reward_pool)
        .add_attribute(
            "account_registry",
            config
                .account_registry
                .map(|a| a.to_string())
                .unwrap_or_else(|| "none".to_string()),
        ))
}
