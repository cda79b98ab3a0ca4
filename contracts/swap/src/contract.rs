//! Swap Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_admin, execute_add_chain, execute_cancel, execute_cancel_admin_proposal,
    execute_finish, execute_finish_with_new_account, execute_init, execute_propose_admin,
    execute_receive, execute_set_bridge_parameters, execute_set_collaborators,
    execute_set_min_account_stake, execute_set_paused, execute_set_swap_windows,
    execute_set_validator_reward, execute_set_validator_source, validate_swap_windows,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_bridge_parameters, query_chain, query_chains, query_compute_claim_digest,
    query_compute_swap_hash, query_config, query_pending_admin, query_quorum, query_swap,
    query_swaps, query_validate_address, query_validator_reward,
};
use crate::state::{
    BridgeParameters, Config, ValidatorSource, CONFIG, CONTRACT_NAME, CONTRACT_VERSION,
    DEFAULT_CLAIM_WINDOW, DEFAULT_SWAP_LIFETIME, NEXT_SWAP_ID, PARAMS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let token = deps.api.addr_validate(&msg.token)?;
    let reward_pool = deps.api.addr_validate(&msg.reward_pool)?;
    let account_registry = msg
        .account_registry
        .as_deref()
        .map(|a| deps.api.addr_validate(a))
        .transpose()?;

    if let ValidatorSource::Registry { contract } = &msg.validator_source {
        deps.api.addr_validate(contract)?;
    }

    if msg.native_denom.is_empty() {
        return Err(ContractError::CurrencyMismatch {
            expected: "non-empty denom".to_string(),
            got: msg.native_denom,
        });
    }

    if msg.local_chain_id.trim().is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "local_chain_id must not be empty".to_string(),
        });
    }

    let swap_lifetime = msg.swap_lifetime.unwrap_or(DEFAULT_SWAP_LIFETIME);
    let claim_window = msg.claim_window.unwrap_or(DEFAULT_CLAIM_WINDOW);
    validate_swap_windows(swap_lifetime, claim_window)?;

    let config = Config {
        admin,
        paused: false,
        token,
        native_denom: msg.native_denom,
        reward_pool,
        account_registry,
        validator_source: msg.validator_source,
        min_account_stake: msg.min_account_stake,
        default_validator_reward: msg.default_validator_reward,
        swap_lifetime,
        claim_window,
    };
    CONFIG.save(deps.storage, &config)?;

    PARAMS.save(
        deps.storage,
        &BridgeParameters {
            local_chain_id: msg.local_chain_id.clone(),
            external_bridge_address: msg.external_bridge_address,
            external_return_chain_id: msg.external_return_chain_id,
        },
    )?;

    NEXT_SWAP_ID.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("token", config.token)
        .add_attribute("native_denom", config.native_denom)
        .add_attribute("local_chain_id", msg.local_chain_id)
        .add_attribute("swap_lifetime", swap_lifetime.to_string())
        .add_attribute("claim_window", claim_window.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Inbound swaps
        ExecuteMsg::Init { swap } => execute_init(deps, env, info, swap),

        // Claims
        ExecuteMsg::Finish {
            receiver,
            swap,
            signature,
        } => execute_finish(deps, env, info, receiver, swap, signature),
        ExecuteMsg::FinishWithNewAccount {
            receiver,
            owner_key,
            active_key,
            swap,
            signature,
        } => execute_finish_with_new_account(
            deps, env, info, receiver, owner_key, active_key, swap, signature,
        ),
        ExecuteMsg::Cancel { swap } => execute_cancel(deps, env, info, swap),

        // Outbound redemption
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),

        // Configuration
        ExecuteMsg::SetBridgeParameters {
            local_chain_id,
            external_bridge_address,
            external_return_chain_id,
        } => execute_set_bridge_parameters(
            deps,
            info,
            local_chain_id,
            external_bridge_address,
            external_return_chain_id,
        ),
        ExecuteMsg::AddChain {
            chain_id,
            inbound_enabled,
            outbound_enabled,
            min_inbound_amount,
            min_outbound_amount,
        } => execute_add_chain(
            deps,
            info,
            chain_id,
            inbound_enabled,
            outbound_enabled,
            min_inbound_amount,
            min_outbound_amount,
        ),
        ExecuteMsg::SetValidatorReward { chain_id, reward } => {
            execute_set_validator_reward(deps, info, chain_id, reward)
        }
        ExecuteMsg::SetMinAccountStake { amount } => {
            execute_set_min_account_stake(deps, info, amount)
        }
        ExecuteMsg::SetSwapWindows {
            swap_lifetime,
            claim_window,
        } => execute_set_swap_windows(deps, info, swap_lifetime, claim_window),
        ExecuteMsg::SetValidatorSource { source } => {
            execute_set_validator_source(deps, info, source)
        }
        ExecuteMsg::SetCollaborators {
            reward_pool,
            account_registry,
        } => execute_set_collaborators(deps, info, reward_pool, account_registry),

        // Admin operations
        ExecuteMsg::Pause {} => execute_set_paused(deps, info, true),
        ExecuteMsg::Unpause {} => execute_set_paused(deps, info, false),
        ExecuteMsg::ProposeAdmin { new_admin } => execute_propose_admin(deps, env, info, new_admin),
        ExecuteMsg::AcceptAdmin {} => execute_accept_admin(deps, env, info),
        ExecuteMsg::CancelAdminProposal {} => execute_cancel_admin_proposal(deps, info),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::BridgeParameters {} => to_json_binary(&query_bridge_parameters(deps)?),
        QueryMsg::Chain { chain_id } => to_json_binary(&query_chain(deps, chain_id)?),
        QueryMsg::Chains { start_after, limit } => {
            to_json_binary(&query_chains(deps, start_after, limit)?)
        }
        QueryMsg::ValidatorReward { chain_id } => {
            to_json_binary(&query_validator_reward(deps, chain_id)?)
        }
        QueryMsg::Swap { swap_hash } => to_json_binary(&query_swap(deps, swap_hash)?),
        QueryMsg::Swaps { start_after, limit } => {
            to_json_binary(&query_swaps(deps, start_after, limit)?)
        }
        QueryMsg::Quorum { swap_hash } => to_json_binary(&query_quorum(deps, swap_hash)?),
        QueryMsg::ComputeSwapHash { swap } => {
            to_json_binary(&query_compute_swap_hash(deps, swap)?)
        }
        QueryMsg::ComputeClaimDigest {
            receiver,
            owner_key,
            active_key,
            swap,
        } => to_json_binary(&query_compute_claim_digest(
            deps, receiver, owner_key, active_key, swap,
        )?),
        QueryMsg::ValidateAddress { chain_id, address } => {
            to_json_binary(&query_validate_address(chain_id, address))
        }
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
