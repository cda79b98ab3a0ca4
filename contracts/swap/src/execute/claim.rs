//! Claim handlers: `Finish`, `FinishWithNewAccount` and `Cancel`.
//!
//! The three are mutually exclusive terminal transitions. `Finish` variants
//! are allowed up to `swap_timestamp + claim_window`, `Cancel` only after it,
//! and none past the swap lifetime.

use cosmwasm_std::{
    Binary, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, Response, Uint128,
};

use crate::claim::verify_claim;
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, compute_claim_digest, compute_swap_hash};
use crate::keys::ClaimKey;
use crate::ledger::TokenLedger;
use crate::msg::SwapTerms;
use crate::state::{
    validator_reward, BridgeParameters, Config, SwapRequest, SwapStatus, CONFIG, PARAMS, SWAPS,
    SWAP_BY_HASH,
};
use crate::validators::ActiveValidatorSet;

/// A swap that passed the checks shared by every claim
struct Claimable {
    request: SwapRequest,
    key: ClaimKey,
    ledger: TokenLedger,
    /// Validator reward for the destination chain
    reward: Uint128,
    /// Issuance, when quorum was reached without a new `Init`
    messages: Vec<CosmosMsg>,
}

impl Claimable {
    /// Amount left after deducting `reward` and `extra`
    fn payout(&self, amount: Uint128, extra: Uint128) -> Result<Uint128, ContractError> {
        amount
            .checked_sub(self.reward)
            .and_then(|rest| rest.checked_sub(extra))
            .map_err(|_| ContractError::InvalidAmount {
                reason: format!(
                    "amount {} does not cover reward {} and stake {}",
                    amount, self.reward, extra
                ),
            })
    }

    /// Send the reward to the pool
    fn pay_reward(&mut self, config: &Config) -> Result<(), ContractError> {
        if !self.reward.is_zero() {
            let msg = self.ledger.transfer(&config.reward_pool, self.reward)?;
            self.messages.push(msg);
        }
        Ok(())
    }
}

/// Checks shared by all claims; re-verifies quorum against the live set.
fn load_claimable(
    deps: Deps,
    env: &Env,
    config: &Config,
    params: &BridgeParameters,
    swap: &SwapTerms,
) -> Result<Claimable, ContractError> {
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let key = ClaimKey::parse(&swap.claim_key)?;
    let swap_hash = compute_swap_hash(swap, &key.tail, &params.local_chain_id);
    let id = SWAP_BY_HASH
        .may_load(deps.storage, swap_hash.as_slice())?
        .ok_or(ContractError::SwapNotFound)?;
    let mut request = SWAPS.load(deps.storage, id)?;

    match request.status {
        SwapStatus::Canceled => return Err(ContractError::SwapAlreadyCanceled),
        SwapStatus::Finished => return Err(ContractError::SwapAlreadyFinished),
        SwapStatus::Initialized | SwapStatus::Issued => {}
    }

    let expired_at = request.expires_at(config.swap_lifetime);
    if env.block.time.seconds() >= expired_at {
        return Err(ContractError::SwapExpired { expired_at });
    }

    let validators = ActiveValidatorSet::load(&deps.querier, &config.validator_source)?;
    if !validators.is_quorum(&request.attestations) {
        return Err(ContractError::QuorumNotReached {
            attested: validators.count_active(&request.attestations),
            required: validators.threshold(),
        });
    }

    let ledger = TokenLedger::new(config.token.clone());
    let mut messages = vec![];
    if request.status == SwapStatus::Initialized {
        messages.push(ledger.issue(&env.contract.address, swap.amount.amount)?);
        request.status = SwapStatus::Issued;
    }

    let reward = validator_reward(deps.storage, config, &swap.destination_chain_id)?;

    Ok(Claimable {
        request,
        key,
        ledger,
        reward,
        messages,
    })
}

fn claim_window_end(config: &Config, swap: &SwapTerms) -> u64 {
    swap.swap_timestamp
        .seconds()
        .saturating_add(config.claim_window)
}

/// Pay out an issued swap to `receiver`.
pub fn execute_finish(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    receiver: String,
    swap: SwapTerms,
    signature: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let params = PARAMS.load(deps.storage)?;
    let receiver_addr = deps.api.addr_validate(&receiver)?;

    let mut claim = load_claimable(deps.as_ref(), &env, &config, &params, &swap)?;

    if env.block.time.seconds() > claim_window_end(&config, &swap) {
        return Err(ContractError::ClaimWindowExpired);
    }

    let digest = compute_claim_digest(&swap, &receiver, None, &params.local_chain_id);
    verify_claim(deps.api, &claim.key, &digest, &signature)?;

    let payout = claim.payout(swap.amount.amount, Uint128::zero())?;
    claim.pay_reward(&config)?;
    if !payout.is_zero() {
        let msg = claim.ledger.transfer(&receiver_addr, payout)?;
        claim.messages.push(msg);
    }

    claim.request.status = SwapStatus::Finished;
    SWAPS.save(deps.storage, claim.request.id, &claim.request)?;

    Ok(Response::new()
        .add_messages(claim.messages)
        .add_attribute("method", "finish")
        .add_attribute("swap_hash", bytes32_to_hex(&claim.request.swap_hash))
        .add_attribute("receiver", receiver_addr)
        .add_attribute("amount", payout.to_string())
        .add_attribute("validator_reward", claim.reward.to_string()))
}

/// Pay out an issued swap, provisioning a new account for `receiver` first.
#[allow(clippy::too_many_arguments)]
pub fn execute_finish_with_new_account(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    receiver: String,
    owner_key: String,
    active_key: String,
    swap: SwapTerms,
    signature: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let params = PARAMS.load(deps.storage)?;
    let registry = config
        .account_registry
        .clone()
        .ok_or(ContractError::AccountRegistryMissing)?;
    let receiver_addr = deps.api.addr_validate(&receiver)?;

    // New credentials must be usable keys
    ClaimKey::parse(&owner_key)?;
    ClaimKey::parse(&active_key)?;

    if config.min_account_stake.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "account stake is not configured".to_string(),
        });
    }

    let mut claim = load_claimable(deps.as_ref(), &env, &config, &params, &swap)?;

    if env.block.time.seconds() > claim_window_end(&config, &swap) {
        return Err(ContractError::ClaimWindowExpired);
    }

    let digest = compute_claim_digest(
        &swap,
        &receiver,
        Some((owner_key.as_str(), active_key.as_str())),
        &params.local_chain_id,
    );
    verify_claim(deps.api, &claim.key, &digest, &signature)?;

    let payout = claim.payout(swap.amount.amount, config.min_account_stake)?;
    claim.pay_reward(&config)?;

    let provision = claim.ledger.provision(
        &registry,
        config.min_account_stake,
        receiver_addr.as_str(),
        &owner_key,
        &active_key,
    )?;
    claim.messages.push(provision);

    if !payout.is_zero() {
        let msg = claim.ledger.transfer(&receiver_addr, payout)?;
        claim.messages.push(msg);
    }

    claim.request.status = SwapStatus::Finished;
    SWAPS.save(deps.storage, claim.request.id, &claim.request)?;

    Ok(Response::new()
        .add_messages(claim.messages)
        .add_attribute("method", "finish_with_new_account")
        .add_attribute("swap_hash", bytes32_to_hex(&claim.request.swap_hash))
        .add_attribute("receiver", receiver_addr)
        .add_attribute("account_stake", config.min_account_stake.to_string())
        .add_attribute("amount", payout.to_string())
        .add_attribute("validator_reward", claim.reward.to_string()))
}

/// Refund a swap whose claim window has lapsed.
///
/// The remainder after the validator reward is burned and a `swap_refund`
/// event tells the watchers to return it on the external chain.
pub fn execute_cancel(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    swap: SwapTerms,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let params = PARAMS.load(deps.storage)?;

    let mut claim = load_claimable(deps.as_ref(), &env, &config, &params, &swap)?;

    let opens_at = claim_window_end(&config, &swap);
    if env.block.time.seconds() <= opens_at {
        return Err(ContractError::ClaimWindowActive { opens_at });
    }

    // A reward raised past the amount must not strand an issued swap
    claim.reward = claim.reward.min(swap.amount.amount);
    let refund = claim.payout(swap.amount.amount, Uint128::zero())?;
    claim.pay_reward(&config)?;
    if !refund.is_zero() {
        let msg = claim.ledger.retire(refund)?;
        claim.messages.push(msg);
    }

    claim.request.status = SwapStatus::Canceled;
    SWAPS.save(deps.storage, claim.request.id, &claim.request)?;

    let swap_hash = bytes32_to_hex(&claim.request.swap_hash);
    let event = Event::new("swap_refund")
        .add_attribute("swap_hash", &swap_hash)
        .add_attribute("external_tx_id", &swap.external_tx_id)
        .add_attribute("amount", refund.to_string())
        .add_attribute("denom", &swap.amount.denom)
        .add_attribute("return_address", &swap.destination_address)
        .add_attribute("return_chain_id", &swap.destination_chain_id)
        .add_attribute("external_bridge_address", &params.external_bridge_address)
        .add_attribute("external_return_chain_id", &params.external_return_chain_id);

    Ok(Response::new()
        .add_messages(claim.messages)
        .add_event(event)
        .add_attribute("method", "cancel")
        .add_attribute("swap_hash", swap_hash)
        .add_attribute("caller", info.sender)
        .add_attribute("refund", refund.to_string())
        .add_attribute("validator_reward", claim.reward.to_string()))
}
