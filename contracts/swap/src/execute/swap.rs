//! Inbound swap handler (`Init`) and registry cleanup.
//!
//! Validators observing an external deposit each submit the same swap tuple.
//! Submissions fold into one `SwapRequest` keyed by the swap hash; the call
//! that first observes a live quorum issues the tokens.

use cosmwasm_std::{DepsMut, Env, MessageInfo, Order, Response, StdError, Storage};

use crate::address_policy::validate_destination;
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, compute_swap_hash};
use crate::keys::ClaimKey;
use crate::ledger::TokenLedger;
use crate::msg::SwapTerms;
use crate::state::{
    load_chain, validator_reward, SwapRequest, SwapStatus, CLEANUP_MAX_DELETIONS,
    CLEANUP_SCAN_LIMIT, CONFIG, NEXT_SWAP_ID, PARAMS, SWAPS, SWAP_BY_HASH,
};
use crate::validators::ActiveValidatorSet;

/// Create or attest a swap, issuing tokens on the quorum-crossing call.
pub fn execute_init(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    swap: SwapTerms,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let key = ClaimKey::parse(&swap.claim_key)?;

    if swap.amount.denom != config.native_denom {
        return Err(ContractError::CurrencyMismatch {
            expected: config.native_denom,
            got: swap.amount.denom,
        });
    }

    // The payout must cover the account stake and the validator reward
    let reward = validator_reward(deps.storage, &config, &swap.destination_chain_id)?;
    let floor = config
        .min_account_stake
        .checked_add(reward)
        .map_err(StdError::from)?;
    if swap.amount.amount <= floor {
        return Err(ContractError::BelowSwapFloor { floor });
    }

    let chain = load_chain(deps.storage, &swap.destination_chain_id)?;
    if !chain.inbound_enabled {
        return Err(ContractError::InboundDisabled {
            chain_id: chain.chain_id,
        });
    }
    if swap.amount.amount < chain.min_inbound_amount {
        return Err(ContractError::BelowChainMinimum {
            chain_id: chain.chain_id,
            min_amount: chain.min_inbound_amount,
        });
    }

    validate_destination(&swap.destination_chain_id, &swap.destination_address)?;

    let now = env.block.time.seconds();
    let swap_ts = swap.swap_timestamp.seconds();
    if swap_ts >= now {
        return Err(ContractError::TimestampInFuture);
    }
    if now >= swap_ts.saturating_add(config.swap_lifetime) {
        return Err(ContractError::SwapLifetimeExpired);
    }

    let params = PARAMS.load(deps.storage)?;
    let swap_hash = compute_swap_hash(&swap, &key.tail, &params.local_chain_id);
    let validators = ActiveValidatorSet::load(&deps.querier, &config.validator_source)?;
    let is_validator = validators.contains(&info.sender);

    let existing = SWAP_BY_HASH.may_load(deps.storage, swap_hash.as_slice())?;
    let (mut request, created, attested) = match existing {
        None => {
            let id = NEXT_SWAP_ID.may_load(deps.storage)?.unwrap_or(0);
            NEXT_SWAP_ID.save(deps.storage, &(id + 1))?;

            let attestations = if is_validator {
                vec![info.sender.clone()]
            } else {
                vec![]
            };
            let request = SwapRequest {
                id,
                external_tx_id: swap.external_tx_id.clone(),
                swap_hash,
                swap_timestamp: swap.swap_timestamp,
                status: SwapStatus::Initialized,
                attestations,
            };
            SWAP_BY_HASH.save(deps.storage, swap_hash.as_slice(), &id)?;
            (request, true, is_validator)
        }
        Some(id) => {
            let mut request = SWAPS.load(deps.storage, id)?;

            if !is_validator {
                return Err(ContractError::NotValidator {
                    caller: info.sender.to_string(),
                });
            }
            if request.status == SwapStatus::Canceled {
                return Err(ContractError::SwapAlreadyCanceled);
            }
            if request.has_attested(&info.sender) {
                return Err(ContractError::AttestationAlreadyExists {
                    validator: info.sender.to_string(),
                });
            }

            // Attestations only grow while the swap collects them
            let attested = request.status == SwapStatus::Initialized;
            if attested {
                request.attestations.push(info.sender.clone());
            }
            (request, false, attested)
        }
    };

    let removed = cleanup_expired(deps.storage, now, config.swap_lifetime)?;

    let mut response = Response::new();
    let issued = request.status == SwapStatus::Initialized
        && validators.is_quorum(&request.attestations);
    if issued {
        let ledger = TokenLedger::new(config.token);
        response = response.add_message(ledger.issue(&env.contract.address, swap.amount.amount)?);
        request.status = SwapStatus::Issued;
    }

    SWAPS.save(deps.storage, request.id, &request)?;

    Ok(response
        .add_attribute("method", "init")
        .add_attribute("swap_hash", bytes32_to_hex(&swap_hash))
        .add_attribute("swap_id", request.id.to_string())
        .add_attribute("external_tx_id", swap.external_tx_id)
        .add_attribute("caller", info.sender)
        .add_attribute("created", created.to_string())
        .add_attribute("attested", attested.to_string())
        .add_attribute(
            "active_attestations",
            validators.count_active(&request.attestations).to_string(),
        )
        .add_attribute("threshold", validators.threshold().to_string())
        .add_attribute("issued", issued.to_string())
        .add_attribute("status", request.status.as_str())
        .add_attribute("expired_removed", removed.to_string()))
}

/// Delete swaps past their lifetime, oldest first.
///
/// Visits at most `CLEANUP_SCAN_LIMIT` entries and deletes at most
/// `CLEANUP_MAX_DELETIONS`. An entry is expired once
/// `swap_timestamp + lifetime < now`.
pub fn cleanup_expired(
    storage: &mut dyn Storage,
    now: u64,
    lifetime: u64,
) -> Result<usize, ContractError> {
    let expired: Vec<(u64, [u8; 32])> = SWAPS
        .range(storage, None, None, Order::Ascending)
        .take(CLEANUP_SCAN_LIMIT)
        .filter_map(|item| match item {
            Ok((id, request)) if request.expires_at(lifetime) < now => {
                Some(Ok((id, request.swap_hash)))
            }
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .take(CLEANUP_MAX_DELETIONS)
        .collect::<Result<_, _>>()?;

    for (id, swap_hash) in &expired {
        SWAPS.remove(storage, *id);
        SWAP_BY_HASH.remove(storage, swap_hash.as_slice());
    }

    Ok(expired.len())
}
