//! Outbound redemption (CW20 receive hook).
//!
//! Tokens sent to the bridge with a `Redeem` memo are burned and announced
//! in a `swap_outbound` event; the payout on the external chain is handled
//! by the watchers.

use cosmwasm_std::{from_json, DepsMut, Env, Event, MessageInfo, Response};
use cw20::Cw20ReceiveMsg;

use crate::address_policy::validate_destination;
use crate::error::ContractError;
use crate::ledger::TokenLedger;
use crate::msg::ReceiveMsg;
use crate::state::{load_chain, CONFIG, PARAMS};

/// Memo field delimiter
pub const MEMO_DELIMITER: char = ' ';

/// Split a redemption memo into `(chain_id, address)`.
pub fn parse_memo(memo: &str) -> Result<(&str, &str), ContractError> {
    let parts: Vec<&str> = memo.split(MEMO_DELIMITER).collect();
    match parts.as_slice() {
        [chain_id, address] if !chain_id.is_empty() && !address.is_empty() => {
            Ok((*chain_id, *address))
        }
        _ => Err(ContractError::InvalidMemo {
            reason: "expected \"<chain id> <address>\"".to_string(),
        }),
    }
}

/// Handle CW20 tokens sent to the bridge.
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if info.sender != config.token {
        return Err(ContractError::UnknownToken {
            sender: info.sender.to_string(),
        });
    }

    // The bridge's own transfers are not redemptions
    if cw20_msg.sender == env.contract.address.as_str() {
        return Ok(Response::new()
            .add_attribute("method", "receive")
            .add_attribute("ignored", "self_transfer"));
    }

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let ReceiveMsg::Redeem { memo } = from_json(&cw20_msg.msg)?;
    let (chain_id, address) = parse_memo(&memo)?;

    let chain = load_chain(deps.storage, chain_id)?;
    if !chain.outbound_enabled {
        return Err(ContractError::OutboundDisabled {
            chain_id: chain.chain_id,
        });
    }
    if cw20_msg.amount < chain.min_outbound_amount {
        return Err(ContractError::BelowChainMinimum {
            chain_id: chain.chain_id,
            min_amount: chain.min_outbound_amount,
        });
    }

    validate_destination(chain_id, address)?;

    let params = PARAMS.load(deps.storage)?;
    let ledger = TokenLedger::new(config.token);

    let event = Event::new("swap_outbound")
        .add_attribute("sender", &cw20_msg.sender)
        .add_attribute("amount", cw20_msg.amount.to_string())
        .add_attribute("denom", &config.native_denom)
        .add_attribute("destination_chain_id", chain_id)
        .add_attribute("destination_address", address)
        .add_attribute("local_chain_id", &params.local_chain_id)
        .add_attribute("external_bridge_address", &params.external_bridge_address)
        .add_attribute("timestamp", env.block.time.seconds().to_string());

    Ok(Response::new()
        .add_message(ledger.retire(cw20_msg.amount)?)
        .add_event(event)
        .add_attribute("method", "redeem")
        .add_attribute("sender", &cw20_msg.sender)
        .add_attribute("amount", cw20_msg.amount.to_string())
        .add_attribute("destination_chain_id", chain_id))
}
