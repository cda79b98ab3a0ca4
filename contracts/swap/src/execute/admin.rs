//! Admin operations handlers.
//!
//! This module handles:
//! - Pause/unpause
//! - Admin transfer (propose/accept/cancel) behind a 7-day timelock

use cosmwasm_std::{Addr, DepsMut, Env, MessageInfo, Response, Storage};

use crate::error::ContractError;
use crate::state::{Config, PendingAdmin, ADMIN_TIMELOCK_DURATION, CONFIG, PENDING_ADMIN};

/// Load the config, failing unless `sender` is the admin.
pub fn load_config_as_admin(storage: &dyn Storage, sender: &Addr) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if *sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

// ============================================================================
// Pause/Unpause
// ============================================================================

/// Pause or resume swaps, claims and redemptions.
pub fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_admin(deps.storage, &info.sender)?;
    config.paused = paused;
    CONFIG.save(deps.storage, &config)?;

    let method = if paused { "pause" } else { "unpause" };
    Ok(Response::new().add_attribute("method", method))
}

// ============================================================================
// Admin Transfer
// ============================================================================

/// Propose a new admin (starts timelock).
pub fn execute_propose_admin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_admin: String,
) -> Result<Response, ContractError> {
    load_config_as_admin(deps.storage, &info.sender)?;

    let pending = PendingAdmin {
        new_address: deps.api.addr_validate(&new_admin)?,
        execute_after: env.block.time.plus_seconds(ADMIN_TIMELOCK_DURATION),
    };
    PENDING_ADMIN.save(deps.storage, &pending)?;

    Ok(Response::new()
        .add_attribute("method", "propose_admin")
        .add_attribute("new_admin", pending.new_address)
        .add_attribute("execute_after", pending.execute_after.seconds().to_string()))
}

/// Accept pending admin role (after timelock).
pub fn execute_accept_admin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_ADMIN
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingAdmin)?;

    if info.sender != pending.new_address {
        return Err(ContractError::UnauthorizedPendingAdmin);
    }

    if env.block.time < pending.execute_after {
        return Err(ContractError::TimelockNotExpired {
            remaining_seconds: pending.execute_after.seconds() - env.block.time.seconds(),
        });
    }

    CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
        config.admin = pending.new_address.clone();
        Ok(config)
    })?;
    PENDING_ADMIN.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_admin")
        .add_attribute("new_admin", pending.new_address))
}

/// Cancel pending admin proposal.
pub fn execute_cancel_admin_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    load_config_as_admin(deps.storage, &info.sender)?;
    PENDING_ADMIN.remove(deps.storage);

    Ok(Response::new().add_attribute("method", "cancel_admin_proposal"))
}
