//! Token ledger capabilities
//!
//! The bridged asset is a CW20 contract that has the bridge as its minter.
//! Each capability builds the message; the host executes it atomically with
//! the calling handler.

use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, StdResult, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use common::AccountProvisionMsg;

#[derive(Clone, Debug)]
pub struct TokenLedger {
    pub token: Addr,
}

impl TokenLedger {
    pub fn new(token: Addr) -> Self {
        Self { token }
    }

    fn execute(&self, msg: &Cw20ExecuteMsg) -> StdResult<CosmosMsg> {
        Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: self.token.to_string(),
            msg: to_json_binary(msg)?,
            funds: vec![],
        }))
    }

    /// Mint `amount` into the bridge's own pool
    pub fn issue(&self, bridge: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
        self.execute(&Cw20ExecuteMsg::Mint {
            recipient: bridge.to_string(),
            amount,
        })
    }

    pub fn transfer(&self, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
        self.execute(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })
    }

    /// Burn `amount` held by the bridge
    pub fn retire(&self, amount: Uint128) -> StdResult<CosmosMsg> {
        self.execute(&Cw20ExecuteMsg::Burn { amount })
    }

    /// Fund a new account through the registry's receive hook
    pub fn provision(
        &self,
        registry: &Addr,
        stake: Uint128,
        account: &str,
        owner_key: &str,
        active_key: &str,
    ) -> StdResult<CosmosMsg> {
        self.execute(&Cw20ExecuteMsg::Send {
            contract: registry.to_string(),
            amount: stake,
            msg: to_json_binary(&AccountProvisionMsg::CreateAccount {
                account: account.to_string(),
                owner_key: owner_key.to_string(),
                active_key: active_key.to_string(),
            })?,
        })
    }
}
