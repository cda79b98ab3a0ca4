//! Validator set feed interface.
//!
//! A registry contract answering these queries can stand in for the chain's
//! staking module when the attesting identities are plain accounts.

use cosmwasm_schema::{cw_serde, QueryResponses};

/// Queries a validator registry must answer
#[cw_serde]
#[derive(QueryResponses)]
pub enum ValidatorSetQueryMsg {
    /// Current active validator identifiers
    #[returns(ActiveValidatorsResponse)]
    ActiveValidators {},
}

/// Active validator set, one account address per validator
#[cw_serde]
pub struct ActiveValidatorsResponse {
    pub validators: Vec<String>,
}
