//! Common - Collaborator Interfaces for the Swap Bridge
//!
//! The swap contract talks to two external contracts whose message formats
//! live here so that both sides (and the test mocks) agree on them:
//! - `validators` - the active validator set feed
//! - `accounts` - the account registry that provisions new identities

pub mod accounts;
pub mod validators;

pub use accounts::AccountProvisionMsg;
pub use validators::{ActiveValidatorsResponse, ValidatorSetQueryMsg};
