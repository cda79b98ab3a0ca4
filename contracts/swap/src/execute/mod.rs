//! Execute handlers for the swap bridge contract.
//!
//! - `swap` - Init (attestation, issuance) and registry cleanup
//! - `claim` - Finish, FinishWithNewAccount and Cancel
//! - `outbound` - CW20 receive hook for redemptions
//! - `config` - Chain registry, parameters, rewards and windows
//! - `admin` - Pause/unpause and admin transfer

mod admin;
mod claim;
mod config;
mod outbound;
mod swap;

pub use admin::*;
pub use claim::*;
pub use config::*;
pub use outbound::*;
pub use swap::*;
