//! Account provisioning interface.

use cosmwasm_schema::cw_serde;

/// Hook payload carried by the CW20 `Send` that funds a new account.
///
/// The sent amount is the account's initial resource allocation.
#[cw_serde]
pub enum AccountProvisionMsg {
    CreateAccount {
        /// Address of the identity being provisioned
        account: String,
        /// Owner credential (claim-key string form)
        owner_key: String,
        /// Active credential (claim-key string form)
        active_key: String,
    },
}
