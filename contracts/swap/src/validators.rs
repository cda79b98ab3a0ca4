//! Live validator set and the quorum rule
//!
//! The set is fetched from its source on every check and never cached in
//! storage, so rotation between calls is always observed. Attestations from
//! validators that have since left the set do not count towards quorum.

use cosmwasm_std::{Addr, QuerierWrapper};

use common::{ActiveValidatorsResponse, ValidatorSetQueryMsg};

use crate::address_policy::bech32_payload;
use crate::error::ContractError;
use crate::state::ValidatorSource;

/// Attestations needed out of `validator_count` active validators:
/// `floor(2V/3) + 1`.
pub fn quorum_threshold(validator_count: u32) -> u32 {
    ((validator_count as u64 * 2 / 3) + 1) as u32
}

/// Snapshot of the active validator set for the current call
#[derive(Clone, Debug)]
pub struct ActiveValidatorSet {
    /// Match callers by bech32 payload instead of the full address
    by_payload: bool,
    /// Sorted, deduplicated member identities
    members: Vec<Vec<u8>>,
}

impl ActiveValidatorSet {
    /// Fetch the live set from the configured source.
    pub fn load(
        querier: &QuerierWrapper,
        source: &ValidatorSource,
    ) -> Result<Self, ContractError> {
        match source {
            ValidatorSource::Staking {} => {
                let validators = querier.query_all_validators()?;
                Ok(Self::new(
                    true,
                    validators
                        .iter()
                        .filter_map(|v| bech32_payload(&v.address))
                        .collect(),
                ))
            }
            ValidatorSource::Registry { contract } => {
                let res: ActiveValidatorsResponse =
                    querier.query_wasm_smart(contract, &ValidatorSetQueryMsg::ActiveValidators {})?;
                Ok(Self::new(
                    false,
                    res.validators
                        .into_iter()
                        .map(String::into_bytes)
                        .collect(),
                ))
            }
        }
    }

    fn new(by_payload: bool, mut members: Vec<Vec<u8>>) -> Self {
        members.sort();
        members.dedup();
        Self {
            by_payload,
            members,
        }
    }

    fn identity(&self, addr: &Addr) -> Option<Vec<u8>> {
        if self.by_payload {
            bech32_payload(addr.as_str())
        } else {
            Some(addr.as_bytes().to_vec())
        }
    }

    /// Number of active validators (V)
    pub fn size(&self) -> u32 {
        self.members.len() as u32
    }

    pub fn contains(&self, addr: &Addr) -> bool {
        self.identity(addr)
            .map(|id| self.members.binary_search(&id).is_ok())
            .unwrap_or(false)
    }

    /// Attestations from currently active validators (A)
    pub fn count_active(&self, attestations: &[Addr]) -> u32 {
        attestations.iter().filter(|a| self.contains(a)).count() as u32
    }

    pub fn threshold(&self) -> u32 {
        quorum_threshold(self.size())
    }

    pub fn is_quorum(&self, attestations: &[Addr]) -> bool {
        self.count_active(attestations) >= self.threshold()
    }
}
