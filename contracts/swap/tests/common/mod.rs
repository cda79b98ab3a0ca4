//! Shared setup for the swap bridge integration tests.
//!
//! Wires a real cw20-base token, a mock validator registry, a mock account
//! registry and the bridge itself into one cw-multi-test `App`.

#![allow(dead_code)]

use cosmwasm_std::{coin, Addr, Binary, Empty, Event, Timestamp, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, MinterResponse};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

use swap::msg::{
    ComputeHashResponse, ExecuteMsg, InstantiateMsg, QueryMsg, SwapResponse, SwapTerms,
    SwapsResponse,
};
use swap::state::ValidatorSource;
use swap::{ContractError, ErrorKind};

pub const DENOM: &str = "urem";
pub const CHAIN: &str = "ethropsten";
pub const LOCAL_CHAIN: &str = "rem-local";
pub const DEST_ADDRESS: &str = "0x9fB8A18fF402680b47387AE0F4e38229EC64f098";
pub const SWAP_AMOUNT: u128 = 1_000_000;
pub const REWARD: u128 = 100;
pub const ACCOUNT_STAKE: u128 = 1_000;
pub const LIFETIME: u64 = 30 * 86_400;
pub const CLAIM_WINDOW: u64 = 7 * 86_400;

// ============================================================================
// Mock Validator Registry
// ============================================================================

pub mod mock_validators {
    use common::{ActiveValidatorsResponse, ValidatorSetQueryMsg};
    use cosmwasm_schema::cw_serde;
    use cosmwasm_std::{
        to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
    };
    use cw_storage_plus::Item;

    const VALIDATORS: Item<Vec<String>> = Item::new("validators");

    #[cw_serde]
    pub struct InstantiateMsg {
        pub validators: Vec<String>,
    }

    #[cw_serde]
    pub enum ExecuteMsg {
        /// Replace the active set (rotation)
        SetValidators { validators: Vec<String> },
    }

    pub fn instantiate(
        deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        msg: InstantiateMsg,
    ) -> StdResult<Response> {
        VALIDATORS.save(deps.storage, &msg.validators)?;
        Ok(Response::new())
    }

    pub fn execute(
        deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        msg: ExecuteMsg,
    ) -> StdResult<Response> {
        match msg {
            ExecuteMsg::SetValidators { validators } => {
                VALIDATORS.save(deps.storage, &validators)?;
                Ok(Response::new())
            }
        }
    }

    pub fn query(deps: Deps, _env: Env, msg: ValidatorSetQueryMsg) -> StdResult<Binary> {
        match msg {
            ValidatorSetQueryMsg::ActiveValidators {} => {
                to_json_binary(&ActiveValidatorsResponse {
                    validators: VALIDATORS.load(deps.storage)?,
                })
            }
        }
    }
}

// ============================================================================
// Mock Account Registry
// ============================================================================

pub mod mock_accounts {
    use common::AccountProvisionMsg;
    use cosmwasm_schema::cw_serde;
    use cosmwasm_std::{
        from_json, to_json_binary, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response,
        StdResult, Uint128,
    };
    use cw20::Cw20ReceiveMsg;
    use cw_storage_plus::Map;

    const ACCOUNTS: Map<&str, AccountRecord> = Map::new("accounts");

    #[cw_serde]
    pub struct AccountRecord {
        pub owner_key: String,
        pub active_key: String,
        pub stake: Uint128,
        pub funded_by: String,
    }

    #[cw_serde]
    pub enum ExecuteMsg {
        Receive(Cw20ReceiveMsg),
    }

    #[cw_serde]
    pub enum QueryMsg {
        Account { account: String },
    }

    pub fn instantiate(
        _deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        _msg: Empty,
    ) -> StdResult<Response> {
        Ok(Response::new())
    }

    pub fn execute(
        deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        msg: ExecuteMsg,
    ) -> StdResult<Response> {
        match msg {
            ExecuteMsg::Receive(cw20_msg) => {
                let AccountProvisionMsg::CreateAccount {
                    account,
                    owner_key,
                    active_key,
                } = from_json(&cw20_msg.msg)?;
                ACCOUNTS.save(
                    deps.storage,
                    &account,
                    &AccountRecord {
                        owner_key,
                        active_key,
                        stake: cw20_msg.amount,
                        funded_by: cw20_msg.sender,
                    },
                )?;
                Ok(Response::new())
            }
        }
    }

    pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
        match msg {
            QueryMsg::Account { account } => {
                to_json_binary(&ACCOUNTS.may_load(deps.storage, &account)?)
            }
        }
    }
}

// ============================================================================
// Contract Wrappers
// ============================================================================

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        swap::contract::execute,
        swap::contract::instantiate,
        swap::contract::query,
    )
    .with_migrate(swap::contract::migrate);
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

fn contract_validators() -> Box<dyn cw_multi_test::Contract<Empty>> {
    Box::new(ContractWrapper::new(
        mock_validators::execute,
        mock_validators::instantiate,
        mock_validators::query,
    ))
}

fn contract_accounts() -> Box<dyn cw_multi_test::Contract<Empty>> {
    Box::new(ContractWrapper::new(
        mock_accounts::execute,
        mock_accounts::instantiate,
        mock_accounts::query,
    ))
}

// ============================================================================
// Claim Keys
// ============================================================================

/// Holder of a one-time claim key
pub struct ClaimSigner {
    secret: SecretKey,
    /// Prefixed string form embedded in the swap tuple
    pub key: String,
}

impl ClaimSigner {
    pub fn new(seed: u8) -> Self {
        Self::with_prefix(seed, "REM")
    }

    pub fn with_prefix(seed: u8, prefix: &str) -> Self {
        let secp = Secp256k1::new();
        let secret = SecretKey::from_slice(&[seed; 32]).unwrap();
        let mut raw = PublicKey::from_secret_key(&secp, &secret)
            .serialize()
            .to_vec();
        // Checksum bytes are carried but not checked on chain
        raw.extend_from_slice(&[0, 0, 0, 0]);
        Self {
            secret,
            key: format!("{}{}", prefix, bs58::encode(raw).into_string()),
        }
    }

    pub fn sign(&self, digest: &[u8]) -> Binary {
        let secp = Secp256k1::new();
        let digest: [u8; 32] = digest.try_into().unwrap();
        let sig = secp.sign_ecdsa(&Message::from_digest(digest), &self.secret);
        Binary::from(sig.serialize_compact().to_vec())
    }
}

// ============================================================================
// Test Environment
// ============================================================================

pub struct TestEnv {
    pub app: App,
    pub admin: Addr,
    pub user: Addr,
    pub receiver: Addr,
    pub reward_pool: Addr,
    pub bridge: Addr,
    pub token: Addr,
    pub validator_registry: Addr,
    pub account_registry: Addr,
    pub validators: Vec<Addr>,
}

pub fn setup() -> TestEnv {
    setup_with_validators(4)
}

pub fn setup_with_validators(count: usize) -> TestEnv {
    let mut app = App::default();

    let admin = Addr::unchecked("terra1admin");
    let user = Addr::unchecked("terra1user");
    let receiver = Addr::unchecked("terra1receiver");
    let reward_pool = Addr::unchecked("terra1rewardpool");
    let validators: Vec<Addr> = (1..=count)
        .map(|i| Addr::unchecked(format!("terra1val{}", i)))
        .collect();

    let cw20_code = app.store_code(contract_cw20());
    let bridge_code = app.store_code(contract_bridge());
    let validators_code = app.store_code(contract_validators());
    let accounts_code = app.store_code(contract_accounts());

    let token = app
        .instantiate_contract(
            cw20_code,
            admin.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Remme Token".to_string(),
                symbol: "REM".to_string(),
                decimals: 4,
                initial_balances: vec![Cw20Coin {
                    address: user.to_string(),
                    amount: Uint128::new(10_000_000),
                }],
                mint: Some(MinterResponse {
                    minter: admin.to_string(),
                    cap: None,
                }),
                marketing: None,
            },
            &[],
            "rem-token",
            None,
        )
        .unwrap();

    let validator_registry = app
        .instantiate_contract(
            validators_code,
            admin.clone(),
            &mock_validators::InstantiateMsg {
                validators: validators.iter().map(|v| v.to_string()).collect(),
            },
            &[],
            "validators",
            None,
        )
        .unwrap();

    let account_registry = app
        .instantiate_contract(accounts_code, admin.clone(), &Empty {}, &[], "accounts", None)
        .unwrap();

    let bridge = app
        .instantiate_contract(
            bridge_code,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                token: token.to_string(),
                native_denom: DENOM.to_string(),
                reward_pool: reward_pool.to_string(),
                account_registry: Some(account_registry.to_string()),
                validator_source: ValidatorSource::Registry {
                    contract: validator_registry.to_string(),
                },
                min_account_stake: Uint128::new(ACCOUNT_STAKE),
                default_validator_reward: Uint128::new(REWARD),
                swap_lifetime: Some(LIFETIME),
                claim_window: Some(CLAIM_WINDOW),
                local_chain_id: LOCAL_CHAIN.to_string(),
                external_bridge_address: "0xd18a02cafC6715c2e096636aB3349E4B79FAeCE7"
                    .to_string(),
                external_return_chain_id: CHAIN.to_string(),
            },
            &[],
            "swap-bridge",
            Some(admin.to_string()),
        )
        .unwrap();

    // The bridge issues tokens, so it must be the minter
    app.execute_contract(
        admin.clone(),
        token.clone(),
        &Cw20ExecuteMsg::UpdateMinter {
            new_minter: Some(bridge.to_string()),
        },
        &[],
    )
    .unwrap();

    app.execute_contract(
        admin.clone(),
        bridge.clone(),
        &ExecuteMsg::AddChain {
            chain_id: CHAIN.to_string(),
            inbound_enabled: true,
            outbound_enabled: true,
            min_inbound_amount: Uint128::new(10_000),
            min_outbound_amount: Uint128::new(1_000),
        },
        &[],
    )
    .unwrap();

    TestEnv {
        app,
        admin,
        user,
        receiver,
        reward_pool,
        bridge,
        token,
        validator_registry,
        account_registry,
        validators,
    }
}

impl TestEnv {
    pub fn now(&self) -> Timestamp {
        self.app.block_info().time
    }

    pub fn advance(&mut self, seconds: u64) {
        self.app
            .update_block(|block| block.time = block.time.plus_seconds(seconds));
    }

    /// Swap tuple for an external deposit made an hour ago
    pub fn swap_terms(&self, signer: &ClaimSigner, tx: &str) -> SwapTerms {
        SwapTerms {
            external_tx_id: tx.to_string(),
            claim_key: signer.key.clone(),
            amount: coin(SWAP_AMOUNT, DENOM),
            destination_address: DEST_ADDRESS.to_string(),
            destination_chain_id: CHAIN.to_string(),
            swap_timestamp: self.now().minus_seconds(3_600),
        }
    }

    pub fn init(&mut self, sender: &Addr, swap: &SwapTerms) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.bridge.clone(),
            &ExecuteMsg::Init { swap: swap.clone() },
            &[],
        )
    }

    /// Attest with the first `count` validators
    pub fn attest(&mut self, count: usize, swap: &SwapTerms) {
        for validator in self.validators.clone().iter().take(count) {
            self.init(validator, swap).unwrap();
        }
    }

    pub fn set_validators(&mut self, validators: &[&str]) {
        self.app
            .execute_contract(
                self.admin.clone(),
                self.validator_registry.clone(),
                &mock_validators::ExecuteMsg::SetValidators {
                    validators: validators.iter().map(|v| v.to_string()).collect(),
                },
                &[],
            )
            .unwrap();
    }

    pub fn finish(
        &mut self,
        signer: &ClaimSigner,
        receiver: &str,
        swap: &SwapTerms,
    ) -> anyhow::Result<AppResponse> {
        let digest = self.claim_digest(receiver, None, swap);
        self.app.execute_contract(
            self.user.clone(),
            self.bridge.clone(),
            &ExecuteMsg::Finish {
                receiver: receiver.to_string(),
                swap: swap.clone(),
                signature: signer.sign(&digest),
            },
            &[],
        )
    }

    pub fn cancel(&mut self, swap: &SwapTerms) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.user.clone(),
            self.bridge.clone(),
            &ExecuteMsg::Cancel { swap: swap.clone() },
            &[],
        )
    }

    pub fn swap_hash(&self, swap: &SwapTerms) -> Binary {
        let res: ComputeHashResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::ComputeSwapHash { swap: swap.clone() },
            )
            .unwrap();
        res.hash
    }

    pub fn claim_digest(
        &self,
        receiver: &str,
        keys: Option<(&str, &str)>,
        swap: &SwapTerms,
    ) -> Binary {
        let res: ComputeHashResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::ComputeClaimDigest {
                    receiver: receiver.to_string(),
                    owner_key: keys.map(|(o, _)| o.to_string()),
                    active_key: keys.map(|(_, a)| a.to_string()),
                    swap: swap.clone(),
                },
            )
            .unwrap();
        res.hash
    }

    pub fn query_swap(&self, swap: &SwapTerms) -> Option<SwapResponse> {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::Swap {
                    swap_hash: self.swap_hash(swap),
                },
            )
            .unwrap()
    }

    pub fn swap_count(&self) -> usize {
        let res: SwapsResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::Swaps {
                    start_after: None,
                    limit: Some(50),
                },
            )
            .unwrap();
        res.swaps.len()
    }

    pub fn balance(&self, addr: &Addr) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.token,
                &cw20::Cw20QueryMsg::Balance {
                    address: addr.to_string(),
                },
            )
            .unwrap();
        res.balance
    }

    pub fn total_supply(&self) -> Uint128 {
        let res: cw20::TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.token, &cw20::Cw20QueryMsg::TokenInfo {})
            .unwrap();
        res.total_supply
    }
}

/// Assert a call failed with exactly `expected`
#[track_caller]
pub fn assert_contract_err(res: anyhow::Result<AppResponse>, expected: ContractError) {
    let err = res.unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&expected),
        "unexpected error: {:?}",
        err
    );
}

/// Taxonomy tag of a failed call
#[track_caller]
pub fn err_kind(res: anyhow::Result<AppResponse>) -> ErrorKind {
    let err = res.unwrap_err();
    match err.downcast_ref::<ContractError>() {
        Some(e) => e.kind(),
        None => panic!("expected a swap bridge error, got {:?}", err),
    }
}

/// Attribute of the bridge's own wasm event
pub fn wasm_attr(res: &AppResponse, key: &str) -> Option<String> {
    res.events
        .iter()
        .filter(|e| e.ty == "wasm")
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

/// First custom event of the given type (emitted as `wasm-<ty>`)
pub fn find_event<'a>(res: &'a AppResponse, ty: &str) -> Option<&'a Event> {
    let full = format!("wasm-{}", ty);
    res.events.iter().find(|e| e.ty == full)
}

pub fn event_attr(event: &Event, key: &str) -> String {
    event
        .attributes
        .iter()
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
        .unwrap_or_default()
}
