//! In-memory connection provider for driving full client flows.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};

use evvm_signature_sdk::error::{RpcError, SdkError, SdkResult, SignerError};
use evvm_signature_sdk::prelude::*;

pub const NAME_SERVICE: Address = Address::repeat_byte(0x4e);
pub const STAKING: Address = Address::repeat_byte(0x57);
pub const P2P_SWAP: Address = Address::repeat_byte(0x50);
pub const SENSOR_SERVICE: Address = Address::repeat_byte(0x53);
pub const TEST_EVVM_ID: u64 = 1074;

/// Signs with a local key, answers scripted `eth_call`s by selector and
/// records every message signed and every transaction sent.
pub struct FakeProvider {
    pub signer: LocalSigner,
    /// Signs with this key instead, as a misbehaving wallet would.
    rogue: Option<LocalSigner>,
    connected: bool,
    revert: Option<String>,
    responses: Mutex<HashMap<[u8; 4], Vec<u8>>>,
    pub signed: Mutex<Vec<String>>,
    pub calls: Mutex<Vec<TransactionRequest>>,
    pub sent: Mutex<Vec<TransactionRequest>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            signer: LocalSigner::random(),
            rogue: None,
            connected: true,
            revert: None,
            responses: Mutex::new(HashMap::new()),
            signed: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Answer calls to `selector` with raw ABI-encoded return data.
    pub fn respond(self, selector: [u8; 4], data: Vec<u8>) -> Self {
        self.responses.lock().unwrap().insert(selector, data);
        self
    }

    pub fn respond_u256(self, selector: [u8; 4], value: U256) -> Self {
        self.respond(selector, word(value))
    }

    pub fn respond_address(self, selector: [u8; 4], value: Address) -> Self {
        self.respond(selector, address_word(value))
    }

    pub fn reverting(mut self, reason: &str) -> Self {
        self.revert = Some(reason.to_string());
        self
    }

    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }

    pub fn rogue(mut self) -> Self {
        self.rogue = Some(LocalSigner::random());
        self
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn signed(&self) -> Vec<String> {
        self.signed.lock().unwrap().clone()
    }
}

impl ConnectionProvider for FakeProvider {
    async fn current_account(&self) -> SdkResult<Option<Address>> {
        Ok(self.connected.then(|| self.signer.address()))
    }

    async fn sign_message(&self, account: Address, message: &str) -> SdkResult<EvmSignature> {
        if account != self.signer.address() {
            return Err(SignerError::Rejected(format!("unknown account {}", account)).into());
        }
        self.signed.lock().unwrap().push(message.to_string());
        let key = self.rogue.as_ref().unwrap_or(&self.signer);
        Ok(key.sign_message(message)?)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> SdkResult<B256> {
        self.sent.lock().unwrap().push(tx.clone());
        if let Some(reason) = &self.revert {
            return Err(SdkError::Rpc(RpcError::Remote {
                code: 3,
                message: format!("execution reverted: {}", reason),
            }));
        }
        Ok(keccak256(&tx.data))
    }

    async fn call(&self, tx: TransactionRequest) -> SdkResult<Bytes> {
        self.calls.lock().unwrap().push(tx.clone());
        let selector: [u8; 4] = tx
            .data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| SdkError::Other("calldata too short".to_string()))?;
        match self.responses.lock().unwrap().get(&selector) {
            Some(data) => Ok(Bytes::from(data.clone())),
            None => Err(SdkError::Rpc(RpcError::Remote {
                code: -32000,
                message: "execution reverted".to_string(),
            })),
        }
    }
}

/// One ABI word holding `value`.
pub fn word(value: U256) -> Vec<u8> {
    value.to_be_bytes::<32>().to_vec()
}

pub fn address_word(value: Address) -> Vec<u8> {
    let mut out = vec![0u8; 12];
    out.extend_from_slice(value.as_slice());
    out
}

/// A client over `provider` with every service address configured and a
/// near-instant account lookup.
pub fn client(provider: FakeProvider) -> EvvmClient<FakeProvider> {
    EvvmClient::builder(provider)
        .evvm_id(TEST_EVVM_ID)
        .name_service_address(NAME_SERVICE)
        .staking_address(STAKING)
        .p2p_swap_address(P2P_SWAP)
        .sensor_service_address(SENSOR_SERVICE)
        .account_retry(AccountRetry {
            max_retries: 2,
            delay: Duration::from_millis(1),
        })
        .build()
        .unwrap()
}
