//! JSON-RPC 2.0 wire types.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::error::RpcError;
use crate::provider::TransactionRequest;

// ─── Envelope ───────────────────────────────────────────────────────────────

#[derive(Serialize, Debug, Clone)]
pub struct JsonRpcRequest<'a, P: Serialize> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: P,
}

impl<'a, P: Serialize> JsonRpcRequest<'a, P> {
    pub fn new(id: u64, method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct JsonRpcResponse<T> {
    pub id: Option<serde_json::Value>,
    pub result: Option<T>,
    pub error: Option<JsonRpcErrorObject>,
}

impl<T> JsonRpcResponse<T> {
    /// Unwrap `result`, turning an error object or an empty body into [`RpcError`].
    pub fn into_result(self) -> Result<T, RpcError> {
        if let Some(err) = self.error {
            return Err(err.into());
        }
        self.result
            .ok_or_else(|| RpcError::InvalidResponse("response has neither result nor error".to_string()))
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    /// Revert data, when the node returns it.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl From<JsonRpcErrorObject> for RpcError {
    fn from(err: JsonRpcErrorObject) -> Self {
        let message = match err.data {
            Some(serde_json::Value::String(data)) if !data.is_empty() => {
                format!("{} ({})", err.message, data)
            }
            _ => err.message,
        };
        RpcError::Remote {
            code: err.code,
            message,
        }
    }
}

// ─── Call object ────────────────────────────────────────────────────────────

/// Transaction object for `eth_call` and `eth_sendTransaction`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CallObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
    /// Hex quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
    #[serde(skip_serializing_if = "U256::is_zero")]
    pub value: U256,
}

impl From<&TransactionRequest> for CallObject {
    fn from(tx: &TransactionRequest) -> Self {
        Self {
            from: tx.from,
            to: tx.to,
            data: tx.data.clone(),
            gas: tx.gas.map(|g| format!("{:#x}", g)),
            value: tx.value,
        }
    }
}

/// Parse a `0x`-prefixed hex quantity such as an `eth_chainId` result.
pub fn parse_quantity(value: &str) -> Result<u64, RpcError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    u64::from_str_radix(digits, 16)
        .map_err(|e| RpcError::InvalidResponse(format!("bad quantity {:?}: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let req = JsonRpcRequest::new(7, "eth_chainId", ());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["id"], 7);
        assert_eq!(json["method"], "eth_chainId");
    }

    #[test]
    fn test_response_error_object() {
        let resp: JsonRpcResponse<String> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted","data":"0x08c379a0"}}"#,
        )
        .unwrap();
        match resp.into_result() {
            Err(RpcError::Remote { code, message }) => {
                assert_eq!(code, 3);
                assert_eq!(message, "execution reverted (0x08c379a0)");
            }
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[test]
    fn test_response_result() {
        let resp: JsonRpcResponse<String> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"0xaa36a7"}"#).unwrap();
        let chain = parse_quantity(&resp.into_result().unwrap()).unwrap();
        assert_eq!(chain, 11_155_111);
    }

    #[test]
    fn test_empty_response_is_invalid() {
        let resp: JsonRpcResponse<String> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1}"#).unwrap();
        assert!(matches!(resp.into_result(), Err(RpcError::InvalidResponse(_))));
    }

    /// Decoding generic over any result type, as `do_request` does.
    fn decode<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, RpcError> {
        serde_json::from_str::<JsonRpcResponse<T>>(raw)
            .unwrap()
            .into_result()
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Block {
        number: String,
    }

    #[test]
    fn test_response_result_without_default() {
        let block: Block =
            decode(r#"{"jsonrpc":"2.0","id":1,"result":{"number":"0x10"}}"#).unwrap();
        assert_eq!(block.number, "0x10");
        assert!(decode::<Block>(r#"{"jsonrpc":"2.0","id":1}"#).is_err());
    }

    #[test]
    fn test_call_object_gas_is_hex() {
        let tx = TransactionRequest::new(Address::ZERO, vec![0xab]).gas(1_500_000);
        let json = serde_json::to_value(CallObject::from(&tx)).unwrap();
        assert_eq!(json["gas"], "0x16e360");
        assert_eq!(json["data"], "0xab");
        assert!(json.get("value").is_none());
        assert!(json.get("from").is_none());
    }
}
