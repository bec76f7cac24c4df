use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// `balanceOf(address)`
const BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];
/// `name()`
const NAME_SELECTOR: [u8; 4] = [0x06, 0xfd, 0xde, 0x03];

const WORD: usize = 32;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("rpc transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("malformed rpc response: {0}")]
    Malformed(String),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// A uint256 token balance, kept as its big-endian word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenBalance([u8; WORD]);

impl TokenBalance {
    pub const ZERO: TokenBalance = TokenBalance([0; WORD]);

    pub fn from_u64(value: u64) -> Self {
        let mut word = [0u8; WORD];
        word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
        Self(word)
    }

    /// Reads the first ABI word of an `eth_call` result.
    pub fn from_abi(bytes: &[u8]) -> Result<Self, ChainError> {
        if bytes.len() < WORD {
            return Err(ChainError::Malformed(format!(
                "expected a 32-byte uint256, got {} bytes",
                bytes.len()
            )));
        }
        let mut word = [0u8; WORD];
        word.copy_from_slice(&bytes[..WORD]);
        Ok(Self(word))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn to_u128_saturating(&self) -> u128 {
        if self.0[..16].iter().any(|b| *b != 0) {
            return u128::MAX;
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&self.0[16..]);
        u128::from_be_bytes(low)
    }
}

impl fmt::Display for TokenBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_u128_saturating() {
            u128::MAX => write!(f, "≥{}", u128::MAX),
            n => write!(f, "{}", n),
        }
    }
}

/// Read-only view of the gating token contract.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn balance_of(&self, owner: &str) -> Result<TokenBalance, ChainError>;
    async fn token_name(&self) -> Result<String, ChainError>;
    fn contract(&self) -> &str;
}

/// Parses a `0x`-prefixed 20-byte hex address. Case is ignored.
pub fn parse_address(address: &str) -> Result<[u8; 20], ChainError> {
    let trimmed = address.trim();
    let hex_part = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| ChainError::InvalidAddress(address.to_string()))?;

    let bytes =
        hex::decode(hex_part).map_err(|_| ChainError::InvalidAddress(address.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| ChainError::InvalidAddress(address.to_string()))
}

pub fn encode_balance_of(owner: &str) -> Result<String, ChainError> {
    let address = parse_address(owner)?;
    let mut data = Vec::with_capacity(4 + WORD);
    data.extend_from_slice(&BALANCE_OF_SELECTOR);
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(&address);
    Ok(format!("0x{}", hex::encode(data)))
}

fn encode_name() -> String {
    format!("0x{}", hex::encode(NAME_SELECTOR))
}

fn decode_hex_result(result: &str) -> Result<Vec<u8>, ChainError> {
    let stripped = result.strip_prefix("0x").unwrap_or(result);
    hex::decode(stripped).map_err(|e| ChainError::Malformed(format!("bad hex result: {}", e)))
}

fn out_of_bounds() -> ChainError {
    ChainError::Malformed("ABI offset out of bounds".into())
}

fn read_word_as_usize(bytes: &[u8], at: usize) -> Result<usize, ChainError> {
    let end = at.checked_add(WORD).ok_or_else(out_of_bounds)?;
    let word = bytes
        .get(at..end)
        .ok_or_else(|| ChainError::Malformed(format!("missing ABI word at {}", at)))?;
    // Offsets and lengths that do not fit in 8 bytes are garbage for our purposes.
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(ChainError::Malformed("ABI word out of range".into()));
    }
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&word[WORD - 8..]);
    usize::try_from(u64::from_be_bytes(tail))
        .map_err(|_| ChainError::Malformed("ABI word out of range".into()))
}

/// Decodes an ABI-encoded dynamic `string` return value.
pub fn decode_abi_string(bytes: &[u8]) -> Result<String, ChainError> {
    let offset = read_word_as_usize(bytes, 0)?;
    let len = read_word_as_usize(bytes, offset)?;
    let start = offset.checked_add(WORD).ok_or_else(out_of_bounds)?;
    let end = start.checked_add(len).ok_or_else(out_of_bounds)?;
    let data = bytes
        .get(start..end)
        .ok_or_else(|| ChainError::Malformed("string data truncated".into()))?;
    String::from_utf8(data.to_vec()).map_err(|_| ChainError::Malformed("string is not utf-8".into()))
}

#[derive(Serialize)]
struct CallParams<'a> {
    to: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: (CallParams<'a>, &'static str),
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorBody>,
}

/// `eth_call` over HTTP JSON-RPC against a single endpoint.
pub struct JsonRpcChain {
    client: Client,
    endpoint: String,
    contract: String,
    timeout: Option<Duration>,
}

impl JsonRpcChain {
    pub fn new(client: Client, endpoint: &str, contract: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            contract: contract.to_string(),
            timeout: None,
        }
    }

    /// Limits each `eth_call` to `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn eth_call(&self, data: &str) -> Result<Vec<u8>, ChainError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_call",
            params: (
                CallParams {
                    to: &self.contract,
                    data,
                },
                "latest",
            ),
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let response: RpcResponse = builder
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        let result = response
            .result
            .ok_or_else(|| ChainError::Malformed("response has neither result nor error".into()))?;
        decode_hex_result(&result)
    }
}

#[async_trait]
impl ChainReader for JsonRpcChain {
    async fn balance_of(&self, owner: &str) -> Result<TokenBalance, ChainError> {
        let data = encode_balance_of(owner)?;
        let bytes = self.eth_call(&data).await?;
        let balance = TokenBalance::from_abi(&bytes)?;
        debug!(owner, %balance, contract = %self.contract, "balanceOf resolved");
        Ok(balance)
    }

    async fn token_name(&self) -> Result<String, ChainError> {
        let bytes = self.eth_call(&encode_name()).await?;
        decode_abi_string(&bytes)
    }

    fn contract(&self) -> &str {
        &self.contract
    }
}
