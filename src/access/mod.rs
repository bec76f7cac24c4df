//! Token gate: decides whether the connected wallet may see the gallery.

pub mod chain;
pub mod wallet;

pub use chain::{ChainError, ChainReader, JsonRpcChain, TokenBalance};
pub use wallet::WalletSession;

/// Addresses granted access regardless of token ownership.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Allowlist {
    addresses: Vec<String>,
}

impl Allowlist {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let addresses = addresses
            .into_iter()
            .map(|a| a.as_ref().trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        Self { addresses }
    }

    pub fn contains(&self, address: &str) -> bool {
        let address = address.trim();
        self.addresses.iter().any(|a| a.eq_ignore_ascii_case(address))
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Progress of the `balanceOf` read for the connected account.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BalanceQuery {
    #[default]
    Idle,
    Pending,
    Resolved(TokenBalance),
    /// The read failed. Treated as a zero balance.
    Failed(String),
}

/// What the gate shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    ConnectPrompt,
    Checking,
    Denied,
    Granted,
}

impl AccessDecision {
    pub fn has_access(self) -> bool {
        self == AccessDecision::Granted
    }
}

pub fn has_access(address: &str, balance: &TokenBalance, allowlist: &Allowlist) -> bool {
    !balance.is_zero() || allowlist.contains(address)
}

pub fn evaluate_access(
    wallet: &WalletSession,
    query: &BalanceQuery,
    allowlist: &Allowlist,
) -> AccessDecision {
    let Some(address) = wallet.address() else {
        return AccessDecision::ConnectPrompt;
    };

    let balance = match query {
        BalanceQuery::Idle | BalanceQuery::Pending => return AccessDecision::Checking,
        BalanceQuery::Resolved(balance) => *balance,
        BalanceQuery::Failed(_) => TokenBalance::ZERO,
    };

    if has_access(address, &balance, allowlist) {
        AccessDecision::Granted
    } else {
        AccessDecision::Denied
    }
}
