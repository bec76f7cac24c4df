use super::chain::{parse_address, ChainError};

/// Connection state of the visitor's wallet.
///
/// A terminal has no browser extension to talk to, so "connecting" means
/// supplying an account address (flag, config, or the connect prompt).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletSession {
    address: Option<String>,
}

impl WalletSession {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, address: &str) -> Result<(), ChainError> {
        parse_address(address)?;
        self.address = Some(address.trim().to_string());
        Ok(())
    }

    pub fn disconnect(&mut self) {
        self.address = None;
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// `0xf9e6…ba12`
    pub fn short_address(&self) -> Option<String> {
        self.address.as_deref().map(|a| {
            if a.len() > 10 {
                format!("{}…{}", &a[..6], &a[a.len() - 4..])
            } else {
                a.to_string()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_and_disconnect() {
        let mut wallet = WalletSession::disconnected();
        assert!(!wallet.is_connected());

        assert!(wallet.connect("not-an-address").is_err());
        assert!(!wallet.is_connected());

        wallet
            .connect(" 0xF9e631014Ce1759d9B76Ce074D496c3da633BA12 ")
            .unwrap();
        assert!(wallet.is_connected());
        assert_eq!(
            wallet.address(),
            Some("0xF9e631014Ce1759d9B76Ce074D496c3da633BA12")
        );
        assert_eq!(wallet.short_address().as_deref(), Some("0xF9e6…BA12"));

        wallet.disconnect();
        assert_eq!(wallet.address(), None);
    }
}
