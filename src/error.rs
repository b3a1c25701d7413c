use solana_sdk::pubkey::Pubkey;

/// Failures raised by the SDK itself (transport errors are passed through untouched)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmmClientError {
    #[error("Invalid mint pair: both sides are {0}")]
    InvalidMintPair(Pubkey),

    #[error("No valid bump found for program derived address")]
    DerivationExhausted,

    #[error("Invalid seeds: {0}")]
    InvalidSeeds(String),

    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    #[error("Invalid account data for {address}: {reason}")]
    InvalidAccountData { address: Pubkey, reason: String },

    #[error("Invalid fee rate: {0} bps exceeds 10000")]
    InvalidFeeRate(u16),
}

impl AmmClientError {
    /// True when the error only signals a missing account, which callers may
    /// recover from by creating it first
    pub fn is_account_not_found(&self) -> bool {
        matches!(self, AmmClientError::AccountNotFound(_))
    }
}
