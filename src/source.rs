use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use solana_rpc_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;

use crate::error::AmmClientError;

/// Account map for storing account data
pub type AccountMap = HashMap<Pubkey, AccountData>;

/// Account data structure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountData {
    pub data: Vec<u8>,
    pub owner: Pubkey,
}

impl From<solana_sdk::account::Account> for AccountData {
    fn from(account: solana_sdk::account::Account) -> Self {
        Self {
            data: account.data,
            owner: account.owner,
        }
    }
}

/// Read-only view of ledger accounts.
///
/// `Ok(None)` means the account does not exist yet; transport failures are
/// returned as errors untouched so callers can apply their own retry policy.
#[async_trait]
pub trait AccountSource: Send + Sync {
    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<AccountData>>;

    /// Results are positionally aligned with `pubkeys`
    async fn get_multiple_accounts(&self, pubkeys: &[Pubkey]) -> Result<Vec<Option<AccountData>>> {
        let mut accounts = Vec::with_capacity(pubkeys.len());
        for pubkey in pubkeys {
            accounts.push(self.get_account(pubkey).await?);
        }
        Ok(accounts)
    }
}

#[async_trait]
impl AccountSource for RpcClient {
    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<AccountData>> {
        let account = self
            .get_account_with_commitment(pubkey, self.commitment())
            .await?
            .value;
        Ok(account.map(AccountData::from))
    }

    async fn get_multiple_accounts(&self, pubkeys: &[Pubkey]) -> Result<Vec<Option<AccountData>>> {
        let accounts = self
            .get_multiple_accounts_with_commitment(pubkeys, self.commitment())
            .await?
            .value;
        Ok(accounts
            .into_iter()
            .map(|account| account.map(AccountData::from))
            .collect())
    }
}

/// In-memory snapshot, handy for previews against cached state and for tests
#[async_trait]
impl AccountSource for AccountMap {
    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<AccountData>> {
        Ok(self.get(pubkey).cloned())
    }
}

/// Helper function to get account data, mapping absence to `AccountNotFound`
pub(crate) async fn fetch_required<S: AccountSource + ?Sized>(
    source: &S,
    pubkey: &Pubkey,
) -> Result<AccountData> {
    source
        .get_account(pubkey)
        .await
        .with_context(|| format!("Failed to fetch account {}", pubkey))?
        .ok_or_else(|| AmmClientError::AccountNotFound(*pubkey).into())
}
