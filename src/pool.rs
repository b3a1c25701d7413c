use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{program_pack::Pack, pubkey::Pubkey};
use spl_token::state::{Account as SplTokenAccount, Mint as SplMint};
use spl_token_2022::extension::StateWithExtensions;

use crate::{
    address::PoolAddresses,
    error::AmmClientError,
    math::{SwapQuote, quote_deposit_pair, quote_swap_detailed, quote_withdrawal},
    source::AccountData,
};

/// Pool account as stored by the program (borsh, no account discriminator)
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolState {
    pub is_initialized: bool,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub lp_token_mint: Pubkey,
    pub fee_rate: u16, // basis points
    pub pool_bump: u8,
    pub authority_bump: u8,
    pub lp_token_bump: u8,
}

impl PoolState {
    /// Decode the leading bytes of a pool account; trailing padding is ignored
    pub fn unpack(address: &Pubkey, data: &[u8]) -> Result<Self, AmmClientError> {
        let state = Self::deserialize(&mut &data[..]).map_err(|e| {
            AmmClientError::InvalidAccountData {
                address: *address,
                reason: e.to_string(),
            }
        })?;

        if !state.is_initialized {
            return Err(AmmClientError::InvalidAccountData {
                address: *address,
                reason: "pool is not initialized".to_string(),
            });
        }
        Ok(state)
    }
}

/// Point-in-time view of a pool used for previews. The program stays the
/// source of truth; nothing here is written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub address: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub lp_token_mint: Pubkey,
    pub authority: Pubkey,
    pub pool_token_a: Pubkey,
    pub pool_token_b: Pubkey,
    pub token_a_reserve: u64,
    pub token_b_reserve: u64,
    pub lp_token_supply: u64,
    pub fee_rate: u16,
}

impl PoolSnapshot {
    /// Assemble a snapshot from the pool account and its reserve and LP mint
    /// accounts
    pub(crate) fn from_accounts(
        addresses: &PoolAddresses,
        pool_token_a: Pubkey,
        pool_token_b: Pubkey,
        pool_account: &AccountData,
        reserve_a_account: &AccountData,
        reserve_b_account: &AccountData,
        lp_mint_account: &AccountData,
    ) -> Result<Self, AmmClientError> {
        let pool_address = addresses.pool.address;
        let state = PoolState::unpack(&pool_address, &pool_account.data)?;

        if state.token_a_mint != addresses.token_a_mint
            || state.token_b_mint != addresses.token_b_mint
        {
            return Err(AmmClientError::InvalidAccountData {
                address: pool_address,
                reason: "pool mints do not match the requested pair".to_string(),
            });
        }
        if state.lp_token_mint != addresses.lp_token_mint.address {
            return Err(AmmClientError::InvalidAccountData {
                address: pool_address,
                reason: format!("unexpected lp token mint {}", state.lp_token_mint),
            });
        }

        Ok(Self {
            address: pool_address,
            token_a_mint: state.token_a_mint,
            token_b_mint: state.token_b_mint,
            lp_token_mint: state.lp_token_mint,
            authority: addresses.authority.address,
            pool_token_a,
            pool_token_b,
            token_a_reserve: parse_token_account_balance(reserve_a_account, &pool_token_a)?,
            token_b_reserve: parse_token_account_balance(reserve_b_account, &pool_token_b)?,
            lp_token_supply: parse_mint_supply(lp_mint_account, &state.lp_token_mint)?,
            fee_rate: state.fee_rate,
        })
    }

    /// Reserves ordered as (input, output) for the swap direction
    pub fn reserves_for(&self, a_to_b: bool) -> (u64, u64) {
        if a_to_b {
            (self.token_a_reserve, self.token_b_reserve)
        } else {
            (self.token_b_reserve, self.token_a_reserve)
        }
    }

    pub fn quote(&self, amount_in: u64, a_to_b: bool) -> SwapQuote {
        let (reserve_in, reserve_out) = self.reserves_for(a_to_b);
        quote_swap_detailed(amount_in, reserve_in, reserve_out, self.fee_rate)
    }

    /// Token B needed alongside `amount_a` to keep the pool ratio
    pub fn quote_token_b_for(&self, amount_a: u64) -> u64 {
        quote_deposit_pair(amount_a, self.token_a_reserve, self.token_b_reserve)
    }

    /// Token A needed alongside `amount_b` to keep the pool ratio
    pub fn quote_token_a_for(&self, amount_b: u64) -> u64 {
        quote_deposit_pair(amount_b, self.token_b_reserve, self.token_a_reserve)
    }

    /// Expected (token A, token B) for burning `lp_amount`
    pub fn quote_withdrawal(&self, lp_amount: u64) -> (u64, u64) {
        quote_withdrawal(
            lp_amount,
            self.lp_token_supply,
            self.token_a_reserve,
            self.token_b_reserve,
        )
    }
}

/// Parsed SPL token account fields the client cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAccountInfo {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

/// Parse token account balance reliably for both SPL and Token2022 tokens
pub(crate) fn parse_token_account(
    account: &AccountData,
    address: &Pubkey,
) -> Result<TokenAccountInfo, AmmClientError> {
    let invalid = |reason: String| AmmClientError::InvalidAccountData {
        address: *address,
        reason,
    };

    match account.owner {
        owner if owner == spl_token::ID => {
            let token_account =
                SplTokenAccount::unpack(&account.data).map_err(|e| invalid(e.to_string()))?;
            Ok(TokenAccountInfo {
                mint: token_account.mint,
                owner: token_account.owner,
                amount: token_account.amount,
            })
        }
        owner if owner == spl_token_2022::ID => {
            let token_account =
                StateWithExtensions::<spl_token_2022::state::Account>::unpack(&account.data)
                    .map_err(|e| invalid(e.to_string()))?;
            Ok(TokenAccountInfo {
                mint: token_account.base.mint,
                owner: token_account.base.owner,
                amount: token_account.base.amount,
            })
        }
        owner => Err(invalid(format!("unknown token program {}", owner))),
    }
}

fn parse_token_account_balance(
    account: &AccountData,
    address: &Pubkey,
) -> Result<u64, AmmClientError> {
    parse_token_account(account, address).map(|info| info.amount)
}

/// Decimals and supply of a mint owned by either token program
pub(crate) fn parse_mint(account: &AccountData, address: &Pubkey) -> Result<(u8, u64), AmmClientError> {
    let invalid = |reason: String| AmmClientError::InvalidAccountData {
        address: *address,
        reason,
    };

    match account.owner {
        owner if owner == spl_token::ID => {
            let mint = SplMint::unpack(&account.data).map_err(|e| invalid(e.to_string()))?;
            Ok((mint.decimals, mint.supply))
        }
        owner if owner == spl_token_2022::ID => {
            let mint = StateWithExtensions::<spl_token_2022::state::Mint>::unpack(&account.data)
                .map_err(|e| invalid(e.to_string()))?;
            Ok((mint.base.decimals, mint.base.supply))
        }
        owner => Err(invalid(format!("unknown token program {}", owner))),
    }
}

fn parse_mint_supply(account: &AccountData, address: &Pubkey) -> Result<u64, AmmClientError> {
    parse_mint(account, address).map(|(_, supply)| supply)
}
