// Instruction builder inputs. Mints are always given in pool-creation order.

use solana_sdk::pubkey::Pubkey;

use crate::constants::DEFAULT_FEE_RATE_BPS;

/// Initialize pool parameters
#[derive(Debug, Clone)]
pub struct InitializePoolParams {
    pub initializer: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub fee_rate: u16, // basis points
}

impl InitializePoolParams {
    /// Parameters with the standard 0.3% fee
    pub fn new(initializer: Pubkey, token_a_mint: Pubkey, token_b_mint: Pubkey) -> Self {
        Self {
            initializer,
            token_a_mint,
            token_b_mint,
            fee_rate: DEFAULT_FEE_RATE_BPS,
        }
    }
}

/// Add liquidity parameters
#[derive(Debug, Clone)]
pub struct AddLiquidityParams {
    pub user: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub max_token_a: u64,
    pub max_token_b: u64,
    pub min_lp_tokens: u64,
}

/// Remove liquidity parameters
#[derive(Debug, Clone)]
pub struct RemoveLiquidityParams {
    pub user: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub lp_amount: u64, // lp to burn
    pub min_token_a: u64,
    pub min_token_b: u64,
}

/// Swap parameters
#[derive(Debug, Clone)]
pub struct SwapParams {
    pub user: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub amount_in: u64,
    pub minimum_amount_out: u64,
    pub a_to_b: bool,
}

impl SwapParams {
    pub fn input_mint(&self) -> Pubkey {
        if self.a_to_b {
            self.token_a_mint
        } else {
            self.token_b_mint
        }
    }

    pub fn output_mint(&self) -> Pubkey {
        if self.a_to_b {
            self.token_b_mint
        } else {
            self.token_a_mint
        }
    }
}
