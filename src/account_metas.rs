use solana_sdk::{instruction::AccountMeta, pubkey::Pubkey};

// Order and flags below are fixed by the program's account parsing.

pub(crate) struct InitializePoolAccounts {
    pub initializer: Pubkey,
    pub pool: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub lp_token_mint: Pubkey,
    pub pool_token_a: Pubkey,
    pub pool_token_b: Pubkey,
    pub pool_authority: Pubkey,
    pub token_program: Pubkey,
    pub associated_token_program: Pubkey,
    pub system_program: Pubkey,
    pub rent_sysvar: Pubkey,
}

impl From<InitializePoolAccounts> for Vec<AccountMeta> {
    fn from(accounts: InitializePoolAccounts) -> Self {
        vec![
            AccountMeta::new(accounts.initializer, true),
            AccountMeta::new(accounts.pool, false),
            AccountMeta::new_readonly(accounts.token_a_mint, false),
            AccountMeta::new_readonly(accounts.token_b_mint, false),
            AccountMeta::new(accounts.lp_token_mint, false),
            AccountMeta::new(accounts.pool_token_a, false),
            AccountMeta::new(accounts.pool_token_b, false),
            AccountMeta::new_readonly(accounts.pool_authority, false),
            // token program is passed once per mint
            AccountMeta::new_readonly(accounts.token_program, false),
            AccountMeta::new_readonly(accounts.token_program, false),
            AccountMeta::new_readonly(accounts.associated_token_program, false),
            AccountMeta::new_readonly(accounts.system_program, false),
            AccountMeta::new_readonly(accounts.rent_sysvar, false),
        ]
    }
}

/// Shared by add and remove liquidity
pub(crate) struct LiquidityAccounts {
    pub user: Pubkey,
    pub pool: Pubkey,
    pub pool_authority: Pubkey,
    pub user_token_a: Pubkey,
    pub user_token_b: Pubkey,
    pub pool_token_a: Pubkey,
    pub pool_token_b: Pubkey,
    pub lp_token_mint: Pubkey,
    pub user_lp_token: Pubkey,
    pub token_program: Pubkey,
    pub associated_token_program: Pubkey,
}

impl From<LiquidityAccounts> for Vec<AccountMeta> {
    fn from(accounts: LiquidityAccounts) -> Self {
        vec![
            AccountMeta::new_readonly(accounts.user, true),
            AccountMeta::new(accounts.pool, false),
            AccountMeta::new_readonly(accounts.pool_authority, false),
            AccountMeta::new(accounts.user_token_a, false),
            AccountMeta::new(accounts.user_token_b, false),
            AccountMeta::new(accounts.pool_token_a, false),
            AccountMeta::new(accounts.pool_token_b, false),
            AccountMeta::new(accounts.lp_token_mint, false),
            AccountMeta::new(accounts.user_lp_token, false),
            AccountMeta::new_readonly(accounts.token_program, false),
            AccountMeta::new_readonly(accounts.token_program, false),
            AccountMeta::new_readonly(accounts.associated_token_program, false),
        ]
    }
}

pub(crate) struct SwapAccounts {
    pub user: Pubkey,
    pub pool: Pubkey,
    pub pool_authority: Pubkey,
    pub user_input_token: Pubkey,
    pub user_output_token: Pubkey,
    pub pool_input_token: Pubkey,
    pub pool_output_token: Pubkey,
    pub token_program: Pubkey,
}

impl From<SwapAccounts> for Vec<AccountMeta> {
    fn from(accounts: SwapAccounts) -> Self {
        vec![
            AccountMeta::new_readonly(accounts.user, true),
            AccountMeta::new(accounts.pool, false),
            AccountMeta::new_readonly(accounts.pool_authority, false),
            AccountMeta::new(accounts.user_input_token, false),
            AccountMeta::new(accounts.user_output_token, false),
            AccountMeta::new(accounts.pool_input_token, false),
            AccountMeta::new(accounts.pool_output_token, false),
            AccountMeta::new_readonly(accounts.token_program, false),
            AccountMeta::new_readonly(accounts.token_program, false),
        ]
    }
}
