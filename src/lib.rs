//! # CPAMM SDK
//!
//! Client library for a constant-product AMM program on Solana. The SDK
//! never signs or submits anything; it provides:
//!
//! 1. **Address derivation**: pool, LP mint and pool authority program derived addresses
//! 2. **Instruction Functions (`_ix`)**: Return core instructions in the program's binary layout
//! 3. **Quotes**: swap output, fee and price impact computed off-chain
//!
//! ## 🚀 Quick Start
//!
//! ### Installation
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cpamm-sdk = "0.1.0"
//! ```
//!
//! ### Basic Setup
//!
//! ```rust,ignore
//! use cpamm_sdk::{AmmClient, AmmProgramConfig};
//! use solana_sdk::commitment_config::CommitmentLevel;
//!
//! // Devnet deployment; use AmmProgramConfig::load() to read a TOML file
//! let config = AmmProgramConfig::default();
//! let client = AmmClient::new("https://api.devnet.solana.com", CommitmentLevel::Confirmed, config);
//! ```
//!
//! ## ⚠️ Important: Mint Order
//!
//! **A pool is identified by its mints in creation order.** `(A, B)` and
//! `(B, A)` derive different addresses. Every builder takes `token_a_mint`
//! and `token_b_mint` in that order; swap direction is picked with `a_to_b`.
//!
//! ## 📖 Usage Patterns
//!
//! ### Deriving addresses
//!
//! ```rust
//! use cpamm_sdk::{AmmProgramConfig, PoolAddresses, USDC_MINT, WSOL_MINT};
//!
//! let config = AmmProgramConfig::default();
//! let addresses = PoolAddresses::derive(&config, &WSOL_MINT, &USDC_MINT).unwrap();
//! println!("pool {} (bump {})", addresses.pool.address, addresses.pool.bump);
//! ```
//!
//! ### Quoting a swap
//!
//! ```rust
//! use cpamm_sdk::{minimum_amount_out, quote_swap, DEFAULT_FEE_RATE_BPS};
//!
//! let amount_out = quote_swap(100_000, 1_000_000, 2_000_000, DEFAULT_FEE_RATE_BPS);
//! assert_eq!(amount_out, 181_322);
//!
//! // 0.5% slippage tolerance
//! let min_out = minimum_amount_out(amount_out, 50);
//! ```
//!
//! Against live reserves:
//!
//! ```rust,ignore
//! let quote = client.quote(&WSOL_MINT, &USDC_MINT, 1_000_000, true).await?;
//! println!("out {} fee {} impact {}%", quote.amount_out, quote.fee_amount, quote.price_impact_pct);
//! ```
//!
//! ### Building a swap
//!
//! ```rust,ignore
//! use cpamm_sdk::SwapParams;
//!
//! // Make sure the output token account exists first
//! let mut instructions = Vec::new();
//! if let Some(create) = client
//!     .create_associated_token_account_if_needed(&user, &user, &USDC_MINT)
//!     .await?
//! {
//!     instructions.push(create);
//! }
//!
//! instructions.push(client.swap_ix(&SwapParams {
//!     user,
//!     token_a_mint: WSOL_MINT,
//!     token_b_mint: USDC_MINT,
//!     amount_in: 1_000_000,
//!     minimum_amount_out: min_out,
//!     a_to_b: true,
//! })?);
//!
//! let tx = Transaction::new_signed_with_payer(&instructions, Some(&user), &[&keypair], recent_blockhash);
//! ```
//!
//! ## 🔧 API Reference
//!
//! ### AmmClient Methods
//!
//! #### Instruction Functions (`_ix`)
//!
//! - **`initialize_pool_ix(params)`** - Create a pool with a fee rate in basis points
//! - **`add_liquidity_ix(params)`** - Deposit both tokens, bounded by maximums
//! - **`remove_liquidity_ix(params)`** - Burn LP tokens, bounded by minimum outputs
//! - **`swap_ix(params)`** - Swap an exact input amount
//!
//! #### Chain Reads
//!
//! - **`fetch_pool(token_a_mint, token_b_mint)`** - Pool state, reserves and LP supply in one call
//! - **`quote(token_a_mint, token_b_mint, amount_in, a_to_b)`** - Quote against live reserves
//! - **`get_token_balance(owner, mint)`** - Associated account balance, 0 if missing
//! - **`get_token_info(mint)`** - Decimals from chain plus registry metadata
//! - **`create_associated_token_account_if_needed(payer, owner, mint)`**
//!
//! ## 🌐 Network Configuration
//!
//! Reads go through any [`AccountSource`]. `AmmClient::new` wraps an RPC
//! endpoint; [`AccountMap`] serves a cached or test snapshot. The program id
//! and seeds come from [`AmmProgramConfig`], loaded from the TOML file named
//! by `AMM_SDK_CONFIG`.

mod account_metas;
mod address;
mod client;
mod config;
mod constants;
mod error;
mod instruction;
mod math;
mod params;
mod pool;
mod source;
mod token;

pub use address::{DerivedAddress, PoolAddresses, associated_token_address, derive_address, validate_mint_pair};
pub use client::{AmmClient, AssociatedTokenAccount};
pub use config::{AmmProgramConfig, CONFIG_PATH_ENV};
pub use constants::*;
pub use error::AmmClientError;
pub use instruction::AmmInstruction;
pub use math::{
    SwapQuote, get_trade_fee, minimum_amount_out, quote_deposit_pair, quote_price_impact,
    quote_swap, quote_swap_detailed, quote_withdrawal,
};
pub use params::{AddLiquidityParams, InitializePoolParams, RemoveLiquidityParams, SwapParams};
pub use pool::{PoolSnapshot, PoolState, TokenAccountInfo};
pub use source::{AccountData, AccountMap, AccountSource};
pub use token::{
    TokenDescriptor, TokenRegistry, WELL_KNOWN_TOKENS, base_units_to_ui_amount,
    ui_amount_to_base_units,
};
