use solana_sdk::{pubkey, pubkey::Pubkey};

/// AMM program deployed on devnet
pub const AMM_PROGRAM_ID: Pubkey = pubkey!("pDPr3yM12LyCwU9kN8DqgqF1C56Gf9VH5xU4dE4f8Bs");

pub const WSOL_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");
pub const USDC_MINT: Pubkey = pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");
pub const MSOL_MINT: Pubkey = pubkey!("mSoLzYCxHdYgdzU16g5QSh3i5K3z3KZK7ytfqcJm7So");
pub const STSOL_MINT: Pubkey = pubkey!("7dHbWXmci3dT8UFYWYZweBLXgycu7Y3iL6trKn1Y7ARj");

// SEEDS
pub const POOL_SEED: &[u8] = b"pool";
pub const LP_TOKEN_SEED: &[u8] = b"lp_token";
pub const AUTHORITY_SEED: &[u8] = b"authority";

pub const BPS_DENOMINATOR: u64 = 10_000; // 100% in basis points
pub const DEFAULT_FEE_RATE_BPS: u16 = 30; // 0.3%

// runtime limits for program derived addresses
pub const MAX_SEEDS: usize = 16;
pub const MAX_SEED_LEN: usize = 32;
