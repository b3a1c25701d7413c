//! Program derived address helpers
//!
//! Pool accounts are derived from a namespace seed followed by the raw bytes
//! of both mints, in pool-creation order:
//! - pool:      `["pool", mint_a, mint_b]`
//! - LP mint:   `["lp_token", mint_a, mint_b]`
//! - authority: `["authority", mint_a, mint_b]`

use solana_sdk::pubkey::{Pubkey, PubkeyError};

use crate::{
    config::AmmProgramConfig,
    constants::{MAX_SEED_LEN, MAX_SEEDS},
    error::AmmClientError,
};

/// Address plus the bump that took it off the ed25519 curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub bump: u8,
}

impl From<DerivedAddress> for (Pubkey, u8) {
    fn from(derived: DerivedAddress) -> Self {
        (derived.address, derived.bump)
    }
}

/// Derive a program address from `seeds`, searching bumps from 255 down to 0.
///
/// The first bump producing an off-curve address is the canonical bump, the
/// same one `Pubkey::find_program_address` picks and the program checks.
pub fn derive_address(
    program_id: &Pubkey,
    seeds: &[&[u8]],
) -> Result<DerivedAddress, AmmClientError> {
    // one slot is reserved for the bump
    if seeds.len() >= MAX_SEEDS {
        return Err(AmmClientError::InvalidSeeds(format!(
            "{} seeds given, at most {} allowed",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    if let Some(seed) = seeds.iter().find(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(AmmClientError::InvalidSeeds(format!(
            "seed of {} bytes exceeds {} bytes",
            seed.len(),
            MAX_SEED_LEN
        )));
    }

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut seeds_with_bump = seeds.to_vec();
        seeds_with_bump.push(&bump_seed);

        match Pubkey::create_program_address(&seeds_with_bump, program_id) {
            Ok(address) => return Ok(DerivedAddress { address, bump }),
            Err(PubkeyError::InvalidSeeds) => continue,
            Err(err) => return Err(AmmClientError::InvalidSeeds(err.to_string())),
        }
    }

    Err(AmmClientError::DerivationExhausted)
}

/// Reject a pair made of the same mint twice
pub fn validate_mint_pair(token_a_mint: &Pubkey, token_b_mint: &Pubkey) -> Result<(), AmmClientError> {
    if token_a_mint == token_b_mint {
        return Err(AmmClientError::InvalidMintPair(*token_a_mint));
    }
    Ok(())
}

/// The three program derived addresses of one pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolAddresses {
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub pool: DerivedAddress,
    pub lp_token_mint: DerivedAddress,
    pub authority: DerivedAddress,
}

impl PoolAddresses {
    pub fn derive(
        config: &AmmProgramConfig,
        token_a_mint: &Pubkey,
        token_b_mint: &Pubkey,
    ) -> Result<Self, AmmClientError> {
        validate_mint_pair(token_a_mint, token_b_mint)?;

        Ok(Self {
            token_a_mint: *token_a_mint,
            token_b_mint: *token_b_mint,
            pool: derive_pool_address(config, token_a_mint, token_b_mint)?,
            lp_token_mint: derive_lp_token_mint(config, token_a_mint, token_b_mint)?,
            authority: derive_pool_authority(config, token_a_mint, token_b_mint)?,
        })
    }

    /// Pool-owned token account holding mint A
    pub fn pool_token_a(&self, config: &AmmProgramConfig) -> Pubkey {
        associated_token_address(config, &self.authority.address, &self.token_a_mint)
    }

    /// Pool-owned token account holding mint B
    pub fn pool_token_b(&self, config: &AmmProgramConfig) -> Pubkey {
        associated_token_address(config, &self.authority.address, &self.token_b_mint)
    }
}

pub(crate) fn derive_pool_address(
    config: &AmmProgramConfig,
    token_a_mint: &Pubkey,
    token_b_mint: &Pubkey,
) -> Result<DerivedAddress, AmmClientError> {
    derive_pair_address(config, &config.pool_seed, token_a_mint, token_b_mint)
}

pub(crate) fn derive_lp_token_mint(
    config: &AmmProgramConfig,
    token_a_mint: &Pubkey,
    token_b_mint: &Pubkey,
) -> Result<DerivedAddress, AmmClientError> {
    derive_pair_address(config, &config.lp_token_seed, token_a_mint, token_b_mint)
}

pub(crate) fn derive_pool_authority(
    config: &AmmProgramConfig,
    token_a_mint: &Pubkey,
    token_b_mint: &Pubkey,
) -> Result<DerivedAddress, AmmClientError> {
    derive_pair_address(config, &config.authority_seed, token_a_mint, token_b_mint)
}

fn derive_pair_address(
    config: &AmmProgramConfig,
    namespace: &[u8],
    token_a_mint: &Pubkey,
    token_b_mint: &Pubkey,
) -> Result<DerivedAddress, AmmClientError> {
    derive_address(
        &config.program_id,
        &[namespace, token_a_mint.as_ref(), token_b_mint.as_ref()],
    )
}

/// Associated token account of `owner` for `mint`; owners may be off-curve
/// (the pool authority owns the pool's token accounts)
pub fn associated_token_address(config: &AmmProgramConfig, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[owner.as_ref(), config.token_program.as_ref(), mint.as_ref()],
        &config.associated_token_program,
    )
    .0
}
