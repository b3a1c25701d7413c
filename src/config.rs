//! Program deployment configuration
//!
//! Every derivation and instruction builder takes its program id and seed
//! prefixes from an [`AmmProgramConfig`] value, so devnet, localnet and
//! mainnet deployments can be addressed side by side in one process.

use std::{path::Path, str::FromStr};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::constants::{AMM_PROGRAM_ID, AUTHORITY_SEED, LP_TOKEN_SEED, POOL_SEED};

/// Environment variable consulted by [`AmmProgramConfig::load`]
pub const CONFIG_PATH_ENV: &str = "AMM_SDK_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmmProgramConfig {
    pub program_id: Pubkey,
    pub pool_seed: Vec<u8>,
    pub lp_token_seed: Vec<u8>,
    pub authority_seed: Vec<u8>,
    pub token_program: Pubkey,
    pub associated_token_program: Pubkey,
}

impl Default for AmmProgramConfig {
    fn default() -> Self {
        Self::with_program_id(AMM_PROGRAM_ID)
    }
}

impl AmmProgramConfig {
    /// Standard seeds and SPL programs for a deployment at `program_id`
    pub fn with_program_id(program_id: Pubkey) -> Self {
        Self {
            program_id,
            pool_seed: POOL_SEED.to_vec(),
            lp_token_seed: LP_TOKEN_SEED.to_vec(),
            authority_seed: AUTHORITY_SEED.to_vec(),
            token_program: spl_token::ID,
            associated_token_program: spl_associated_token_account::ID,
        }
    }

    /// Load configuration from the TOML file named by `AMM_SDK_CONFIG`,
    /// falling back to `amm-sdk.toml` in the working directory
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "amm-sdk.toml".to_string());
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml_str(&config_str)?;

        log::debug!(
            "Loaded AMM config from {} (program {})",
            path.display(),
            config.program_id
        );
        Ok(config)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(config_str).context("Failed to parse config TOML")?;
        file.try_into()
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(&ConfigFile::from(self)).context("Failed to serialize config")
    }
}

/// On-disk shape: addresses as base58 strings, seeds as UTF-8 strings.
/// Anything left out takes the standard value.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    program_id: Option<String>,
    pool_seed: Option<String>,
    lp_token_seed: Option<String>,
    authority_seed: Option<String>,
    token_program: Option<String>,
    associated_token_program: Option<String>,
}

impl TryFrom<ConfigFile> for AmmProgramConfig {
    type Error = anyhow::Error;

    fn try_from(file: ConfigFile) -> Result<Self> {
        let mut config = AmmProgramConfig::default();

        if let Some(program_id) = file.program_id {
            config.program_id = parse_pubkey("program_id", &program_id)?;
        }
        if let Some(token_program) = file.token_program {
            config.token_program = parse_pubkey("token_program", &token_program)?;
        }
        if let Some(associated_token_program) = file.associated_token_program {
            config.associated_token_program =
                parse_pubkey("associated_token_program", &associated_token_program)?;
        }
        if let Some(seed) = file.pool_seed {
            config.pool_seed = seed.into_bytes();
        }
        if let Some(seed) = file.lp_token_seed {
            config.lp_token_seed = seed.into_bytes();
        }
        if let Some(seed) = file.authority_seed {
            config.authority_seed = seed.into_bytes();
        }

        if config.pool_seed == config.lp_token_seed
            || config.pool_seed == config.authority_seed
            || config.lp_token_seed == config.authority_seed
        {
            anyhow::bail!("Seed prefixes must be distinct");
        }

        Ok(config)
    }
}

impl From<&AmmProgramConfig> for ConfigFile {
    fn from(config: &AmmProgramConfig) -> Self {
        Self {
            program_id: Some(config.program_id.to_string()),
            pool_seed: Some(String::from_utf8_lossy(&config.pool_seed).into_owned()),
            lp_token_seed: Some(String::from_utf8_lossy(&config.lp_token_seed).into_owned()),
            authority_seed: Some(String::from_utf8_lossy(&config.authority_seed).into_owned()),
            token_program: Some(config.token_program.to_string()),
            associated_token_program: Some(config.associated_token_program.to_string()),
        }
    }
}

fn parse_pubkey(field: &str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value).with_context(|| format!("Invalid pubkey for {}: {}", field, value))
}
