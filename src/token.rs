//! Static token metadata and amount scaling

use std::{collections::HashMap, str::FromStr};

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::constants::{MSOL_MINT, STSOL_MINT, USDC_MINT, WSOL_MINT};

pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";
pub const UNKNOWN_NAME: &str = "Unknown Token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDescriptor {
    #[serde(with = "pubkey_string")]
    pub mint: Pubkey,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(default, rename = "logoURI", skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
}

impl TokenDescriptor {
    pub fn new(mint: Pubkey, symbol: &str, name: &str, decimals: u8) -> Self {
        Self {
            mint,
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals,
            logo_uri: None,
        }
    }

    /// Placeholder for a mint with no registry entry
    pub fn unknown(mint: Pubkey, decimals: u8) -> Self {
        Self::new(mint, UNKNOWN_SYMBOL, UNKNOWN_NAME, decimals)
    }

    pub fn to_base_units(&self, ui_amount: Decimal) -> Option<u64> {
        ui_amount_to_base_units(ui_amount, self.decimals)
    }

    pub fn to_ui_amount(&self, amount: u64) -> Decimal {
        base_units_to_ui_amount(amount, self.decimals)
    }
}

const TOKEN_LIST_LOGO_BASE: &str =
    "https://raw.githubusercontent.com/solana-labs/token-list/main/assets/mainnet";

lazy_static! {
    pub static ref WELL_KNOWN_TOKENS: Vec<TokenDescriptor> = vec![
        TokenDescriptor {
            logo_uri: Some(format!("{}/{}/logo.png", TOKEN_LIST_LOGO_BASE, WSOL_MINT)),
            ..TokenDescriptor::new(WSOL_MINT, "SOL", "Solana", 9)
        },
        TokenDescriptor {
            logo_uri: Some(format!("{}/{}/logo.png", TOKEN_LIST_LOGO_BASE, USDC_MINT)),
            ..TokenDescriptor::new(USDC_MINT, "USDC", "USD Coin", 6)
        },
        TokenDescriptor::new(MSOL_MINT, "mSOL", "Marinade Staked SOL", 9),
        TokenDescriptor::new(STSOL_MINT, "stSOL", "Lido Staked SOL", 9),
    ];
}

/// Lookup table of token metadata keyed by mint
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: HashMap<Pubkey, TokenDescriptor>,
}

impl TokenRegistry {
    pub fn new(tokens: impl IntoIterator<Item = TokenDescriptor>) -> Self {
        Self {
            tokens: tokens
                .into_iter()
                .map(|token| (token.mint, token))
                .collect(),
        }
    }

    pub fn well_known() -> Self {
        Self::new(WELL_KNOWN_TOKENS.iter().cloned())
    }

    /// Parse a JSON array of token descriptors (token-list field names)
    pub fn from_json(json: &str) -> Result<Self> {
        let tokens: Vec<TokenDescriptor> =
            serde_json::from_str(json).context("Failed to parse token list JSON")?;
        Ok(Self::new(tokens))
    }

    /// Later entries replace earlier ones with the same mint
    pub fn insert(&mut self, token: TokenDescriptor) -> Option<TokenDescriptor> {
        self.tokens.insert(token.mint, token)
    }

    pub fn get(&self, mint: &Pubkey) -> Option<&TokenDescriptor> {
        self.tokens.get(mint)
    }

    pub fn find_by_symbol(&self, symbol: &str) -> Option<&TokenDescriptor> {
        self.tokens
            .values()
            .find(|token| token.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenDescriptor> {
        self.tokens.values()
    }
}

/// Scale a UI amount to base units, truncating sub-unit dust.
/// `None` for negative amounts or amounts that do not fit in `u64`.
pub fn ui_amount_to_base_units(ui_amount: Decimal, decimals: u8) -> Option<u64> {
    if ui_amount.is_sign_negative() {
        return None;
    }
    let scale = Decimal::from_i128(10i128.checked_pow(u32::from(decimals))?)?;
    ui_amount
        .checked_mul(scale)?
        .round_dp_with_strategy(0, RoundingStrategy::ToZero)
        .to_u64()
}

pub fn base_units_to_ui_amount(amount: u64, decimals: u8) -> Decimal {
    // Decimal supports at most 28 fractional digits
    let scale = u32::from(decimals).min(28);
    Decimal::from_i128_with_scale(i128::from(amount), scale).normalize()
}

mod pubkey_string {
    use super::*;
    use serde::{Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(pubkey: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&pubkey.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let value = String::deserialize(deserializer)?;
        Pubkey::from_str(&value).map_err(D::Error::custom)
    }
}
