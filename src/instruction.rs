//! Instruction payloads understood by the AMM program
//!
//! Layout: one discriminator byte, then the variant's fields in declaration
//! order, little-endian and fixed width. No padding, no length prefixes.
//!
//! | variant          | tag | fields                                                  | len |
//! |------------------|-----|---------------------------------------------------------|-----|
//! | InitializePool   | 0   | fee_rate u16 @1                                         | 3   |
//! | AddLiquidity     | 1   | max_token_a u64 @1, max_token_b u64 @9, min_lp u64 @17  | 25  |
//! | RemoveLiquidity  | 2   | lp_amount u64 @1, min_token_a u64 @9, min_token_b @17   | 25  |
//! | Swap             | 3   | amount_in u64 @1, minimum_amount_out u64 @9, a_to_b @17 | 18  |

// ── Instruction Discriminators ──────────────────────────────────────────────

pub const IX_INITIALIZE_POOL: u8 = 0;
pub const IX_ADD_LIQUIDITY: u8 = 1;
pub const IX_REMOVE_LIQUIDITY: u8 = 2;
pub const IX_SWAP: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmInstruction {
    InitializePool {
        fee_rate: u16,
    },
    AddLiquidity {
        max_token_a: u64,
        max_token_b: u64,
        min_lp_tokens: u64,
    },
    RemoveLiquidity {
        lp_amount: u64,
        min_token_a: u64,
        min_token_b: u64,
    },
    Swap {
        amount_in: u64,
        minimum_amount_out: u64,
        a_to_b: bool,
    },
}

impl AmmInstruction {
    pub fn discriminator(&self) -> u8 {
        match self {
            AmmInstruction::InitializePool { .. } => IX_INITIALIZE_POOL,
            AmmInstruction::AddLiquidity { .. } => IX_ADD_LIQUIDITY,
            AmmInstruction::RemoveLiquidity { .. } => IX_REMOVE_LIQUIDITY,
            AmmInstruction::Swap { .. } => IX_SWAP,
        }
    }

    /// Encoded length in bytes, discriminator included
    pub fn packed_len(&self) -> usize {
        match self {
            AmmInstruction::InitializePool { .. } => 1 + 2,
            AmmInstruction::AddLiquidity { .. } | AmmInstruction::RemoveLiquidity { .. } => 1 + 8 * 3,
            AmmInstruction::Swap { .. } => 1 + 8 * 2 + 1,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.packed_len());
        data.push(self.discriminator());

        match *self {
            AmmInstruction::InitializePool { fee_rate } => {
                data.extend_from_slice(&fee_rate.to_le_bytes());
            }
            AmmInstruction::AddLiquidity {
                max_token_a,
                max_token_b,
                min_lp_tokens,
            } => {
                data.extend_from_slice(&max_token_a.to_le_bytes());
                data.extend_from_slice(&max_token_b.to_le_bytes());
                data.extend_from_slice(&min_lp_tokens.to_le_bytes());
            }
            AmmInstruction::RemoveLiquidity {
                lp_amount,
                min_token_a,
                min_token_b,
            } => {
                data.extend_from_slice(&lp_amount.to_le_bytes());
                data.extend_from_slice(&min_token_a.to_le_bytes());
                data.extend_from_slice(&min_token_b.to_le_bytes());
            }
            AmmInstruction::Swap {
                amount_in,
                minimum_amount_out,
                a_to_b,
            } => {
                data.extend_from_slice(&amount_in.to_le_bytes());
                data.extend_from_slice(&minimum_amount_out.to_le_bytes());
                data.push(a_to_b as u8);
            }
        }

        data
    }
}
