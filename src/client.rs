use anyhow::{Context, Result};
use solana_rpc_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};

use crate::{
    account_metas::{InitializePoolAccounts, LiquidityAccounts, SwapAccounts},
    address::{
        DerivedAddress, PoolAddresses, associated_token_address, derive_lp_token_mint,
        derive_pool_address, derive_pool_authority, validate_mint_pair,
    },
    config::AmmProgramConfig,
    constants::BPS_DENOMINATOR,
    error::AmmClientError,
    instruction::AmmInstruction,
    math::SwapQuote,
    params::{AddLiquidityParams, InitializePoolParams, RemoveLiquidityParams, SwapParams},
    pool::{PoolSnapshot, TokenAccountInfo, parse_mint, parse_token_account},
    source::{AccountSource, fetch_required},
    token::{TokenDescriptor, TokenRegistry},
};

/// Associated token account address together with its on-chain state, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssociatedTokenAccount {
    pub address: Pubkey,
    pub account: Option<TokenAccountInfo>,
}

impl AssociatedTokenAccount {
    pub fn exists(&self) -> bool {
        self.account.is_some()
    }

    /// Balance, treating a missing account as empty
    pub fn balance(&self) -> u64 {
        self.account.map(|account| account.amount).unwrap_or(0)
    }
}

/// Client for the constant-product AMM program.
///
/// Instruction builders and address helpers are pure. Only the `get_*`,
/// `fetch_*` and `quote` methods read from the ledger, through `S`.
pub struct AmmClient<S = RpcClient> {
    source: S,
    config: AmmProgramConfig,
    token_registry: TokenRegistry,
}

impl AmmClient<RpcClient> {
    /// Create a client reading through an RPC endpoint
    pub fn new(rpc_endpoint: &str, commitment_level: CommitmentLevel, config: AmmProgramConfig) -> Self {
        let commitment_config = CommitmentConfig {
            commitment: commitment_level,
        };

        Self::with_source(
            RpcClient::new_with_commitment(rpc_endpoint.to_string(), commitment_config),
            config,
        )
    }
}

impl<S: AccountSource> AmmClient<S> {
    pub fn with_source(source: S, config: AmmProgramConfig) -> Self {
        Self {
            source,
            config,
            token_registry: TokenRegistry::well_known(),
        }
    }

    pub fn with_token_registry(mut self, token_registry: TokenRegistry) -> Self {
        self.token_registry = token_registry;
        self
    }

    pub fn config(&self) -> &AmmProgramConfig {
        &self.config
    }

    pub fn program_id(&self) -> Pubkey {
        self.config.program_id
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn token_registry(&self) -> &TokenRegistry {
        &self.token_registry
    }

    // ADDRESSES

    /// Pool, LP mint and authority addresses for a mint pair
    pub fn pool_addresses(
        &self,
        token_a_mint: &Pubkey,
        token_b_mint: &Pubkey,
    ) -> Result<PoolAddresses, AmmClientError> {
        PoolAddresses::derive(&self.config, token_a_mint, token_b_mint)
    }

    pub fn pool_address(
        &self,
        token_a_mint: &Pubkey,
        token_b_mint: &Pubkey,
    ) -> Result<DerivedAddress, AmmClientError> {
        validate_mint_pair(token_a_mint, token_b_mint)?;
        derive_pool_address(&self.config, token_a_mint, token_b_mint)
    }

    pub fn lp_token_mint_address(
        &self,
        token_a_mint: &Pubkey,
        token_b_mint: &Pubkey,
    ) -> Result<DerivedAddress, AmmClientError> {
        validate_mint_pair(token_a_mint, token_b_mint)?;
        derive_lp_token_mint(&self.config, token_a_mint, token_b_mint)
    }

    pub fn pool_authority_address(
        &self,
        token_a_mint: &Pubkey,
        token_b_mint: &Pubkey,
    ) -> Result<DerivedAddress, AmmClientError> {
        validate_mint_pair(token_a_mint, token_b_mint)?;
        derive_pool_authority(&self.config, token_a_mint, token_b_mint)
    }

    pub fn associated_token_address(&self, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        associated_token_address(&self.config, owner, mint)
    }

    // INSTRUCTIONS

    /// Create an initialize pool instruction
    ///
    /// # Arguments
    /// * `params` - initializer, mint pair and fee rate in basis points
    ///
    /// # Returns
    /// Returns an `Instruction` ready to be added to a transaction
    pub fn initialize_pool_ix(&self, params: &InitializePoolParams) -> Result<Instruction, AmmClientError> {
        if u64::from(params.fee_rate) > BPS_DENOMINATOR {
            return Err(AmmClientError::InvalidFeeRate(params.fee_rate));
        }

        let addresses = self.pool_addresses(&params.token_a_mint, &params.token_b_mint)?;

        let data = AmmInstruction::InitializePool {
            fee_rate: params.fee_rate,
        }
        .encode();

        Ok(self.build_instruction(
            InitializePoolAccounts {
                initializer: params.initializer,
                pool: addresses.pool.address,
                token_a_mint: params.token_a_mint,
                token_b_mint: params.token_b_mint,
                lp_token_mint: addresses.lp_token_mint.address,
                pool_token_a: addresses.pool_token_a(&self.config),
                pool_token_b: addresses.pool_token_b(&self.config),
                pool_authority: addresses.authority.address,
                token_program: self.config.token_program,
                associated_token_program: self.config.associated_token_program,
                system_program: system_program::ID,
                rent_sysvar: sysvar::rent::ID,
            }
            .into(),
            data,
        ))
    }

    /// Create an add liquidity instruction
    ///
    /// The user's LP token account must exist before the program mints into
    /// it; see [`Self::create_associated_token_account_if_needed`].
    pub fn add_liquidity_ix(&self, params: &AddLiquidityParams) -> Result<Instruction, AmmClientError> {
        let data = AmmInstruction::AddLiquidity {
            max_token_a: params.max_token_a,
            max_token_b: params.max_token_b,
            min_lp_tokens: params.min_lp_tokens,
        }
        .encode();

        let accounts =
            self.liquidity_accounts(&params.user, &params.token_a_mint, &params.token_b_mint)?;

        Ok(self.build_instruction(accounts.into(), data))
    }

    /// Create a remove liquidity instruction
    pub fn remove_liquidity_ix(&self, params: &RemoveLiquidityParams) -> Result<Instruction, AmmClientError> {
        let data = AmmInstruction::RemoveLiquidity {
            lp_amount: params.lp_amount,
            min_token_a: params.min_token_a,
            min_token_b: params.min_token_b,
        }
        .encode();

        let accounts =
            self.liquidity_accounts(&params.user, &params.token_a_mint, &params.token_b_mint)?;

        Ok(self.build_instruction(accounts.into(), data))
    }

    /// Create a swap instruction
    ///
    /// `a_to_b` selects which side of the pair is sold; the mints themselves
    /// must still be given in pool-creation order.
    pub fn swap_ix(&self, params: &SwapParams) -> Result<Instruction, AmmClientError> {
        let addresses = self.pool_addresses(&params.token_a_mint, &params.token_b_mint)?;
        let authority = addresses.authority.address;
        let input_mint = params.input_mint();
        let output_mint = params.output_mint();

        let data = AmmInstruction::Swap {
            amount_in: params.amount_in,
            minimum_amount_out: params.minimum_amount_out,
            a_to_b: params.a_to_b,
        }
        .encode();

        Ok(self.build_instruction(
            SwapAccounts {
                user: params.user,
                pool: addresses.pool.address,
                pool_authority: authority,
                user_input_token: self.associated_token_address(&params.user, &input_mint),
                user_output_token: self.associated_token_address(&params.user, &output_mint),
                pool_input_token: self.associated_token_address(&authority, &input_mint),
                pool_output_token: self.associated_token_address(&authority, &output_mint),
                token_program: self.config.token_program,
            }
            .into(),
            data,
        ))
    }

    fn liquidity_accounts(
        &self,
        user: &Pubkey,
        token_a_mint: &Pubkey,
        token_b_mint: &Pubkey,
    ) -> Result<LiquidityAccounts, AmmClientError> {
        let addresses = self.pool_addresses(token_a_mint, token_b_mint)?;
        let lp_token_mint = addresses.lp_token_mint.address;

        Ok(LiquidityAccounts {
            user: *user,
            pool: addresses.pool.address,
            pool_authority: addresses.authority.address,
            user_token_a: self.associated_token_address(user, token_a_mint),
            user_token_b: self.associated_token_address(user, token_b_mint),
            pool_token_a: addresses.pool_token_a(&self.config),
            pool_token_b: addresses.pool_token_b(&self.config),
            lp_token_mint,
            user_lp_token: self.associated_token_address(user, &lp_token_mint),
            token_program: self.config.token_program,
            associated_token_program: self.config.associated_token_program,
        })
    }

    fn build_instruction(&self, accounts: Vec<AccountMeta>, data: Vec<u8>) -> Instruction {
        Instruction {
            program_id: self.config.program_id,
            accounts,
            data,
        }
    }

    // READS

    /// Fetch and parse a token account; a missing account is `AccountNotFound`
    pub async fn get_token_account(&self, address: &Pubkey) -> Result<TokenAccountInfo> {
        let account = fetch_required(&self.source, address).await?;
        Ok(parse_token_account(&account, address)?)
    }

    /// Resolve `owner`'s associated account for `mint`. A missing account is
    /// reported through `account: None`, not as an error.
    pub async fn resolve_associated_token_account(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> Result<AssociatedTokenAccount> {
        let address = self.associated_token_address(owner, mint);
        let account = self
            .source
            .get_account(&address)
            .await
            .with_context(|| format!("Failed to fetch token account {}", address))?;

        let account = match account {
            Some(account) => Some(parse_token_account(&account, &address)?),
            None => {
                log::debug!("Associated token account {} for {} does not exist yet", address, owner);
                None
            }
        };

        Ok(AssociatedTokenAccount { address, account })
    }

    /// Instruction creating `owner`'s associated account for `mint`, or `None`
    /// when it already exists
    pub async fn create_associated_token_account_if_needed(
        &self,
        payer: &Pubkey,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> Result<Option<Instruction>> {
        let associated = self.resolve_associated_token_account(owner, mint).await?;
        if associated.exists() {
            return Ok(None);
        }

        Ok(Some(
            spl_associated_token_account::instruction::create_associated_token_account_idempotent(
                payer,
                owner,
                mint,
                &self.config.token_program,
            ),
        ))
    }

    /// Balance of `owner`'s associated account for `mint`, 0 if it does not exist
    pub async fn get_token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<u64> {
        Ok(self.resolve_associated_token_account(owner, mint).await?.balance())
    }

    /// Descriptor for `mint` using on-chain decimals and registry metadata.
    /// `None` when the mint account does not exist.
    pub async fn get_token_info(&self, mint: &Pubkey) -> Result<Option<TokenDescriptor>> {
        let Some(account) = self
            .source
            .get_account(mint)
            .await
            .with_context(|| format!("Failed to fetch mint {}", mint))?
        else {
            return Ok(None);
        };

        let (decimals, _) = parse_mint(&account, mint)?;

        let descriptor = match self.token_registry.get(mint) {
            Some(known) => TokenDescriptor {
                decimals,
                ..known.clone()
            },
            None => TokenDescriptor::unknown(*mint, decimals),
        };

        Ok(Some(descriptor))
    }

    /// Fetch the pool account together with its reserves and LP supply in a
    /// single round trip
    pub async fn fetch_pool(&self, token_a_mint: &Pubkey, token_b_mint: &Pubkey) -> Result<PoolSnapshot> {
        let addresses = self.pool_addresses(token_a_mint, token_b_mint)?;
        let pool_token_a = addresses.pool_token_a(&self.config);
        let pool_token_b = addresses.pool_token_b(&self.config);

        let keys = [
            addresses.pool.address,
            pool_token_a,
            pool_token_b,
            addresses.lp_token_mint.address,
        ];
        let accounts = self
            .source
            .get_multiple_accounts(&keys)
            .await
            .context("Failed to fetch pool accounts")?;

        if accounts.len() != keys.len() {
            anyhow::bail!(
                "Expected {} pool accounts, received {}",
                keys.len(),
                accounts.len()
            );
        }

        let mut found = Vec::with_capacity(keys.len());
        for (key, account) in keys.iter().zip(accounts) {
            found.push(account.ok_or(AmmClientError::AccountNotFound(*key))?);
        }

        let snapshot = PoolSnapshot::from_accounts(
            &addresses,
            pool_token_a,
            pool_token_b,
            &found[0],
            &found[1],
            &found[2],
            &found[3],
        )?;

        log::debug!(
            "Loaded pool {}: reserves {} / {}, lp supply {}, fee {} bps",
            snapshot.address,
            snapshot.token_a_reserve,
            snapshot.token_b_reserve,
            snapshot.lp_token_supply,
            snapshot.fee_rate
        );

        Ok(snapshot)
    }

    /// Whether the pool for the pair has been created
    pub async fn pool_exists(&self, token_a_mint: &Pubkey, token_b_mint: &Pubkey) -> Result<bool> {
        let pool = self.pool_address(token_a_mint, token_b_mint)?;
        Ok(self
            .source
            .get_account(&pool.address)
            .await
            .context("Failed to fetch pool account")?
            .is_some())
    }

    /// Get a quote for a swap against live reserves
    ///
    /// # Arguments
    /// * `token_a_mint` / `token_b_mint` - The pair in pool-creation order
    /// * `amount_in` - The amount of input tokens
    /// * `a_to_b` - Whether token A is sold for token B
    ///
    /// # Returns
    /// Returns a `SwapQuote` with the expected output, fee and price impact
    pub async fn quote(
        &self,
        token_a_mint: &Pubkey,
        token_b_mint: &Pubkey,
        amount_in: u64,
        a_to_b: bool,
    ) -> Result<SwapQuote> {
        let snapshot = self.fetch_pool(token_a_mint, token_b_mint).await?;

        if snapshot.token_a_reserve == 0 || snapshot.token_b_reserve == 0 {
            log::warn!("Pool {} has no liquidity yet, quoting zero", snapshot.address);
        }

        Ok(snapshot.quote(amount_in, a_to_b))
    }
}
