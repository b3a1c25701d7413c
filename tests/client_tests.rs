use assert_matches::assert_matches;
use cpamm_sdk::{
    AccountData, AccountMap, AddLiquidityParams, AmmClient, AmmClientError, AmmProgramConfig,
    InitializePoolParams, PoolAddresses, PoolState, RemoveLiquidityParams, SwapParams,
    TokenDescriptor, TokenRegistry, USDC_MINT, WSOL_MINT,
};
use rust_decimal::Decimal;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    program_option::COption,
    program_pack::Pack,
    pubkey::Pubkey,
    system_program, sysvar,
};
use spl_token::state::{Account as SplTokenAccount, AccountState, Mint as SplMint};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn token_account(mint: Pubkey, owner: Pubkey, amount: u64) -> AccountData {
    let mut data = vec![0u8; SplTokenAccount::LEN];
    SplTokenAccount::pack(
        SplTokenAccount {
            mint,
            owner,
            amount,
            delegate: COption::None,
            state: AccountState::Initialized,
            is_native: COption::None,
            delegated_amount: 0,
            close_authority: COption::None,
        },
        &mut data,
    )
    .unwrap();
    AccountData {
        data,
        owner: spl_token::ID,
    }
}

fn mint_account(authority: Pubkey, supply: u64, decimals: u8) -> AccountData {
    let mut data = vec![0u8; SplMint::LEN];
    SplMint::pack(
        SplMint {
            mint_authority: COption::Some(authority),
            supply,
            decimals,
            is_initialized: true,
            freeze_authority: COption::None,
        },
        &mut data,
    )
    .unwrap();
    AccountData {
        data,
        owner: spl_token::ID,
    }
}

fn pool_accounts(
    config: &AmmProgramConfig,
    token_a_mint: Pubkey,
    token_b_mint: Pubkey,
    reserves: (u64, u64),
    lp_supply: u64,
) -> (PoolAddresses, AccountMap) {
    let addresses = PoolAddresses::derive(config, &token_a_mint, &token_b_mint).unwrap();
    let authority = addresses.authority.address;

    let state = PoolState {
        is_initialized: true,
        token_a_mint,
        token_b_mint,
        lp_token_mint: addresses.lp_token_mint.address,
        fee_rate: 30,
        pool_bump: addresses.pool.bump,
        authority_bump: addresses.authority.bump,
        lp_token_bump: addresses.lp_token_mint.bump,
    };

    let mut accounts = AccountMap::new();
    accounts.insert(
        addresses.pool.address,
        AccountData {
            data: borsh::to_vec(&state).unwrap(),
            owner: config.program_id,
        },
    );
    accounts.insert(
        addresses.pool_token_a(config),
        token_account(token_a_mint, authority, reserves.0),
    );
    accounts.insert(
        addresses.pool_token_b(config),
        token_account(token_b_mint, authority, reserves.1),
    );
    accounts.insert(
        addresses.lp_token_mint.address,
        mint_account(authority, lp_supply, 9),
    );

    (addresses, accounts)
}

fn meta_flags(ix: &Instruction) -> Vec<(bool, bool)> {
    ix.accounts
        .iter()
        .map(|meta| (meta.is_signer, meta.is_writable))
        .collect()
}

fn keys(ix: &Instruction) -> Vec<Pubkey> {
    ix.accounts.iter().map(|meta| meta.pubkey).collect()
}

#[test]
fn test_initialize_pool_ix() {
    let config = AmmProgramConfig::default();
    let client = AmmClient::with_source(AccountMap::new(), config.clone());
    let initializer = Pubkey::new_unique();
    let addresses = PoolAddresses::derive(&config, &WSOL_MINT, &USDC_MINT).unwrap();

    let ix = client
        .initialize_pool_ix(&InitializePoolParams::new(initializer, WSOL_MINT, USDC_MINT))
        .unwrap();

    assert_eq!(ix.program_id, config.program_id);
    assert_eq!(ix.data, vec![0, 30, 0]);
    assert_eq!(
        keys(&ix),
        vec![
            initializer,
            addresses.pool.address,
            WSOL_MINT,
            USDC_MINT,
            addresses.lp_token_mint.address,
            addresses.pool_token_a(&config),
            addresses.pool_token_b(&config),
            addresses.authority.address,
            spl_token::ID,
            spl_token::ID,
            spl_associated_token_account::ID,
            system_program::ID,
            sysvar::rent::ID,
        ]
    );
    assert_eq!(ix.accounts[0], AccountMeta::new(initializer, true));
    assert_eq!(
        meta_flags(&ix)[1..].to_vec(),
        vec![
            (false, true),
            (false, false),
            (false, false),
            (false, true),
            (false, true),
            (false, true),
            (false, false),
            (false, false),
            (false, false),
            (false, false),
            (false, false),
            (false, false),
        ]
    );
}

#[test]
fn test_initialize_pool_rejects_bad_input() {
    let client = AmmClient::with_source(AccountMap::new(), AmmProgramConfig::default());
    let initializer = Pubkey::new_unique();

    let too_expensive = InitializePoolParams {
        fee_rate: 10_001,
        ..InitializePoolParams::new(initializer, WSOL_MINT, USDC_MINT)
    };
    assert_matches!(
        client.initialize_pool_ix(&too_expensive),
        Err(AmmClientError::InvalidFeeRate(10_001))
    );

    let full_fee = InitializePoolParams {
        fee_rate: 10_000,
        ..too_expensive
    };
    assert!(client.initialize_pool_ix(&full_fee).is_ok());

    assert_matches!(
        client.initialize_pool_ix(&InitializePoolParams::new(initializer, USDC_MINT, USDC_MINT)),
        Err(AmmClientError::InvalidMintPair(_))
    );
}

#[test]
fn test_swap_ix_follows_direction() {
    let config = AmmProgramConfig::default();
    let client = AmmClient::with_source(AccountMap::new(), config.clone());
    let user = Pubkey::new_unique();
    let addresses = client.pool_addresses(&WSOL_MINT, &USDC_MINT).unwrap();
    let authority = addresses.authority.address;

    let params = SwapParams {
        user,
        token_a_mint: WSOL_MINT,
        token_b_mint: USDC_MINT,
        amount_in: 100_000,
        minimum_amount_out: 180_415,
        a_to_b: true,
    };
    let ix = client.swap_ix(&params).unwrap();

    let mut expected_data = vec![3];
    expected_data.extend_from_slice(&100_000u64.to_le_bytes());
    expected_data.extend_from_slice(&180_415u64.to_le_bytes());
    expected_data.push(1);
    assert_eq!(ix.data, expected_data);

    assert_eq!(
        keys(&ix),
        vec![
            user,
            addresses.pool.address,
            authority,
            client.associated_token_address(&user, &WSOL_MINT),
            client.associated_token_address(&user, &USDC_MINT),
            addresses.pool_token_a(&config),
            addresses.pool_token_b(&config),
            spl_token::ID,
            spl_token::ID,
        ]
    );
    assert_eq!(
        meta_flags(&ix),
        vec![
            (true, false),
            (false, true),
            (false, false),
            (false, true),
            (false, true),
            (false, true),
            (false, true),
            (false, false),
            (false, false),
        ]
    );

    let reverse = client
        .swap_ix(&SwapParams {
            a_to_b: false,
            ..params
        })
        .unwrap();
    assert_eq!(reverse.data[17], 0);
    // same pool, input and output sides swapped
    assert_eq!(reverse.accounts[1].pubkey, addresses.pool.address);
    assert_eq!(reverse.accounts[3].pubkey, ix.accounts[4].pubkey);
    assert_eq!(reverse.accounts[4].pubkey, ix.accounts[3].pubkey);
    assert_eq!(reverse.accounts[5].pubkey, ix.accounts[6].pubkey);
    assert_eq!(reverse.accounts[6].pubkey, ix.accounts[5].pubkey);
}

#[test]
fn test_liquidity_ixs_share_account_layout() {
    let config = AmmProgramConfig::default();
    let client = AmmClient::with_source(AccountMap::new(), config.clone());
    let user = Pubkey::new_unique();
    let addresses = client.pool_addresses(&WSOL_MINT, &USDC_MINT).unwrap();
    let lp_mint = addresses.lp_token_mint.address;

    let add = client
        .add_liquidity_ix(&AddLiquidityParams {
            user,
            token_a_mint: WSOL_MINT,
            token_b_mint: USDC_MINT,
            max_token_a: 1_000,
            max_token_b: 2_000,
            min_lp_tokens: 50,
        })
        .unwrap();
    let remove = client
        .remove_liquidity_ix(&RemoveLiquidityParams {
            user,
            token_a_mint: WSOL_MINT,
            token_b_mint: USDC_MINT,
            lp_amount: 50,
            min_token_a: 900,
            min_token_b: 1_800,
        })
        .unwrap();

    assert_eq!(add.data.len(), 25);
    assert_eq!(add.data[0], 1);
    assert_eq!(&add.data[1..9], &1_000u64.to_le_bytes());
    assert_eq!(&add.data[17..25], &50u64.to_le_bytes());
    assert_eq!(remove.data.len(), 25);
    assert_eq!(remove.data[0], 2);
    assert_eq!(&remove.data[1..9], &50u64.to_le_bytes());

    let expected_keys = vec![
        user,
        addresses.pool.address,
        addresses.authority.address,
        client.associated_token_address(&user, &WSOL_MINT),
        client.associated_token_address(&user, &USDC_MINT),
        addresses.pool_token_a(&config),
        addresses.pool_token_b(&config),
        lp_mint,
        client.associated_token_address(&user, &lp_mint),
        spl_token::ID,
        spl_token::ID,
        spl_associated_token_account::ID,
    ];
    assert_eq!(keys(&add), expected_keys);
    assert_eq!(keys(&remove), expected_keys);
    assert_eq!(meta_flags(&add), meta_flags(&remove));
    assert_eq!(add.accounts[0], AccountMeta::new_readonly(user, true));
    assert!(add.accounts[3..9].iter().all(|meta| meta.is_writable && !meta.is_signer));
}

#[tokio::test]
async fn test_fetch_pool_and_quote() {
    init_logger();
    let config = AmmProgramConfig::default();
    let (addresses, accounts) =
        pool_accounts(&config, WSOL_MINT, USDC_MINT, (1_000_000, 2_000_000), 1_000);
    let client = AmmClient::with_source(accounts, config);

    assert!(client.pool_exists(&WSOL_MINT, &USDC_MINT).await.unwrap());
    assert!(!client.pool_exists(&USDC_MINT, &WSOL_MINT).await.unwrap());

    let snapshot = client.fetch_pool(&WSOL_MINT, &USDC_MINT).await.unwrap();
    assert_eq!(snapshot.address, addresses.pool.address);
    assert_eq!(snapshot.token_a_reserve, 1_000_000);
    assert_eq!(snapshot.token_b_reserve, 2_000_000);
    assert_eq!(snapshot.lp_token_supply, 1_000);
    assert_eq!(snapshot.fee_rate, 30);

    let quote = client.quote(&WSOL_MINT, &USDC_MINT, 100_000, true).await.unwrap();
    assert_eq!(quote.amount_out, 181_322);
    assert_eq!(quote.fee_amount, 300);
    assert_eq!(quote.amount_in_net, 99_700);
    assert_eq!(
        quote.price_impact_pct.round_dp(4),
        Decimal::from_str_exact("17.3328").unwrap()
    );

    let reverse = client.quote(&WSOL_MINT, &USDC_MINT, 100_000, false).await.unwrap();
    assert_eq!(reverse.amount_out, 47_482);
}

#[tokio::test]
async fn test_fetch_pool_reports_missing_accounts() {
    init_logger();
    let config = AmmProgramConfig::default();
    let client = AmmClient::with_source(AccountMap::new(), config.clone());
    let pool = client.pool_address(&WSOL_MINT, &USDC_MINT).unwrap().address;

    let err = client.fetch_pool(&WSOL_MINT, &USDC_MINT).await.unwrap_err();
    assert_matches!(
        err.downcast_ref::<AmmClientError>(),
        Some(AmmClientError::AccountNotFound(address)) if *address == pool
    );

    // pool present, reserve account missing
    let (addresses, mut accounts) =
        pool_accounts(&config, WSOL_MINT, USDC_MINT, (1_000_000, 2_000_000), 1_000);
    let reserve_b = addresses.pool_token_b(&config);
    accounts.remove(&reserve_b);
    let client = AmmClient::with_source(accounts, config);
    let err = client.fetch_pool(&WSOL_MINT, &USDC_MINT).await.unwrap_err();
    assert_matches!(
        err.downcast_ref::<AmmClientError>(),
        Some(AmmClientError::AccountNotFound(address)) if *address == reserve_b
    );
}

#[tokio::test]
async fn test_fetch_pool_rejects_mismatched_state() {
    let config = AmmProgramConfig::default();
    let (addresses, mut accounts) =
        pool_accounts(&config, WSOL_MINT, USDC_MINT, (1_000_000, 2_000_000), 1_000);

    let wrong = PoolState {
        is_initialized: true,
        token_a_mint: USDC_MINT,
        token_b_mint: WSOL_MINT,
        lp_token_mint: addresses.lp_token_mint.address,
        fee_rate: 30,
        pool_bump: addresses.pool.bump,
        authority_bump: addresses.authority.bump,
        lp_token_bump: addresses.lp_token_mint.bump,
    };
    accounts.insert(
        addresses.pool.address,
        AccountData {
            data: borsh::to_vec(&wrong).unwrap(),
            owner: config.program_id,
        },
    );

    let client = AmmClient::with_source(accounts, config);
    let err = client.fetch_pool(&WSOL_MINT, &USDC_MINT).await.unwrap_err();
    assert_matches!(
        err.downcast_ref::<AmmClientError>(),
        Some(AmmClientError::InvalidAccountData { .. })
    );
}

#[tokio::test]
async fn test_token_balances_tolerate_missing_accounts() {
    init_logger();
    let config = AmmProgramConfig::default();
    let owner = Pubkey::new_unique();
    let payer = Pubkey::new_unique();
    let usdc_account = spl_associated_token_account::get_associated_token_address(&owner, &USDC_MINT);

    let mut accounts = AccountMap::new();
    accounts.insert(usdc_account, token_account(USDC_MINT, owner, 42_000_000));
    let client = AmmClient::with_source(accounts, config);

    assert_eq!(client.get_token_balance(&owner, &USDC_MINT).await.unwrap(), 42_000_000);
    assert_eq!(client.get_token_balance(&owner, &WSOL_MINT).await.unwrap(), 0);

    let resolved = client
        .resolve_associated_token_account(&owner, &WSOL_MINT)
        .await
        .unwrap();
    assert!(!resolved.exists());
    assert_eq!(
        resolved.address,
        spl_associated_token_account::get_associated_token_address(&owner, &WSOL_MINT)
    );

    assert!(client
        .create_associated_token_account_if_needed(&payer, &owner, &USDC_MINT)
        .await
        .unwrap()
        .is_none());

    let create = client
        .create_associated_token_account_if_needed(&payer, &owner, &WSOL_MINT)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(create.program_id, spl_associated_token_account::ID);
    assert_eq!(create.accounts[0], AccountMeta::new(payer, true));
    assert_eq!(create.accounts[1].pubkey, resolved.address);

    let info = client.get_token_account(&usdc_account).await.unwrap();
    assert_eq!(info.owner, owner);
    let err = client.get_token_account(&resolved.address).await.unwrap_err();
    assert!(err
        .downcast_ref::<AmmClientError>()
        .is_some_and(AmmClientError::is_account_not_found));
}

#[tokio::test]
async fn test_get_token_info() {
    let unknown_mint = Pubkey::new_unique();
    let mut accounts = AccountMap::new();
    accounts.insert(USDC_MINT, mint_account(Pubkey::new_unique(), 1_000, 6));
    accounts.insert(unknown_mint, mint_account(Pubkey::new_unique(), 1_000, 3));
    let client = AmmClient::with_source(accounts, AmmProgramConfig::default());

    let usdc = client.get_token_info(&USDC_MINT).await.unwrap().unwrap();
    assert_eq!(usdc.symbol, "USDC");
    assert_eq!(usdc.decimals, 6);

    let unknown = client.get_token_info(&unknown_mint).await.unwrap().unwrap();
    assert_eq!(unknown, TokenDescriptor::unknown(unknown_mint, 3));

    assert_eq!(client.get_token_info(&WSOL_MINT).await.unwrap(), None);

    // registry overrides metadata, decimals still come from chain
    let client = client.with_token_registry(TokenRegistry::new([TokenDescriptor::new(
        unknown_mint,
        "TST",
        "Test Token",
        9,
    )]));
    let custom = client.get_token_info(&unknown_mint).await.unwrap().unwrap();
    assert_eq!(custom.symbol, "TST");
    assert_eq!(custom.decimals, 3);
}
