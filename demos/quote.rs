use anyhow::Result;
use cpamm_sdk::{
    AmmClient, AmmProgramConfig, CONFIG_PATH_ENV, DEFAULT_FEE_RATE_BPS, InitializePoolParams, SwapParams,
    TokenRegistry, USDC_MINT, WSOL_MINT, minimum_amount_out, quote_swap_detailed,
};
use rust_decimal::Decimal;
use solana_sdk::{commitment_config::CommitmentLevel, pubkey::Pubkey};

// Set RPC_URL to also quote against live reserves, AMM_SDK_CONFIG to target
// another deployment
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => AmmProgramConfig::load_from_path(path)?,
        Err(_) => AmmProgramConfig::default(),
    };
    let rpc_url = std::env::var("RPC_URL").ok();
    let client = AmmClient::new(
        rpc_url.as_deref().unwrap_or("https://api.devnet.solana.com"),
        CommitmentLevel::Confirmed,
        config,
    );

    let addresses = client.pool_addresses(&WSOL_MINT, &USDC_MINT)?;
    println!("Program:        {}", client.program_id());
    println!("Pool:           {} (bump {})", addresses.pool.address, addresses.pool.bump);
    println!(
        "LP mint:        {} (bump {})",
        addresses.lp_token_mint.address, addresses.lp_token_mint.bump
    );
    println!(
        "Authority:      {} (bump {})",
        addresses.authority.address, addresses.authority.bump
    );

    let registry = TokenRegistry::well_known();
    let sol = registry.get(&WSOL_MINT).cloned();
    let amount_in = sol
        .as_ref()
        .and_then(|token| token.to_base_units(Decimal::new(1, 1)))
        .unwrap_or(100_000_000);

    // Offline preview with fixed reserves
    let quote = quote_swap_detailed(amount_in, 1_000_000_000_000, 150_000_000_000, DEFAULT_FEE_RATE_BPS);
    let min_out = minimum_amount_out(quote.amount_out, 50);
    println!("\nOffline quote for {} lamports:", amount_in);
    println!("  amount out:   {}", quote.amount_out);
    println!("  fee:          {}", quote.fee_amount);
    println!("  price impact: {}%", quote.price_impact_pct.round_dp(4));
    println!("  min out 0.5%: {}", min_out);

    let user = Pubkey::new_unique();
    let init_ix = client.initialize_pool_ix(&InitializePoolParams::new(user, WSOL_MINT, USDC_MINT))?;
    let swap_ix = client.swap_ix(&SwapParams {
        user,
        token_a_mint: WSOL_MINT,
        token_b_mint: USDC_MINT,
        amount_in,
        minimum_amount_out: min_out,
        a_to_b: true,
    })?;
    println!("\nInitializePool: {} accounts, data {:?}", init_ix.accounts.len(), init_ix.data);
    println!("Swap:           {} accounts, data {:?}", swap_ix.accounts.len(), swap_ix.data);

    if rpc_url.is_some() {
        match client.quote(&WSOL_MINT, &USDC_MINT, amount_in, true).await {
            Ok(live) => println!(
                "\nLive quote: out {} fee {} impact {}%",
                live.amount_out,
                live.fee_amount,
                live.price_impact_pct.round_dp(4)
            ),
            Err(e) => log::warn!("Live quote unavailable: {:#}", e),
        }
    }

    Ok(())
}
