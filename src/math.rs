//! Constant-product swap math mirrored from the program
//!
//! Every integer division floors, so a quote never promises more than the
//! program will pay out. Intermediates are widened to `u128`.

use rust_decimal::Decimal;

use crate::constants::BPS_DENOMINATOR;

/// Breakdown of a single exact-in swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    pub amount_in: u64,
    pub fee_amount: u64,
    pub amount_in_net: u64,
    pub amount_out: u64,
    /// Percentage, e.g. `1.5` means 1.5%
    pub price_impact_pct: Decimal,
}

/// Fee charged up front on `amount_in`
pub fn get_trade_fee(amount_in: u64, fee_rate_bps: u16) -> u64 {
    let fee = u128::from(amount_in) * u128::from(fee_rate_bps) / u128::from(BPS_DENOMINATOR);
    // fee rates above 100% cap at the whole input
    fee.min(u128::from(amount_in)) as u64
}

/// Output of swapping `amount_in` against `(reserve_in, reserve_out)`.
///
/// An empty side or a zero input is a valid pre-liquidity state and quotes 0.
pub fn quote_swap(amount_in: u64, reserve_in: u64, reserve_out: u64, fee_rate_bps: u16) -> u64 {
    if amount_in == 0 || reserve_in == 0 || reserve_out == 0 {
        return 0;
    }

    let amount_in_net = amount_in - get_trade_fee(amount_in, fee_rate_bps);
    swap_base_input_without_fees(amount_in_net, reserve_in, reserve_out)
}

fn swap_base_input_without_fees(amount_in_net: u64, reserve_in: u64, reserve_out: u64) -> u64 {
    // (x + dx) * (y - dy) = x * y  =>  dy = dx * y / (x + dx)
    let numerator = u128::from(amount_in_net) * u128::from(reserve_out);
    let denominator = u128::from(reserve_in) + u128::from(amount_in_net);
    if denominator == 0 {
        return 0;
    }
    // bounded by reserve_out
    (numerator / denominator) as u64
}

/// Relative move of the out/in price caused by the swap, in percent.
///
/// Uses the output from [`quote_swap`] so both numbers describe the same trade.
pub fn quote_price_impact(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_rate_bps: u16,
) -> Decimal {
    let amount_out = quote_swap(amount_in, reserve_in, reserve_out, fee_rate_bps);
    price_impact_for(amount_in, amount_out, reserve_in, reserve_out)
}

fn price_impact_for(amount_in: u64, amount_out: u64, reserve_in: u64, reserve_out: u64) -> Decimal {
    if amount_in == 0 || reserve_in == 0 || reserve_out == 0 {
        return Decimal::ZERO;
    }

    let pre_price = Decimal::from(reserve_out) / Decimal::from(reserve_in);
    let post_reserve_in = Decimal::from(reserve_in) + Decimal::from(amount_in);
    let post_reserve_out = Decimal::from(reserve_out - amount_out);
    let post_price = post_reserve_out / post_reserve_in;

    ((post_price - pre_price) / pre_price).abs() * Decimal::ONE_HUNDRED
}

/// Full quote with fee split and price impact
pub fn quote_swap_detailed(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_rate_bps: u16,
) -> SwapQuote {
    let amount_out = quote_swap(amount_in, reserve_in, reserve_out, fee_rate_bps);
    let fee_amount = get_trade_fee(amount_in, fee_rate_bps);

    SwapQuote {
        amount_in,
        fee_amount,
        amount_in_net: amount_in - fee_amount,
        amount_out,
        price_impact_pct: price_impact_for(amount_in, amount_out, reserve_in, reserve_out),
    }
}

/// Lowest acceptable output for a slippage tolerance given in basis points
pub fn minimum_amount_out(amount_out: u64, slippage_bps: u16) -> u64 {
    let slippage_bps = u64::from(slippage_bps).min(BPS_DENOMINATOR);
    let kept = u128::from(amount_out) * u128::from(BPS_DENOMINATOR - slippage_bps);
    (kept / u128::from(BPS_DENOMINATOR)) as u64
}

/// Amount of the other token matching `amount` at the current pool ratio.
/// Returns 0 for an empty pool, where the depositor sets the ratio.
pub fn quote_deposit_pair(amount: u64, reserve_same: u64, reserve_other: u64) -> u64 {
    if reserve_same == 0 || reserve_other == 0 {
        return 0;
    }
    let paired = u128::from(amount) * u128::from(reserve_other) / u128::from(reserve_same);
    paired.min(u128::from(u64::MAX)) as u64
}

/// Tokens returned for burning `lp_amount` out of `lp_supply`
pub fn quote_withdrawal(
    lp_amount: u64,
    lp_supply: u64,
    reserve_a: u64,
    reserve_b: u64,
) -> (u64, u64) {
    if lp_supply == 0 {
        return (0, 0);
    }
    let lp_amount = lp_amount.min(lp_supply);
    let share = |reserve: u64| {
        (u128::from(lp_amount) * u128::from(reserve) / u128::from(lp_supply)) as u64
    };
    (share(reserve_a), share(reserve_b))
}
