//! Core logic for computing price and duration estimates.

use crate::pricing::types::{Addon, QuoteResult, QuoteSelection};

/// Compute the estimate for a selection.
///
/// Pure and total: an empty selection is valid and yields a zero estimate.
/// Multipliers accumulate as an exact integer product and the division
/// rounds half away from zero, exactly once per output figure.
pub fn compute_quote(selection: &QuoteSelection) -> QuoteResult {
    if selection.services().is_empty() {
        // No service selected: add-ons and complexity never price on their own.
        return QuoteResult {
            total: 0,
            estimated_duration_days: 0,
        };
    }

    let mut base_price: u64 = 0;
    let mut base_days: u64 = 0;
    for service in selection.services() {
        let rate = service.rate();
        base_price += u64::from(rate.price);
        base_days += u64::from(rate.duration_days);
    }

    let complexity_pct = selection.complexity().multiplier_pct();

    let mut numer = base_price * complexity_pct;
    let mut denom: u64 = 100;
    for addon in Addon::ALL {
        if selection.has_addon(addon) {
            numer *= addon.multiplier_pct();
            denom *= 100;
        }
    }

    QuoteResult {
        total: div_round_half_up(numer, denom) as u32,
        estimated_duration_days: div_round_half_up(base_days * complexity_pct, 100) as u32,
    }
}

fn div_round_half_up(numer: u64, denom: u64) -> u64 {
    (numer + denom / 2) / denom
}

/// Format a whole-EUR amount the way `fr-FR` renders currency without
/// decimals: thousands grouped and the sign trailing, joined by narrow
/// no-break spaces ("1 500 €").
pub fn format_eur(amount: u32) -> String {
    const NNBSP: char = '\u{202f}';

    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(NNBSP);
        }
        out.push(c);
    }
    out.push(NNBSP);
    out.push('€');
    out
}
