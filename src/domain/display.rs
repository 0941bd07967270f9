//! Small derived numbers shown next to holdings.

use crate::domain::calendar::round2;
use crate::domain::holding::Holding;

/// Synthetic 0..=100 "dividend yield" badge for a holding.
///
/// Not a real yield: a fold of the ticker's first and last character codes
/// with the thrust and value magnitudes. Stable for a given ticker, thrust
/// and value.
pub fn dividend_yield_estimate(holding: &Holding) -> f64 {
    let codes: Vec<u16> = holding.ticker.encode_utf16().collect();
    let first = codes.first().copied().map_or(0.0, f64::from);
    let last = codes.last().copied().map_or(0.0, f64::from);

    let seed = first + last;
    let base = seed % 50.0 + first % 50.0;
    let thrust_bonus = (holding.yearly_thrust / 1000.0) % 30.0;
    let value_bonus = (holding.current_value / 10_000.0) % 20.0;
    let total = (base + thrust_bonus + value_bonus) % 100.0;

    round2(total.clamp(0.0, 100.0))
}

/// Ranking weight for the top movers list.
pub fn mover_score(holding: &Holding) -> f64 {
    holding.yearly_thrust * (holding.current_value / 1000.0)
}

pub fn monthly_income(total_yearly_thrust: f64) -> f64 {
    total_yearly_thrust / 12.0
}
