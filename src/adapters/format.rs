//! Console formatting helpers for currency amounts.
//!
//! Amounts of a million or more render as `M`, a thousand or more as `k`,
//! anything smaller in full. Negative amounts carry a leading `-`.

fn scaled(value: f64, decimals_large: usize, decimals_k: usize, decimals_small: usize) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1_000_000.0 {
        format!("{sign}${:.*}M", decimals_large, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{sign}${:.*}k", decimals_k, abs / 1_000.0)
    } else {
        format!("{sign}${:.*}", decimals_small, abs)
    }
}

/// General purpose amount, `decimals` places for `k`/`M`, cents below 1k.
pub fn format_currency(value: f64, decimals: usize) -> String {
    scaled(value, decimals, decimals, 2)
}

/// Table cells: whole thousands, one decimal for millions.
pub fn format_currency_table(value: f64) -> String {
    scaled(value, 1, 0, 2)
}

/// Chart labels: whole dollars below 1k.
pub fn format_currency_chart(value: f64) -> String {
    scaled(value, 1, 0, 0)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_scales_by_magnitude() {
        assert_eq!(format_currency(2_500_000.0, 1), "$2.5M");
        assert_eq!(format_currency(1_500.0, 1), "$1.5k");
        assert_eq!(format_currency(999.5, 1), "$999.50");
        assert_eq!(format_currency(-12_346.0, 2), "-$12.35k");
        assert_eq!(format_currency(0.0, 1), "$0.00");
    }

    #[test]
    fn table_and_chart_variants() {
        assert_eq!(format_currency_table(42_000.0), "$42k");
        assert_eq!(format_currency_table(1_240_000.0), "$1.2M");
        assert_eq!(format_currency_table(12.5), "$12.50");
        assert_eq!(format_currency_chart(12.4), "$12");
        assert_eq!(format_currency_chart(-3_000.0), "-$3k");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(37.7), "37.7%");
        assert_eq!(format_percent(5.0), "5.0%");
    }
}
