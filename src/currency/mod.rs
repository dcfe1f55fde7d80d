//! Currency display helpers.

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Formats an amount as the symbol followed by exactly two decimals.
///
/// Negative amounts keep their sign after the symbol (`$-5.00`). Amounts that
/// round to zero are printed unsigned.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    format!("{symbol}{}", format_fixed(amount, 2))
}

/// Fixed-point rendering that never yields `-0.00`.
pub fn format_fixed(amount: f64, precision: usize) -> String {
    let rendered = format!("{:.*}", precision, amount);
    match rendered.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|ch| ch == '0' || ch == '.') => {
            unsigned.to_string()
        }
        _ => rendered,
    }
}

/// Converts a fraction into the percent text shown in the tax rate field.
pub fn format_percent(fraction: f64) -> String {
    format_fixed(fraction * 100.0, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_decimals_with_symbol() {
        assert_eq!(format_currency(30.75, "$"), "$30.75");
        assert_eq!(format_currency(69.25, "$"), "$69.25");
        assert_eq!(format_currency(0.0, "€"), "€0.00");
        assert_eq!(format_currency(1234.5, "$"), "$1234.50");
    }

    #[test]
    fn negative_sign_follows_symbol() {
        assert_eq!(format_currency(-5.0, "$"), "$-5.00");
    }

    #[test]
    fn rounding_to_zero_drops_sign() {
        assert_eq!(format_currency(-0.0, "$"), "$0.00");
        assert_eq!(format_currency(-0.001, "$"), "$0.00");
    }

    #[test]
    fn percent_text() {
        assert_eq!(format_percent(0.025), "2.50");
        assert_eq!(format_percent(0.0), "0.00");
    }
}
