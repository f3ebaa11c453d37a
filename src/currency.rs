//! Currency formatting for amounts shown to the user.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// The currency expenses are recorded in.
pub const CURRENCY_CODE: &str = "CHF";

/// Format `amount` as Swiss francs rounded to the cent, e.g. "CHF 12.30".
pub fn format_currency(amount: f64) -> String {
    static FMT: OnceLock<Formatter> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::currency("CHF ")
            .expect("currency prefix is short enough")
            .precision(Precision::Decimals(2))
    });

    // numfmt truncates to the precision and switches to scientific notation
    // below 0.01, so round to whole cents first.
    let amount = (amount * 100.0).round() / 100.0;

    if amount == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return format!("{CURRENCY_CODE} 0.00");
    }

    let formatted_string = fmt.fmt_string(amount);

    // numfmt omits trailing zeros, so we must add them ourselves.
    // For example, "12.30" is rendered as "12.3" and "12.00" as "12".
    match formatted_string.split_once('.') {
        Some((_, decimals)) if decimals.len() == 1 => format!("{formatted_string}0"),
        Some(_) => formatted_string,
        None => format!("{formatted_string}.00"),
    }
}

#[cfg(test)]
mod tests {
    use crate::currency::format_currency;

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_currency(12.34), "CHF 12.34");
    }

    #[test]
    fn pads_missing_decimals() {
        assert!(format_currency(12.3).ends_with("12.30"));
        assert!(format_currency(12.0).ends_with("12.00"));
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_currency(0.0), "CHF 0.00");
    }

    #[test]
    fn rounds_to_the_nearest_cent() {
        assert_eq!(format_currency(0.125), "CHF 0.13");
        assert_eq!(format_currency(999.999), "CHF 1,000.00");
        assert_eq!(format_currency(12.344), "CHF 12.34");
    }

    #[test]
    fn amounts_below_half_a_cent_show_as_zero() {
        assert_eq!(format_currency(0.001), "CHF 0.00");
        assert_eq!(format_currency(0.004), "CHF 0.00");
    }

    #[test]
    fn small_amounts_are_not_in_scientific_notation() {
        assert_eq!(format_currency(0.01), "CHF 0.01");
        assert_eq!(format_currency(0.009), "CHF 0.01");
    }

    #[test]
    fn large_amounts_have_thousands_separators() {
        assert_eq!(format_currency(1234567.5), "CHF 1,234,567.50");
    }
}
