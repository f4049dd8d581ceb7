//! Money Formatting
//!
//! Amounts are `Decimal` end to end. Display text follows the store's
//! format: `R$ 12,34`, two decimals, comma separator, no grouping.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// 5% off for PIX payments
pub const PIX_DISCOUNT_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format as `R$ 1234,50`
pub fn format_brl(value: Decimal) -> String {
    format!("R$ {}", decimal_comma(value))
}

/// Format a discount line, `- R$ 4,75`
pub fn format_discount(value: Decimal) -> String {
    format!("- R$ {}", decimal_comma(value))
}

fn decimal_comma(value: Decimal) -> String {
    format!("{:.2}", round_cents(value)).replace('.', ",")
}

/// Parse display text produced by [`format_brl`] (or typed by hand) back into a value
pub fn parse_brl(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .trim()
        .trim_start_matches("- ")
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };
    Decimal::from_str(&normalized).ok()
}

/// Integer with pt-BR digit grouping, `12.345`
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(dec("12.3")), "R$ 12,30");
        assert_eq!(format_brl(dec("0")), "R$ 0,00");
        assert_eq!(format_brl(dec("1999.999")), "R$ 2000,00");
        assert_eq!(format_brl(dec("10.005")), "R$ 10,01");
    }

    #[test]
    fn test_format_discount() {
        assert_eq!(format_discount(dec("4.75")), "- R$ 4,75");
    }

    #[test]
    fn test_parse_brl() {
        assert_eq!(parse_brl("R$ 15,90"), Some(dec("15.90")));
        assert_eq!(parse_brl("  R$ 1.234,56 "), Some(dec("1234.56")));
        assert_eq!(parse_brl("7.5"), Some(dec("7.5")));
        assert_eq!(parse_brl("A calcular"), None);
        assert_eq!(parse_brl(""), None);
    }

    #[test]
    fn test_parse_inverts_format() {
        let value = dec("249.90");
        assert_eq!(parse_brl(&format_brl(value)), Some(value));
    }

    #[test]
    fn test_pix_rate() {
        assert_eq!(PIX_DISCOUNT_RATE, dec("0.05"));
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1000), "1.000");
        assert_eq!(format_grouped(1234567), "1.234.567");
        assert_eq!(format_grouped(-45210), "-45.210");
    }
}
