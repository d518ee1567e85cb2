//! Price Formatting
//!
//! The shop sells in Brazilian reais and renders prices the way `pt-BR`
//! locales do: `R$`, a no-break space, `.` between thousands and `,` before
//! the cents. Locale and currency are fixed for the deployment.

use rust_decimal::Decimal;

/// Currency every price is rendered in
pub const CURRENCY: &str = "brl";

/// Currency symbol used in rendered prices
pub const CURRENCY_SYMBOL: &str = "R$";

const NO_BREAK_SPACE: char = '\u{a0}';

/// Convert an amount in centavos to reais
pub fn to_major_units(unit_amount: i64) -> Decimal {
    Decimal::new(unit_amount, 2)
}

/// Format an amount in centavos as a `pt-BR` BRL string
///
/// `9990` becomes `"R$ 99,90"` and `123456` becomes `"R$ 1.234,56"`
/// (the gap after the symbol is U+00A0).
pub fn format_brl(unit_amount: i64) -> String {
    let amount = to_major_units(unit_amount);
    let digits = format!("{:.2}", amount.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut out = String::with_capacity(digits.len() + 8);
    if amount.is_sign_negative() && !amount.is_zero() {
        out.push('-');
    }
    out.push_str(CURRENCY_SYMBOL);
    out.push(NO_BREAK_SPACE);
    out.push_str(&group_thousands(whole));
    out.push(',');
    out.push_str(cents);
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
