use rust_decimal::{Decimal, RoundingStrategy};

/// `$1,234.56` style amount; negatives render as `-$40.00`.
pub fn format_money(value: f64) -> String {
    let (negative, body) = money_body(value);
    if negative {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Like [`format_money`] but always carries a sign: `+$100.00`, `-$5.00`.
pub fn format_signed_money(value: f64) -> String {
    let (negative, body) = money_body(value);
    format!("{}${}", if negative { '-' } else { '+' }, body)
}

/// Account balances are kept as decimals end to end.
pub fn format_balance(balance: Decimal) -> String {
    let rounded = balance.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let body = group_thousands(&text);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

fn money_body(value: f64) -> (bool, String) {
    let text = format!("{:.2}", value.abs());
    // -0.001 prints as 0.00 and should not carry a sign
    let negative = value < 0.0 && text.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    (negative, group_thousands(&text))
}

fn group_thousands(text: &str) -> String {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text, None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(60.0), "$60.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_money(-40.0), "-$40.00");
        assert_eq!(format_money(-0.001), "$0.00");
    }

    #[test]
    fn signed_money_always_has_sign() {
        assert_eq!(format_signed_money(100.0), "+$100.00");
        assert_eq!(format_signed_money(-5.0), "-$5.00");
        assert_eq!(format_signed_money(12000.0), "+$12,000.00");
    }

    #[test]
    fn balance_rounds_to_cents() {
        assert_eq!(format_balance(dec!(10250.456)), "$10,250.46");
        assert_eq!(format_balance(dec!(999.9)), "$999.90");
        assert_eq!(format_balance(dec!(-1500)), "-$1,500.00");
        assert_eq!(format_balance(Decimal::ZERO), "$0.00");
    }
}
