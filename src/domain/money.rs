//! European money-string parsing and EUR formatting.
//!
//! Income cells use `.` as thousands separator and `,` as decimal separator,
//! with an optional `€` prefix. A bare `-` or `—` marks "no charge".

use serde_json::Value;

/// Parse a European-formatted money string.
///
/// Returns `None` for empty input, the `-`/`—` placeholders, and anything
/// that does not survive as a finite number after stripping currency
/// symbols, thousands separators and whitespace.
pub fn parse_money(input: &str) -> Option<f64> {
    let s = input.trim();
    if s.is_empty() || s == "-" || s == "—" {
        return None;
    }

    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€' && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Money value of a raw spreadsheet cell. Numeric cells pass through
/// unchanged when finite; string cells go through [`parse_money`].
pub fn money_cell(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_money(s),
        _ => None,
    }
}

/// Dutch-locale EUR formatting (`€ 1.234,56`). Non-finite amounts render as
/// the zero placeholder rather than `NaN`.
pub fn format_eur(amount: f64) -> String {
    if !amount.is_finite() {
        return "€ 0,00".into();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}€ {grouped},{fraction:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_euro_formatted_amount() {
        assert_eq!(parse_money("€1.250,50"), Some(1250.50));
        assert_eq!(parse_money("€ 1.250,50"), Some(1250.50));
        assert_eq!(parse_money("1.234.567,89"), Some(1_234_567.89));
    }

    #[test]
    fn parse_plain_amounts() {
        assert_eq!(parse_money("950"), Some(950.0));
        assert_eq!(parse_money("950,25"), Some(950.25));
    }

    #[test]
    fn parse_placeholders_return_none() {
        assert_eq!(parse_money("-"), None);
        assert_eq!(parse_money("—"), None);
        assert_eq!(parse_money(""), None);
        assert_eq!(parse_money("   "), None);
    }

    #[test]
    fn parse_garbage_returns_none() {
        assert_eq!(parse_money("n.v.t."), None);
        assert_eq!(parse_money("€€"), None);
    }

    #[test]
    fn numeric_cells_pass_through() {
        assert_eq!(money_cell(&json!(1250.5)), Some(1250.5));
        assert_eq!(money_cell(&json!(300)), Some(300.0));
        assert_eq!(money_cell(&json!("€1.250,50")), Some(1250.5));
        assert_eq!(money_cell(&json!(null)), None);
        assert_eq!(money_cell(&json!(true)), None);
    }

    #[test]
    fn format_groups_thousands() {
        assert_eq!(format_eur(1234.56), "€ 1.234,56");
        assert_eq!(format_eur(1_234_567.89), "€ 1.234.567,89");
        assert_eq!(format_eur(950.0), "€ 950,00");
        assert_eq!(format_eur(0.0), "€ 0,00");
    }

    #[test]
    fn format_negative_amount() {
        assert_eq!(format_eur(-12.5), "-€ 12,50");
    }

    #[test]
    fn format_non_finite_never_shows_nan() {
        assert_eq!(format_eur(f64::NAN), "€ 0,00");
        assert_eq!(format_eur(f64::INFINITY), "€ 0,00");
    }

    #[test]
    fn format_parse_round_trip() {
        for amount in [0.0, 12.34, 950.0, 1250.5, 1_234_567.89] {
            assert_eq!(parse_money(&format_eur(amount)), Some(amount));
        }
    }

    #[test]
    fn format_rounds_to_cents() {
        assert_eq!(format_eur(10.006), "€ 10,01");
        assert_eq!(format_eur(10.004), "€ 10,00");
    }
}
