// ── List display transforms ──
//
// One-way formatting applied to list rows. Values that fail to parse are
// passed through unchanged.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::common::{fixed2, parse_decimal};

/// `2024-05-01` or `2024-05-01 10:00:00.000Z` → `01/05/2024`.
pub fn date_br(raw: &str) -> String {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_or_else(|_| raw.to_owned(), |d| d.format("%d/%m/%Y").to_string())
}

/// Numeric string rounded to two decimals.
pub fn decimal2(raw: &str) -> String {
    parse_decimal(raw).map_or_else(|| raw.to_owned(), fixed2)
}

/// Brazilian currency: `1234.5` → `R$ 1.234,50`.
pub fn currency_brl(raw: &str) -> String {
    parse_decimal(raw).map_or_else(|| raw.to_owned(), format_brl)
}

fn format_brl(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let fixed = format!("{rounded:.2}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}R$ {grouped},{frac_part}")
}

/// `true` → `Sim`, `false` → `Não`.
pub fn sim_nao(value: bool) -> &'static str {
    if value { "Sim" } else { "Não" }
}
