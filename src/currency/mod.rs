//! Amount formatting for presentation layers.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("PHP")
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "PHP" => "₱".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => format!("{code} "),
    }
}

pub fn minor_units_for(code: &str) -> u32 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Renders `amount` with thousands grouping and the currency's minor units.
pub fn format_number(amount: Decimal, precision: u32) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let body = format!("{:.*}", precision as usize, rounded);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac)) => (int_part.to_string(), Some(frac.to_string())),
        None => (body, None),
    };
    let mut grouped = group_digits(&int_part, ',');
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(&frac);
    }
    grouped
}

/// e.g. `₱1,234.50`, or `-₱12.00` for negative amounts.
pub fn format_amount(amount: Decimal, code: &CurrencyCode) -> String {
    let body = format_number(amount, minor_units_for(code.as_str()));
    let symbol = symbol_for(code.as_str());
    if amount < Decimal::ZERO {
        format!("-{symbol}{body}")
    } else {
        format!("{symbol}{body}")
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
