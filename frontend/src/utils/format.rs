use chrono::{DateTime, Datelike, Timelike, Utc};

use super::time::in_app_tz;
use crate::config;

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    #[default]
    Short,
    Long,
    Full,
}

/// Euro amount in pt-PT notation, e.g. `1234,50 €` or `12 345,00 €`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();
    let fraction = cents % 100;

    // pt-PT only groups thousands from five integer digits on.
    let grouped = if units.len() > 4 {
        let mut out = String::new();
        for (i, ch) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                out.push('\u{a0}');
            }
            out.push(ch);
        }
        out
    } else {
        units
    };

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}{},{:02}\u{a0}{}",
        sign,
        grouped,
        fraction,
        config::LOCALE.currency_symbol
    )
}

pub fn format_date(value: DateTime<Utc>, style: DateStyle) -> String {
    let local = in_app_tz(value);
    let month = MONTHS[local.month0() as usize];
    match style {
        DateStyle::Short => local.format("%d/%m/%Y").to_string(),
        DateStyle::Long => format!("{:02} de {} de {}", local.day(), month, local.year()),
        DateStyle::Full => format!(
            "{:02} de {} de {} às {:02}:{:02}",
            local.day(),
            month,
            local.year(),
            local.hour(),
            local.minute()
        ),
    }
}

pub fn format_date_time(value: DateTime<Utc>) -> String {
    format_date(value, DateStyle::Full)
}

/// Portuguese mobile/landline numbers as `+351 XXX XXX XXX`; anything else as typed.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 9 {
        format!("+351 {} {} {}", &digits[0..3], &digits[3..6], &digits[6..])
    } else {
        raw.to_string()
    }
}
