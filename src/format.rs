//! Display formatting for money and durations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies offered in the preferences.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::CAD => "CA$",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Whole-unit amount with thousands separators, e.g. `$12,500`.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{}{}", sign, currency.symbol(), grouped)
}

/// `45m`, `2h` or `1h 30m`. `None` for a zero duration.
pub fn format_duration(minutes: u32) -> Option<String> {
    if minutes == 0 {
        return None;
    }
    if minutes < 60 {
        return Some(format!("{}m", minutes));
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        Some(format!("{}h {}m", hours, mins))
    } else {
        Some(format!("{}h", hours))
    }
}
