//! Display formatting for dollar amounts, PNL, prices and addresses.
//!
//! Output is for humans only and is not meant to be parsed back.

/// `$1.23M`, `$45.6K`, `$512`; negative amounts keep their sign
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${}", compact(amount.abs()))
}

/// Signed PNL: `+$1.2K`, `-$300`
pub fn format_pnl(pnl: f64) -> String {
    if !pnl.is_finite() {
        return "$0".to_string();
    }
    let sign = if pnl < 0.0 { "-" } else { "+" };
    format!("{sign}${}", compact(pnl.abs()))
}

/// Probability percentage shown as cents: `73.0¢`
pub fn format_cents(pct: f64) -> String {
    format!("{pct:.1}¢")
}

/// `0x1234...abcd`; short or non-ASCII input comes back unchanged
pub fn short_address(address: &str) -> String {
    if address.len() < 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

fn compact(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{:.2}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        format!("{n:.0}")
    }
}
