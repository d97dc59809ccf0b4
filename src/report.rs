//! Human-readable summary output.

use crate::aggregator::Summary;
use crate::error::Result;
use crate::money::Money;
use std::io::Write;

/// Inserts `,` between every three digits of the integer part of a number.
///
/// A leading sign and anything from the decimal point on are left untouched.
///
/// ```
/// use mps7_summary::report::group_thousands;
///
/// assert_eq!(group_thousands("1234567"), "1,234,567");
/// assert_eq!(group_thousands("-1234.50"), "-1,234.50");
/// ```
pub fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let split = unsigned.find('.').unwrap_or(unsigned.len());
    let (digits, fraction) = unsigned.split_at(split);

    let mut out = String::with_capacity(number.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(fraction);
    out
}

/// Formats a total to 2 decimal places.
///
/// Finite values beyond the range of `Decimal` are printed straight from the
/// `f64`. Only NaN and infinities are rejected.
fn format_amount(value: f64) -> Result<String> {
    match Money::from_f64(value) {
        Ok(money) => Ok(money.to_string()),
        Err(_) if value.is_finite() => Ok(format!("{:.2}", value)),
        Err(e) => Err(e.into()),
    }
}

/// Writes the summary, one statistic per line.
///
/// Currency totals are rounded to 2 places here; debits and credits are
/// also digit-grouped.
pub fn write_report<W: Write>(summary: &Summary, selected_user: u64, mut writer: W) -> Result<()> {
    let balance = format_amount(summary.selected_user_balance)?;
    let debits = group_thousands(&format_amount(summary.total_debits)?);
    let credits = group_thousands(&format_amount(summary.total_credits)?);

    writeln!(writer, "autopay started: {}", summary.autopay_started)?;
    writeln!(writer, "autopay ended: {}", summary.autopay_ended)?;
    writeln!(writer, "user {} balance: {}", selected_user, balance)?;
    writeln!(writer, "debits: {}", debits)?;
    writeln!(writer, "credits: {}", credits)?;

    writer.flush()?;
    Ok(())
}
