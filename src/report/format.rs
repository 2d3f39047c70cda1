//! Number formatting for report output

/// Format an amount as dollars with thousands separators, e.g. `$1,234.56` or `-$20,000.00`
pub fn currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", sign, grouped, cents)
}

/// Format a fraction as a percentage, e.g. `0.07` -> `7.00%`
pub fn percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}
