//! Display helpers shared by the dashboard views.

/// Formats a duration in milliseconds: `250ms`, `2.5s`, `1m 5s`.
pub fn format_duration(ms: f64) -> String {
    if !ms.is_finite() || ms < 0.0 {
        return "-".to_string();
    }
    if ms < 1_000.0 {
        return format!("{}ms", ms.round() as u64);
    }
    if ms < 60_000.0 {
        return format!("{:.1}s", ms / 1_000.0);
    }

    let total_secs = (ms / 1_000.0).floor() as u64;
    format!("{}m {}s", total_secs / 60, total_secs % 60)
}

/// Formats an integer with thousands separators: `1234567` -> `1,234,567`.
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Percentage with one decimal, or `-` when there is nothing to divide by.
pub fn format_success_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) if rate.is_finite() => format!("{rate:.1}%"),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(250.0), "250ms");
        assert_eq!(format_duration(2_500.0), "2.5s");
        assert_eq!(format_duration(65_000.0), "1m 5s");
        assert_eq!(format_duration(f64::NAN), "-");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }
}
