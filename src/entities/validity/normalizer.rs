//! Duration label derivation
//!
//! The label is a pure function of `(months, days)` and is stored next to
//! the counts so listings never have to recompute it.

fn unit(count: u32, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Canonical label for a duration, e.g. `"1 Month 15 Days"`
pub fn validity_label(months: u32, days: u32) -> String {
    match (months, days) {
        (0, 0) => "0 Days".to_string(),
        (0, d) => unit(d, "Day", "Days"),
        (m, 0) => unit(m, "Month", "Months"),
        (m, d) => format!("{} {}", unit(m, "Month", "Months"), unit(d, "Day", "Days")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_only() {
        assert_eq!(validity_label(1, 0), "1 Month");
        assert_eq!(validity_label(2, 0), "2 Months");
        assert_eq!(validity_label(12, 0), "12 Months");
    }

    #[test]
    fn test_days_only() {
        assert_eq!(validity_label(0, 1), "1 Day");
        assert_eq!(validity_label(0, 15), "15 Days");
    }

    #[test]
    fn test_months_and_days() {
        assert_eq!(validity_label(1, 1), "1 Month 1 Day");
        assert_eq!(validity_label(1, 15), "1 Month 15 Days");
        assert_eq!(validity_label(3, 1), "3 Months 1 Day");
        assert_eq!(validity_label(6, 10), "6 Months 10 Days");
    }

    #[test]
    fn test_zero_duration() {
        assert_eq!(validity_label(0, 0), "0 Days");
    }
}
