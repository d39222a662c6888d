//! Rupee formatting for display.
//!
//! Presentation only: nothing in the calculation modules depends on it.

use crate::core::Money;

/// Format with the rupee sign and Indian digit grouping:
/// `₹12,34,567.89`, `-₹5.00`.
pub fn format_inr(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{sign}₹{}", format_grouped(amount))
}

/// Indian digit grouping of the absolute amount, e.g. `1,23,456.70`.
pub fn format_grouped(amount: Money) -> String {
    let minor = amount.minor().unsigned_abs();
    let rupees = (minor / 100).to_string();
    let paisa = minor % 100;
    format!("{}.{paisa:02}", group_indian(&rupees))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), last_three)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_amounts() {
        assert_eq!(format_inr(Money::ZERO), "₹0.00");
        assert_eq!(format_inr(Money::from_minor(5)), "₹0.05");
        assert_eq!(format_inr(Money::from_minor(123_450)), "₹1,234.50");
    }

    #[test]
    fn lakh_and_crore_grouping() {
        assert_eq!(format_inr(Money::from_minor(123_456_789)), "₹12,34,567.89");
        assert_eq!(format_inr(Money::from_rupees(10_000_000)), "₹1,00,00,000.00");
        assert_eq!(format_inr(Money::from_rupees(100_000)), "₹1,00,000.00");
    }

    #[test]
    fn negative() {
        assert_eq!(format_inr(Money::from_minor(-500)), "-₹5.00");
        assert_eq!(format_grouped(Money::from_minor(-12_345_670)), "1,23,456.70");
    }

    #[test]
    fn extreme_values_do_not_panic() {
        assert!(format_inr(Money::from_minor(i64::MIN)).starts_with("-₹"));
    }
}
