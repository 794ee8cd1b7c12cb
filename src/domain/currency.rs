//! Rupee formatting matching `en-IN` / `INR` with no fractional digits.

const RUPEE: char = '₹';

/// Formats an amount the way `en-IN` renders INR: `₹1,25,000`.
///
/// The last three digits form one group and the rest are grouped in pairs.
/// Amounts are rounded half away from zero; non-finite input renders as `₹0`.
pub fn format_inr(amount: f64) -> String {
    let rounded = if amount.is_finite() { amount.round() } else { 0.0 };
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 2 + 4);
    if negative {
        out.push('-');
    }
    out.push(RUPEE);
    out.push_str(&group_indian(&digits));
    out
}

/// Formats an optional amount, falling back to an em dash.
pub fn format_inr_opt(amount: Option<f64>) -> String {
    amount.map(format_inr).unwrap_or_else(|| "—".to_string())
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::with_capacity(head.len() / 2 + 2);
    let offset = head.len() % 2;
    if offset == 1 {
        groups.push(&head[..1]);
    }
    groups.extend(
        head.as_bytes()[offset..]
            .chunks(2)
            .filter_map(|pair| std::str::from_utf8(pair).ok()),
    );
    groups.push(tail);
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_amounts_have_no_separator() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(800.0), "₹800");
    }

    #[test]
    fn thousands_and_lakhs_use_indian_grouping() {
        assert_eq!(format_inr(2500.0), "₹2,500");
        assert_eq!(format_inr(12_345.0), "₹12,345");
        assert_eq!(format_inr(125_000.0), "₹1,25,000");
        assert_eq!(format_inr(12_345_678.0), "₹1,23,45,678");
    }

    #[test]
    fn rounds_to_whole_rupees() {
        assert_eq!(format_inr(2499.5), "₹2,500");
        assert_eq!(format_inr(2499.49), "₹2,499");
    }

    #[test]
    fn negative_amounts_lead_with_sign() {
        assert_eq!(format_inr(-1500.0), "-₹1,500");
    }

    #[test]
    fn missing_amount_renders_dash() {
        assert_eq!(format_inr_opt(None), "—");
        assert_eq!(format_inr_opt(Some(3500.0)), "₹3,500");
    }
}
