//! Currency helpers (Indonesian Rupiah)

/// Render an amount for API responses, e.g. `Rp 50000.00`
pub fn format_rupiah(amount: f64) -> String {
    format!("Rp {:.2}", amount)
}

/// Parse a price typed by a human: `"Rp 18.000"`, `"18,000"`, `"18000"`.
///
/// Thousands separators of either kind are dropped, so decimals cannot be
/// expressed in this form. Returns `None` for anything that is not a finite,
/// non-negative number.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .replace("Rp", "")
        .chars()
        .filter(|c| !matches!(c, '.' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(50000.0), "Rp 50000.00");
        assert_eq!(format_rupiah(12500.5), "Rp 12500.50");
        assert_eq!(format_rupiah(0.0), "Rp 0.00");
    }

    #[test]
    fn test_parse_price_strips_separators() {
        assert_eq!(parse_price("Rp 18.000"), Some(18000.0));
        assert_eq!(parse_price("18,000"), Some(18000.0));
        assert_eq!(parse_price(" 25000 "), Some(25000.0));
        assert_eq!(parse_price("Rp12.500"), Some(12500.0));
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("Rp"), None);
        assert_eq!(parse_price("gratis"), None);
        assert_eq!(parse_price("-5000"), None);
        assert_eq!(parse_price("inf"), None);
    }
}
