use rust_decimal::Decimal;

/// Views per payout unit
pub const VIEWS_PER_PAYOUT: u64 = 1000;

/// Earnings for a view count at a per-1000-view rate.
///
/// Only whole thousands pay: 999 views earn nothing, 1999 earn one rate.
/// Saturates at [`Decimal::MAX`] rather than overflowing.
pub fn earnings_for_views(views: u64, rate: Decimal) -> Decimal {
    Decimal::from(views / VIEWS_PER_PAYOUT).saturating_mul(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_whole_thousands_only() {
        assert_eq!(earnings_for_views(2500, dec!(15)), dec!(30));
        assert_eq!(earnings_for_views(999, dec!(15)), dec!(0));
        assert_eq!(earnings_for_views(1999, dec!(15)), dec!(15));
        assert_eq!(earnings_for_views(0, dec!(15)), dec!(0));
    }

    #[test]
    fn test_huge_rate_saturates() {
        assert_eq!(earnings_for_views(u64::MAX, Decimal::MAX), Decimal::MAX);
    }

    #[test]
    fn test_fractional_rate_is_exact() {
        assert_eq!(earnings_for_views(3000, dec!(0.1)), dec!(0.3));
    }
}
