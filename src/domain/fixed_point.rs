//! Fixed-point to decimal conversion for on-chain values.
//!
//! On-chain figures arrive as unsigned 256-bit integers at a per-field scale.
//! Conversion is exact while the value fits a `Decimal` mantissa; values that
//! do not fit saturate to `Decimal::MAX`. No rounding is ever applied.

use alloy::primitives::U256;
use rust_decimal::Decimal;

/// Scale of USD-denominated figures (collateral, debt, available borrows).
pub const USD_DECIMALS: u32 = 8;

/// Scale of the liquidation threshold (basis-point-like, 8000 -> 80%).
pub const PERCENT_DECIMALS: u32 = 2;

/// Scale of the raw health factor (WAD, 1e18 = 1.0).
pub const WAD_DECIMALS: u32 = 18;

/// Convert a raw fixed-point value to a `Decimal` by shifting `scale` digits.
///
/// Saturates to `Decimal::MAX` when the raw value exceeds the 96-bit mantissa,
/// which in practice only happens for sentinel values such as the `U256::MAX`
/// health factor Aave reports on debt-free accounts.
pub fn to_decimal(value: U256, scale: u32) -> Decimal {
    if value > U256::from(u128::MAX) {
        return Decimal::MAX;
    }
    let raw = value.to::<u128>();
    if raw > i128::MAX as u128 {
        return Decimal::MAX;
    }
    Decimal::try_from_i128_with_scale(raw as i128, scale).unwrap_or(Decimal::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usd_scale_is_exact() {
        // 150000 USD at 8 decimals
        let raw = U256::from(15_000_000_000_000u64);
        assert_eq!(to_decimal(raw, USD_DECIMALS), dec!(150000));
    }

    #[test]
    fn test_wad_scale_is_exact() {
        let raw = U256::from(1_200_000_000_000_000_000u64);
        assert_eq!(to_decimal(raw, WAD_DECIMALS), dec!(1.2));
    }

    #[test]
    fn test_threshold_scale() {
        assert_eq!(to_decimal(U256::from(8000u64), PERCENT_DECIMALS), dec!(80));
    }

    #[test]
    fn test_zero() {
        assert_eq!(to_decimal(U256::ZERO, USD_DECIMALS), Decimal::ZERO);
    }

    #[test]
    fn test_u256_max_saturates() {
        assert_eq!(to_decimal(U256::MAX, WAD_DECIMALS), Decimal::MAX);
    }

    #[test]
    fn test_mantissa_overflow_saturates() {
        // Fits u128 but not the 96-bit Decimal mantissa.
        let raw = U256::from(u128::MAX / 2);
        assert_eq!(to_decimal(raw, USD_DECIMALS), Decimal::MAX);
    }

    #[test]
    fn test_sub_unit_values() {
        // 0.00000001 USD, the smallest representable step.
        assert_eq!(to_decimal(U256::from(1u64), USD_DECIMALS), dec!(0.00000001));
    }
}
