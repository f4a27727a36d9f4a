//! The snapshot streamed to dashboard clients.
//!
//! A `Snapshot` is immutable and fully self-contained: every tick produces a
//! brand-new one, holds it only long enough to serialize and send, then drops
//! it. All decimal fields serialize as JSON numbers in camelCase, matching
//! what the dashboard renders directly.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub contract: String,
    pub owner: String,
    pub health_factor: HealthFactorBlock,
    pub position: PositionBlock,
    pub leverage: LeverageBlock,
    pub status: StatusBlock,
}

/// Current health factor against the configured target band.
///
/// Invariant: `lower_bound < target < upper_bound` (tolerance > 0 is enforced
/// at configuration time).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthFactorBlock {
    #[serde(with = "rust_decimal::serde::float")]
    pub current: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub target: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tolerance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub lower_bound: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub upper_bound: Decimal,
}

/// USD-normalized position sizes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionBlock {
    #[serde(with = "rust_decimal::serde::float")]
    pub collateral: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub debt: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub available_borrows: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeverageBlock {
    #[serde(with = "rust_decimal::serde::float")]
    pub current: Decimal,
    /// Debt as a percentage of liquidatable collateral value.
    #[serde(with = "rust_decimal::serde::float")]
    pub utilization: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub liquidation_threshold: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBlock {
    pub action: RebalanceAction,
    pub risk_level: RiskLevel,
    pub needs_rebalance: bool,
    pub near_liquidation: bool,
}

/// Recommended directional adjustment to return the health factor toward the
/// target band. Both band edges are inclusive: equality means in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RebalanceAction {
    InRange,
    /// Excess safety margin; leverage may be increased.
    LeverUp,
    /// Too little safety margin; position must be deleveraged.
    LeverDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_action_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&RebalanceAction::InRange).unwrap(),
            "\"IN_RANGE\""
        );
        assert_eq!(
            serde_json::to_string(&RebalanceAction::LeverUp).unwrap(),
            "\"LEVER_UP\""
        );
        assert_eq!(
            serde_json::to_string(&RebalanceAction::LeverDown).unwrap(),
            "\"LEVER_DOWN\""
        );
    }

    #[test]
    fn test_risk_level_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::Low).unwrap(), "\"LOW\"");
        assert_eq!(
            serde_json::to_string(&RiskLevel::Medium).unwrap(),
            "\"MEDIUM\""
        );
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"HIGH\"");
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let snapshot = Snapshot {
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            contract: "0x18D8B7045BbBC2163FF0270b6e4cF8F8Db9624f5".to_string(),
            owner: "0x0000000000000000000000000000000000000001".to_string(),
            health_factor: HealthFactorBlock {
                current: dec!(1.2),
                target: dec!(1.25),
                tolerance: dec!(0.05),
                lower_bound: dec!(1.2),
                upper_bound: dec!(1.3),
            },
            position: PositionBlock {
                collateral: dec!(150000),
                debt: dec!(100000),
                net_value: dec!(50000),
                available_borrows: dec!(20000),
            },
            leverage: LeverageBlock {
                current: dec!(3),
                utilization: dec!(83.33),
                liquidation_threshold: dec!(80),
            },
            status: StatusBlock {
                action: RebalanceAction::InRange,
                risk_level: RiskLevel::Medium,
                needs_rebalance: false,
                near_liquidation: false,
            },
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["healthFactor"]["lowerBound"], 1.2);
        assert_eq!(value["position"]["netValue"], 50000.0);
        assert_eq!(value["leverage"]["liquidationThreshold"], 80.0);
        assert_eq!(value["status"]["action"], "IN_RANGE");
        assert_eq!(value["status"]["needsRebalance"], false);
    }
}
