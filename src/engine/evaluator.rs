//! The position evaluator.
//!
//! `evaluate` is the one pure function at the heart of the monitor: it turns
//! raw on-chain figures plus static policy into a fully-derived [`Snapshot`].
//! It is total and deterministic — every numeric edge case resolves to an
//! explicit policy value, never to an error, and it performs no I/O and no
//! logging.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::Config;
use crate::domain::fixed_point::{
    to_decimal, PERCENT_DECIMALS, USD_DECIMALS, WAD_DECIMALS,
};
use crate::domain::{
    HealthFactorBlock, LeverageBlock, PositionBlock, RawAccountState, RebalanceAction, RiskLevel,
    Snapshot, StatusBlock,
};

/// Health factor below which the position is HIGH risk.
pub const HIGH_RISK_BELOW: Decimal = dec!(1.15);

/// Health factor below which the position is MEDIUM risk (HIGH takes
/// precedence below [`HIGH_RISK_BELOW`]).
pub const MEDIUM_RISK_BELOW: Decimal = dec!(1.30);

/// Fixed safety floor for the near-liquidation flag, independent of the risk
/// tiers and the configured band.
pub const NEAR_LIQUIDATION_BELOW: Decimal = dec!(1.10);

/// Saturation sentinel for leverage when collateral <= debt, where the
/// formula's denominator is zero or negative.
pub const MAX_LEVERAGE: Decimal = dec!(1000);

/// Display cap for the health factor. Aave reports `U256::MAX` on debt-free
/// accounts; anything above this cap reads as "no liquidation risk".
pub const MAX_HEALTH_FACTOR: Decimal = dec!(1000000);

/// Evaluate one raw account state against the configured policy.
pub fn evaluate(raw: &RawAccountState, config: &Config, now: DateTime<Utc>) -> Snapshot {
    let collateral = to_decimal(raw.total_collateral, USD_DECIMALS);
    let debt = to_decimal(raw.total_debt, USD_DECIMALS);
    let available_borrows = to_decimal(raw.available_borrows, USD_DECIMALS);
    let liquidation_threshold = to_decimal(raw.liquidation_threshold, PERCENT_DECIMALS);
    let current = to_decimal(raw.health_factor, WAD_DECIMALS).min(MAX_HEALTH_FACTOR);

    let net_value = collateral - debt;

    let leverage = if debt <= Decimal::ZERO {
        Decimal::ONE
    } else if net_value <= Decimal::ZERO {
        // Fully or over-leveraged: the formula degenerates, saturate.
        MAX_LEVERAGE
    } else {
        (collateral / net_value).min(MAX_LEVERAGE)
    };

    let liquidatable = collateral * liquidation_threshold / Decimal::ONE_HUNDRED;
    let utilization = if liquidatable > Decimal::ZERO {
        debt / liquidatable * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let lower_bound = config.target_hf - config.tolerance;
    let upper_bound = config.target_hf + config.tolerance;

    // Both band edges are inclusive.
    let action = if current < lower_bound {
        RebalanceAction::LeverDown
    } else if current > upper_bound {
        RebalanceAction::LeverUp
    } else {
        RebalanceAction::InRange
    };

    let risk_level = if current < HIGH_RISK_BELOW {
        RiskLevel::High
    } else if current < MEDIUM_RISK_BELOW {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    Snapshot {
        timestamp: now,
        contract: config.contract_address.to_string(),
        owner: raw.owner.to_string(),
        health_factor: HealthFactorBlock {
            current,
            target: config.target_hf,
            tolerance: config.tolerance,
            lower_bound,
            upper_bound,
        },
        position: PositionBlock {
            collateral,
            debt,
            net_value,
            available_borrows,
        },
        leverage: LeverageBlock {
            current: leverage,
            utilization,
            liquidation_threshold,
        },
        status: StatusBlock {
            action,
            risk_level,
            needs_rebalance: action != RebalanceAction::InRange,
            near_liquidation: current < NEAR_LIQUIDATION_BELOW,
        },
    }
}
