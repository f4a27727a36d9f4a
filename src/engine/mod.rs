//! Pure evaluation engine: raw account figures in, snapshot out.

pub mod evaluator;

pub use evaluator::{
    evaluate, HIGH_RISK_BELOW, MAX_HEALTH_FACTOR, MAX_LEVERAGE, MEDIUM_RISK_BELOW,
    NEAR_LIQUIDATION_BELOW,
};
