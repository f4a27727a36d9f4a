//! Domain types for the position monitor.
//!
//! This module provides:
//! - Fixed-point to decimal conversion with documented saturation
//! - RawAccountState: on-chain account figures at native scale
//! - Snapshot: the immutable, fully-normalized unit of distribution

pub mod account;
pub mod fixed_point;
pub mod snapshot;

pub use account::RawAccountState;
pub use snapshot::{
    HealthFactorBlock, LeverageBlock, PositionBlock, RebalanceAction, RiskLevel, Snapshot,
    StatusBlock,
};
