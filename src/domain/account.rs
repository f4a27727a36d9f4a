use alloy::primitives::{Address, U256};

/// Raw account figures as returned by the lever contract, at native on-chain
/// scale. Produced fresh by each fetch and consumed immediately; never
/// retained across ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAccountState {
    /// Total collateral in USD, 8 decimals.
    pub total_collateral: U256,
    /// Total debt in USD, 8 decimals.
    pub total_debt: U256,
    /// Remaining borrow capacity in USD, 8 decimals.
    pub available_borrows: U256,
    /// Weighted average liquidation threshold, basis-point-like (8000 = 80%).
    pub liquidation_threshold: U256,
    /// Health factor in WAD (1e18 = 1.0). `U256::MAX` when debt is zero.
    pub health_factor: U256,
    /// Owner of the position contract.
    pub owner: Address,
}
