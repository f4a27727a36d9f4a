//! Mock account source for testing without network calls.

use super::{AccountDataSource, DataSourceError};
use crate::domain::RawAccountState;
use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock source returning a settable state or error.
///
/// The result is behind a mutex so tests can flip between healthy and failing
/// while a distributor holds the source.
#[derive(Debug)]
pub struct MockAccountSource {
    result: Mutex<Result<RawAccountState, String>>,
}

impl MockAccountSource {
    /// Create a mock that returns the given state.
    pub fn new(state: RawAccountState) -> Self {
        Self {
            result: Mutex::new(Ok(state)),
        }
    }

    /// Create a mock that fails every fetch with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            result: Mutex::new(Err(message.to_string())),
        }
    }

    /// Make subsequent fetches return the given state.
    pub fn set_state(&self, state: RawAccountState) {
        *self.result.lock().unwrap() = Ok(state);
    }

    /// Make subsequent fetches fail with the given message.
    pub fn set_failing(&self, message: &str) {
        *self.result.lock().unwrap() = Err(message.to_string());
    }

    /// A healthy reference state: 150k collateral, 100k debt, 80% threshold,
    /// health factor 1.2.
    pub fn sample_state() -> RawAccountState {
        RawAccountState {
            total_collateral: U256::from(15_000_000_000_000u64),
            total_debt: U256::from(10_000_000_000_000u64),
            available_borrows: U256::from(2_000_000_000_000u64),
            liquidation_threshold: U256::from(8000u64),
            health_factor: U256::from(1_200_000_000_000_000_000u64),
            owner: Address::repeat_byte(0x42),
        }
    }
}

impl Default for MockAccountSource {
    fn default() -> Self {
        Self::new(Self::sample_state())
    }
}

#[async_trait]
impl AccountDataSource for MockAccountSource {
    async fn fetch_account_state(&self) -> Result<RawAccountState, DataSourceError> {
        self.result
            .lock()
            .unwrap()
            .clone()
            .map_err(DataSourceError::ContractRead)
    }
}
