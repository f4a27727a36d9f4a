//! Account data source abstraction: the one async, fallible boundary of the
//! monitor.

use crate::domain::RawAccountState;
use async_trait::async_trait;
use thiserror::Error;

pub mod evm;
pub mod mock;

pub use evm::EvmAccountSource;
pub use mock::MockAccountSource;

/// Read-only access to the current on-chain account state.
///
/// One attempt per call: retry policy belongs to the caller's cadence, not
/// here. A failed read is transient and the next tick simply tries again.
#[async_trait]
pub trait AccountDataSource: Send + Sync {
    async fn fetch_account_state(&self) -> Result<RawAccountState, DataSourceError>;
}

/// Error type for account data source operations.
#[derive(Debug, Clone, Error)]
pub enum DataSourceError {
    #[error("Invalid RPC endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Contract read failed: {0}")]
    ContractRead(String),
}
