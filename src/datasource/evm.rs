//! On-chain account source backed by a JSON-RPC `eth_call` provider.

use super::{AccountDataSource, DataSourceError};
use crate::domain::RawAccountState;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use async_trait::async_trait;
use tracing::debug;

sol! {
    #[sol(rpc)]
    interface ILeverVault {
        function getAccountData() external view returns (
            uint256 totalCollateral,
            uint256 totalDebt,
            uint256 availableBorrows,
            uint256 liquidationThreshold,
            uint256 healthFactor
        );
        function owner() external view returns (address);
    }
}

/// Reads the lever vault's account data and owner with two concurrent
/// `eth_call`s per fetch.
#[derive(Clone)]
pub struct EvmAccountSource {
    provider: DynProvider,
    contract_address: Address,
}

impl EvmAccountSource {
    pub fn new(rpc_url: &str, contract_address: Address) -> Result<Self, DataSourceError> {
        let url = rpc_url
            .parse()
            .map_err(|e| DataSourceError::InvalidEndpoint(format!("{}: {}", rpc_url, e)))?;
        let provider = ProviderBuilder::new().connect_http(url).erased();
        Ok(Self {
            provider,
            contract_address,
        })
    }
}

#[async_trait]
impl AccountDataSource for EvmAccountSource {
    async fn fetch_account_state(&self) -> Result<RawAccountState, DataSourceError> {
        debug!(contract = %self.contract_address, "fetching account data");

        let vault = ILeverVault::new(self.contract_address, self.provider.clone());
        let (account, owner) = tokio::try_join!(
            async {
                vault
                    .getAccountData()
                    .call()
                    .await
                    .map_err(|e| DataSourceError::ContractRead(e.to_string()))
            },
            async {
                vault
                    .owner()
                    .call()
                    .await
                    .map_err(|e| DataSourceError::ContractRead(e.to_string()))
            },
        )?;

        Ok(RawAccountState {
            total_collateral: account.totalCollateral,
            total_debt: account.totalDebt,
            available_borrows: account.availableBorrows,
            liquidation_threshold: account.liquidationThreshold,
            health_factor: account.healthFactor,
            owner,
        })
    }
}
