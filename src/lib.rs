pub mod api;
pub mod config;
pub mod datasource;
pub mod distributor;
pub mod domain;
pub mod engine;

pub use config::{Config, ConfigError};
pub use datasource::{AccountDataSource, DataSourceError, EvmAccountSource, MockAccountSource};
pub use distributor::Distributor;
pub use domain::{RawAccountState, RebalanceAction, RiskLevel, Snapshot};
pub use engine::evaluate;
