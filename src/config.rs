use alloy::primitives::Address;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Process-lifetime policy configuration. Built once at startup from the
/// environment, then only ever passed around by reference or cheap clone.
#[derive(Debug, Clone)]
pub struct Config {
    pub contract_address: Address,
    pub target_hf: Decimal,
    pub tolerance: Decimal,
    pub refresh_interval_secs: u64,
    pub rpc_url: String,
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let contract_address = env_map
            .get("CONTRACT_ADDRESS")
            .map(|s| s.as_str())
            .unwrap_or("0x18D8B7045BbBC2163FF0270b6e4cF8F8Db9624f5")
            .parse::<Address>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "CONTRACT_ADDRESS".to_string(),
                    "must be a 20-byte hex address".to_string(),
                )
            })?;

        let target_hf = parse_decimal(&env_map, "TARGET_HF", "1.25")?;
        if target_hf <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue(
                "TARGET_HF".to_string(),
                "must be positive".to_string(),
            ));
        }

        // tolerance > 0 keeps lowerBound < target < upperBound.
        let tolerance = parse_decimal(&env_map, "TOLERANCE", "0.05")?;
        if tolerance <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue(
                "TOLERANCE".to_string(),
                "must be positive".to_string(),
            ));
        }

        let refresh_interval_secs = env_map
            .get("REFRESH_INTERVAL")
            .map(|s| s.as_str())
            .unwrap_or("20")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "REFRESH_INTERVAL".to_string(),
                    "must be a whole number of seconds".to_string(),
                )
            })?;
        if refresh_interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "REFRESH_INTERVAL".to_string(),
                "must be at least 1 second".to_string(),
            ));
        }

        let rpc_url = env_map
            .get("RPC_URL")
            .cloned()
            .unwrap_or_else(|| "https://arb1.arbitrum.io/rpc".to_string());

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("3000")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let static_dir = env_map
            .get("STATIC_DIR")
            .cloned()
            .unwrap_or_else(|| "public".to_string());

        Ok(Config {
            contract_address,
            target_hf,
            tolerance,
            refresh_interval_secs,
            rpc_url,
            port,
            static_dir,
        })
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

fn parse_decimal(
    env_map: &HashMap<String, String>,
    key: &str,
    default: &str,
) -> Result<Decimal, ConfigError> {
    Decimal::from_str(env_map.get(key).map(|s| s.as_str()).unwrap_or(default)).map_err(|_| {
        ConfigError::InvalidValue(key.to_string(), "must be a decimal number".to_string())
    })
}
