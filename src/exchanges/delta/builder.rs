use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::delta::{connector::DeltaConnector, signer::DeltaSigner};
use std::sync::Arc;

const MAINNET_URL: &str = "https://api.delta.exchange";
const TESTNET_URL: &str = "https://testnet-api.delta.exchange";

/// Create a Delta Exchange connector
pub fn build_connector(config: ExchangeConfig) -> Result<DeltaConnector<ReqwestRest>, ExchangeError> {
    let base_url = if config.testnet {
        TESTNET_URL.to_string()
    } else {
        config
            .base_url
            .clone()
            .unwrap_or_else(|| MAINNET_URL.to_string())
    };

    let rest_config = RestClientConfig::new(base_url, "delta".to_string()).with_timeout(30);

    let mut rest_builder = RestClientBuilder::new(rest_config);

    if config.has_credentials() {
        let signer = Arc::new(DeltaSigner::new(
            config.api_key().to_string(),
            config.secret_key().to_string(),
        ));
        rest_builder = rest_builder.with_signer(signer);
    }

    let rest = rest_builder.build()?;
    Ok(DeltaConnector::new(rest))
}
