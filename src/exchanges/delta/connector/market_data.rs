use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::MarketDataSource;
use crate::exchanges::delta::rest::DeltaRestClient;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::instrument;

/// Market data implementation for Delta Exchange
pub struct MarketData<R: RestClient> {
    rest: DeltaRestClient<R>,
}

impl<R: RestClient> MarketData<R> {
    pub fn new(rest: &R) -> Self
    where
        R: Clone,
    {
        Self {
            rest: DeltaRestClient::new(rest.clone()),
        }
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for MarketData<R> {
    #[instrument(skip(self), fields(exchange = "delta", symbol = %symbol))]
    async fn get_market_price(&self, symbol: &str) -> Result<Decimal, ExchangeError> {
        let response = self.rest.get_ticker(symbol).await?;

        if !response.success {
            return Err(ExchangeError::ExchangeRejection {
                operation: "get_market_price",
            });
        }

        Ok(response.result.close)
    }
}
