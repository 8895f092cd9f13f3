use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::AccountInfo;
use crate::core::types::{BalanceSnapshot, Position};
use crate::exchanges::delta::conversions::convert_position;
use crate::exchanges::delta::rest::DeltaRestClient;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::instrument;

/// Asset every Delta USDT-margined contract settles in.
const SETTLEMENT_ASSET: &str = "USDT";

/// Account implementation for Delta Exchange
pub struct Account<R: RestClient> {
    rest: DeltaRestClient<R>,
}

impl<R: RestClient> Account<R> {
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
impl<R: RestClient> AccountInfo for Account<R> {
    #[instrument(skip(self), fields(exchange = "delta"))]
    async fn get_balance(&self) -> Result<BalanceSnapshot, ExchangeError> {
        let response = self.rest.get_wallet_balances().await?;

        if !response.success {
            return Err(ExchangeError::ExchangeRejection {
                operation: "get_balance",
            });
        }

        // No settlement-currency entry means an empty wallet, not a failure
        let snapshot = response
            .result
            .into_iter()
            .find(|balance| balance.asset == SETTLEMENT_ASSET)
            .map_or_else(BalanceSnapshot::zero, |balance| BalanceSnapshot {
                total_wallet_balance: balance.balance,
                available_balance: balance.available_balance,
                total_margin_balance: balance.balance,
            });

        Ok(snapshot)
    }

    #[instrument(skip(self), fields(exchange = "delta"))]
    async fn get_positions(&self) -> Result<Vec<Position>, ExchangeError> {
        let response = self.rest.get_positions().await?;

        if !response.success {
            return Err(ExchangeError::ExchangeRejection {
                operation: "get_positions",
            });
        }

        // Zero size marks a closed position; callers never see those.
        // Response order is preserved.
        let positions = response
            .result
            .into_iter()
            .filter(|position| position.size != Decimal::ZERO)
            .map(convert_position)
            .collect();

        Ok(positions)
    }
}
