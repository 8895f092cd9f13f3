use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::{AccountInfo, ExchangeConnector, FuturesTrading, MarketDataSource};
use crate::core::types::{BalanceSnapshot, OrderResult, Position, PositionSide};
use async_trait::async_trait;
use rust_decimal::Decimal;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// Delta Exchange connector that composes all sub-capability implementations
pub struct DeltaConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
}

impl<R: RestClient + Clone + Send + Sync> DeltaConnector<R> {
    pub fn new(rest: R) -> Self {
        Self {
            market: MarketData::new(&rest),
            trading: Trading::new(&rest),
            account: Account::new(&rest),
        }
    }
}

// Implement traits for the connector by delegating to sub-components
#[async_trait]
impl<R: RestClient + Clone + Send + Sync> AccountInfo for DeltaConnector<R> {
    async fn get_balance(&self) -> Result<BalanceSnapshot, ExchangeError> {
        self.account.get_balance().await
    }

    async fn get_positions(&self) -> Result<Vec<Position>, ExchangeError> {
        self.account.get_positions().await
    }
}

#[async_trait]
impl<R: RestClient + Clone + Send + Sync> MarketDataSource for DeltaConnector<R> {
    async fn get_market_price(&self, symbol: &str) -> Result<Decimal, ExchangeError> {
        self.market.get_market_price(symbol).await
    }
}

#[async_trait]
impl<R: RestClient + Clone + Send + Sync> FuturesTrading for DeltaConnector<R> {
    async fn open_long(
        &self,
        symbol: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<OrderResult, ExchangeError> {
        self.trading.open_long(symbol, quantity, leverage).await
    }

    async fn open_short(
        &self,
        symbol: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<OrderResult, ExchangeError> {
        self.trading.open_short(symbol, quantity, leverage).await
    }

    async fn close_long(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResult, ExchangeError> {
        self.trading.close_long(symbol, quantity).await
    }

    async fn close_short(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResult, ExchangeError> {
        self.trading.close_short(symbol, quantity).await
    }

    async fn set_leverage(&self, symbol: &str, leverage: u32) -> Result<(), ExchangeError> {
        self.trading.set_leverage(symbol, leverage).await
    }

    async fn set_stop_loss(
        &self,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Result<(), ExchangeError> {
        self.trading
            .set_stop_loss(symbol, position_side, quantity, stop_price)
            .await
    }

    async fn set_take_profit(
        &self,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        take_profit_price: Decimal,
    ) -> Result<(), ExchangeError> {
        self.trading
            .set_take_profit(symbol, position_side, quantity, take_profit_price)
            .await
    }

    async fn cancel_all_orders(&self, symbol: &str) -> Result<(), ExchangeError> {
        self.trading.cancel_all_orders(symbol).await
    }

    fn format_quantity(&self, symbol: &str, quantity: Decimal) -> String {
        self.trading.format_quantity(symbol, quantity)
    }
}

impl<R: RestClient + Clone + Send + Sync> ExchangeConnector for DeltaConnector<R> {}
