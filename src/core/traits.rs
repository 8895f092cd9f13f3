use crate::core::{
    errors::ExchangeError,
    types::{BalanceSnapshot, OrderResult, Position, PositionSide},
};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Account state queries.
#[async_trait]
pub trait AccountInfo {
    /// Balance snapshot for the settlement currency. Never fails solely
    /// because the currency has no entry; that returns the zero snapshot.
    async fn get_balance(&self) -> Result<BalanceSnapshot, ExchangeError>;

    /// All open (non-zero size) positions, in the exchange's response order.
    async fn get_positions(&self) -> Result<Vec<Position>, ExchangeError>;
}

/// Leveraged futures order operations.
///
/// Every mutating method resolves the symbol to the exchange's numeric
/// product id first and aborts before issuing any order if resolution
/// fails. There is no partial application: leverage changes and order
/// placement are separate top-level calls, never chained silently.
#[async_trait]
pub trait FuturesTrading {
    async fn open_long(
        &self,
        symbol: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<OrderResult, ExchangeError>;

    async fn open_short(
        &self,
        symbol: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<OrderResult, ExchangeError>;

    /// Close (part of) a long with a reduce-only market sell.
    async fn close_long(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResult, ExchangeError>;

    /// Close (part of) a short with a reduce-only market buy.
    async fn close_short(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResult, ExchangeError>;

    async fn set_leverage(&self, symbol: &str, leverage: u32) -> Result<(), ExchangeError>;

    /// Reduce-only stop order. The order side is derived from the position
    /// side (buy iff the position is short), never passed by the caller.
    async fn set_stop_loss(
        &self,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Result<(), ExchangeError>;

    /// Reduce-only take-profit order; same side derivation as stops.
    async fn set_take_profit(
        &self,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        take_profit_price: Decimal,
    ) -> Result<(), ExchangeError>;

    /// Cancel every open order for this symbol's product, and only this
    /// product.
    async fn cancel_all_orders(&self, symbol: &str) -> Result<(), ExchangeError>;

    /// Render a quantity to the precision the exchange expects.
    fn format_quantity(&self, symbol: &str, quantity: Decimal) -> String;
}

/// Public market data queries.
#[async_trait]
pub trait MarketDataSource {
    /// Last traded (close) price for a symbol.
    async fn get_market_price(&self, symbol: &str) -> Result<Decimal, ExchangeError>;
}

// Composite trait for callers that need the full capability set
pub trait ExchangeConnector: MarketDataSource + FuturesTrading + AccountInfo {}
