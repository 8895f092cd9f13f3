use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::FuturesTrading;
use crate::core::types::{OrderResult, OrderSide, OrderType, PositionSide};
use crate::exchanges::delta::conversions::{
    closing_side, format_quantity, new_client_order_id, order_side_from_delta,
    order_side_to_delta, order_type_to_delta,
};
use crate::exchanges::delta::product::ProductResolver;
use crate::exchanges::delta::rest::DeltaRestClient;
use crate::exchanges::delta::types::{DeltaOrder, DeltaOrderRequest};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{error, instrument};

/// Trading implementation for Delta Exchange.
///
/// Every mutating method is two-phase: resolve the symbol to a product id,
/// then issue exactly one mutating request. A resolution failure aborts
/// before anything is sent, so no operation partially applies.
pub struct Trading<R: RestClient> {
    rest: DeltaRestClient<R>,
    products: ProductResolver<R>,
}

impl<R: RestClient> Trading<R> {
    pub fn new(rest: &R) -> Self
    where
        R: Clone,
    {
        Self {
            rest: DeltaRestClient::new(rest.clone()),
            products: ProductResolver::new(rest.clone()),
        }
    }

    fn market_order(
        product_id: i64,
        size: Decimal,
        side: OrderSide,
        leverage: Option<u32>,
        reduce_only: bool,
    ) -> DeltaOrderRequest {
        DeltaOrderRequest {
            product_id,
            size,
            side: order_side_to_delta(side).to_string(),
            order_type: order_type_to_delta(OrderType::Market).to_string(),
            leverage,
            reduce_only: reduce_only.then_some(true),
            stop_price: None,
            limit_price: None,
            client_order_id: Some(new_client_order_id()),
        }
    }

    async fn submit_order(
        &self,
        order: DeltaOrderRequest,
        operation: &'static str,
    ) -> Result<OrderResult, ExchangeError> {
        let response = self.rest.place_order(&order).await?;

        if !response.success {
            return Err(handle_order_rejection(operation, order.product_id));
        }

        Ok(convert_order(response.result))
    }
}

/// Helper to surface an exchange-side order rejection
#[cold]
#[inline(never)]
fn handle_order_rejection(operation: &'static str, product_id: i64) -> ExchangeError {
    error!(product_id, operation, "order rejected by exchange");
    ExchangeError::ExchangeRejection { operation }
}

fn convert_order(raw: DeltaOrder) -> OrderResult {
    OrderResult {
        order_id: raw.id,
        client_order_id: raw.client_order_id,
        product_id: raw.product_id,
        side: order_side_from_delta(&raw.side),
        size: raw.size,
        state: raw.state,
    }
}

#[async_trait]
impl<R: RestClient> FuturesTrading for Trading<R> {
    #[instrument(skip(self), fields(exchange = "delta", symbol = %symbol))]
    async fn open_long(
        &self,
        symbol: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<OrderResult, ExchangeError> {
        let product_id = self.products.resolve(symbol).await?;
        let order = Self::market_order(product_id, quantity, OrderSide::Buy, Some(leverage), false);
        self.submit_order(order, "open_long").await
    }

    #[instrument(skip(self), fields(exchange = "delta", symbol = %symbol))]
    async fn open_short(
        &self,
        symbol: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<OrderResult, ExchangeError> {
        let product_id = self.products.resolve(symbol).await?;
        let order =
            Self::market_order(product_id, quantity, OrderSide::Sell, Some(leverage), false);
        self.submit_order(order, "open_short").await
    }

    #[instrument(skip(self), fields(exchange = "delta", symbol = %symbol))]
    async fn close_long(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResult, ExchangeError> {
        let product_id = self.products.resolve(symbol).await?;
        // Reduce-only so the exchange rejects a flip instead of opening a short
        let order = Self::market_order(product_id, quantity, OrderSide::Sell, None, true);
        self.submit_order(order, "close_long").await
    }

    #[instrument(skip(self), fields(exchange = "delta", symbol = %symbol))]
    async fn close_short(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResult, ExchangeError> {
        let product_id = self.products.resolve(symbol).await?;
        let order = Self::market_order(product_id, quantity, OrderSide::Buy, None, true);
        self.submit_order(order, "close_short").await
    }

    #[instrument(skip(self), fields(exchange = "delta", symbol = %symbol))]
    async fn set_leverage(&self, symbol: &str, leverage: u32) -> Result<(), ExchangeError> {
        let product_id = self.products.resolve(symbol).await?;
        let response = self.rest.change_position_margin(product_id, leverage).await?;

        if !response.success {
            return Err(ExchangeError::ExchangeRejection {
                operation: "set_leverage",
            });
        }

        Ok(())
    }

    #[instrument(skip(self), fields(exchange = "delta", symbol = %symbol, position_side = %position_side))]
    async fn set_stop_loss(
        &self,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Result<(), ExchangeError> {
        let product_id = self.products.resolve(symbol).await?;

        let order = DeltaOrderRequest {
            product_id,
            size: quantity,
            side: order_side_to_delta(closing_side(position_side)).to_string(),
            order_type: order_type_to_delta(OrderType::StopLoss).to_string(),
            leverage: None,
            reduce_only: Some(true),
            stop_price: Some(stop_price),
            limit_price: None,
            client_order_id: Some(new_client_order_id()),
        };

        self.submit_order(order, "set_stop_loss").await?;
        Ok(())
    }

    #[instrument(skip(self), fields(exchange = "delta", symbol = %symbol, position_side = %position_side))]
    async fn set_take_profit(
        &self,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        take_profit_price: Decimal,
    ) -> Result<(), ExchangeError> {
        let product_id = self.products.resolve(symbol).await?;

        let order = DeltaOrderRequest {
            product_id,
            size: quantity,
            side: order_side_to_delta(closing_side(position_side)).to_string(),
            order_type: order_type_to_delta(OrderType::TakeProfit).to_string(),
            leverage: None,
            reduce_only: Some(true),
            stop_price: None,
            limit_price: Some(take_profit_price),
            client_order_id: Some(new_client_order_id()),
        };

        self.submit_order(order, "set_take_profit").await?;
        Ok(())
    }

    #[instrument(skip(self), fields(exchange = "delta", symbol = %symbol))]
    async fn cancel_all_orders(&self, symbol: &str) -> Result<(), ExchangeError> {
        // Scoped to this product only; other symbols' orders are untouched
        let product_id = self.products.resolve(symbol).await?;
        let response = self.rest.cancel_all_orders(product_id).await?;

        if !response.success {
            return Err(ExchangeError::ExchangeRejection {
                operation: "cancel_all_orders",
            });
        }

        Ok(())
    }

    fn format_quantity(&self, _symbol: &str, quantity: Decimal) -> String {
        // The symbol parameter is kept for a future lot-size-aware
        // implementation; Delta accepts eight decimals everywhere we trade.
        format_quantity(quantity)
    }
}
