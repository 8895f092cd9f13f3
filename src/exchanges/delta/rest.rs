use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::delta::types::{
    DeltaApiResponse, DeltaBalance, DeltaOrder, DeltaOrderRequest, DeltaPosition, DeltaProduct,
    DeltaTicker,
};
use reqwest::Method;
use serde_json::Value;

/// Thin typed wrapper around `RestClient` for the Delta Exchange API
pub struct DeltaRestClient<R: RestClient> {
    client: R,
}

impl<R: RestClient> DeltaRestClient<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    /// Get wallet balances for every asset on the account
    pub async fn get_wallet_balances(
        &self,
    ) -> Result<DeltaApiResponse<Vec<DeltaBalance>>, ExchangeError> {
        self.client.get_json("/v2/wallet/balances", &[], true).await
    }

    /// Get all positions
    pub async fn get_positions(
        &self,
    ) -> Result<DeltaApiResponse<Vec<DeltaPosition>>, ExchangeError> {
        self.client.get_json("/v2/positions", &[], true).await
    }

    /// Get the full product catalog
    pub async fn get_products(
        &self,
    ) -> Result<DeltaApiResponse<Vec<DeltaProduct>>, ExchangeError> {
        self.client.get_json("/v2/products", &[], false).await
    }

    /// Get the ticker for one symbol
    pub async fn get_ticker(
        &self,
        symbol: &str,
    ) -> Result<DeltaApiResponse<DeltaTicker>, ExchangeError> {
        let endpoint = format!("/v2/tickers/{}", symbol);
        self.client.get_json(&endpoint, &[], false).await
    }

    /// Place an order
    pub async fn place_order(
        &self,
        order: &DeltaOrderRequest,
    ) -> Result<DeltaApiResponse<DeltaOrder>, ExchangeError> {
        let body = serde_json::to_value(order)?;
        self.client.post_json("/v2/orders", &body, true).await
    }

    /// Change position margin (leverage) for a product
    pub async fn change_position_margin(
        &self,
        product_id: i64,
        leverage: u32,
    ) -> Result<DeltaApiResponse<Value>, ExchangeError> {
        let body = serde_json::json!({
            "product_id": product_id,
            "leverage": leverage,
        });
        self.client
            .post_json("/v2/positions/change_margin", &body, true)
            .await
    }

    /// Cancel every open order for one product.
    ///
    /// Delta scopes the bulk cancel by a JSON body on a DELETE request, so
    /// this goes through the kernel's raw signed-request path.
    pub async fn cancel_all_orders(
        &self,
        product_id: i64,
    ) -> Result<DeltaApiResponse<Value>, ExchangeError> {
        let body = serde_json::to_vec(&serde_json::json!({ "product_id": product_id }))
            .map_err(|e| {
                ExchangeError::SerializationError(format!(
                    "Failed to serialize cancel request: {}",
                    e
                ))
            })?;
        self.client
            .signed_request_json(Method::DELETE, "/v2/orders/all", &[], &body)
            .await
    }
}
