use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Delta wraps every response in a `{success, result}` envelope.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeltaApiResponse<T> {
    pub success: bool,
    pub result: T,
}

// Delta encodes monetary values as JSON strings, hence the
// `rust_decimal::serde::str` annotations on the wire structs below.

#[derive(Debug, Deserialize, Serialize)]
pub struct DeltaBalance {
    pub asset: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub available_balance: Decimal,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DeltaPosition {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub size: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub entry_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mark_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub unrealized_pnl: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub unrealized_pnl_percent: Decimal,
    pub side: String,
    pub leverage: i64,
}

/// Catalog entry: the symbol → numeric id mapping everything else needs.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeltaProduct {
    pub id: i64,
    pub symbol: String,
}

#[derive(Debug, Deserialize)]
pub struct DeltaTicker {
    #[serde(with = "rust_decimal::serde::str")]
    pub close: Decimal,
}

#[derive(Debug, Serialize)]
pub struct DeltaOrderRequest {
    pub product_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub size: Decimal,
    pub side: String,
    pub order_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leverage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::str_option"
    )]
    pub stop_price: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::str_option"
    )]
    pub limit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeltaOrder {
    pub id: i64,
    pub product_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub size: Decimal,
    pub side: String,
    pub state: String,
    #[serde(default)]
    pub client_order_id: Option<String>,
}
