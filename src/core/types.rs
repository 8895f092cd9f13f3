use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an existing position.
///
/// Wire values are case-normalized: callers always see `LONG`/`SHORT`
/// regardless of how the exchange spells the side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Long => "LONG",
            Self::Short => "SHORT",
        }
    }

    /// Parse an exchange-reported side, any casing.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "LONG" | "BUY" => Some(Self::Long),
            "SHORT" | "SELL" => Some(Self::Short),
            _ => None,
        }
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => f.write_str("buy"),
            Self::Sell => f.write_str("sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    StopLoss,
    TakeProfit,
}

/// Wallet balance in the settlement currency.
///
/// All three fields are zero when the account holds no record for the
/// settlement currency; that case is a valid snapshot, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub total_wallet_balance: Decimal,
    pub available_balance: Decimal,
    pub total_margin_balance: Decimal,
}

impl BalanceSnapshot {
    /// The all-zero snapshot returned when the settlement currency has no
    /// balance entry.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }
}

/// One open position, normalized from the exchange's response.
///
/// Zero-size records represent closed positions and are filtered out
/// before a listing ever reaches a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    /// Signed size; negative for shorts on exchanges that report it that way.
    pub size: Decimal,
    pub entry_price: Decimal,
    pub mark_price: Decimal,
    pub unrealized_pnl: Decimal,
    pub pnl_percent: Decimal,
    pub side: PositionSide,
    pub leverage: i64,
}

/// Normalized result of a placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResult {
    pub order_id: i64,
    pub client_order_id: Option<String>,
    pub product_id: i64,
    pub side: OrderSide,
    pub size: Decimal,
    pub state: String,
}
