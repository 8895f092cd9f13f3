use crate::core::types::{OrderSide, OrderType, Position, PositionSide};
use crate::exchanges::delta::types::DeltaPosition;
use rust_decimal::Decimal;

pub fn order_side_to_delta(side: OrderSide) -> &'static str {
    match side {
        OrderSide::Buy => "buy",
        OrderSide::Sell => "sell",
    }
}

pub fn order_type_to_delta(order_type: OrderType) -> &'static str {
    match order_type {
        OrderType::Market => "market_order",
        OrderType::StopLoss => "stop_loss_order",
        OrderType::TakeProfit => "take_profit_order",
    }
}

pub fn order_side_from_delta(side: &str) -> OrderSide {
    if side.eq_ignore_ascii_case("sell") {
        OrderSide::Sell
    } else {
        OrderSide::Buy
    }
}

/// The order side that closes a position: a stop or take-profit must move
/// opposite to the position, otherwise it would extend exposure instead of
/// protecting it. Buy if and only if the position is short.
pub fn closing_side(position_side: PositionSide) -> OrderSide {
    match position_side {
        PositionSide::Short => OrderSide::Buy,
        PositionSide::Long => OrderSide::Sell,
    }
}

/// Map a Delta position record to the canonical shape, normalizing the
/// side to upper case. When Delta reports a side string we don't
/// recognize, the sign of the size decides.
pub fn convert_position(raw: DeltaPosition) -> Position {
    let side = PositionSide::parse(&raw.side).unwrap_or(if raw.size < Decimal::ZERO {
        PositionSide::Short
    } else {
        PositionSide::Long
    });

    Position {
        symbol: raw.symbol,
        size: raw.size,
        entry_price: raw.entry_price,
        mark_price: raw.mark_price,
        unrealized_pnl: raw.unrealized_pnl,
        pnl_percent: raw.unrealized_pnl_percent,
        side,
        leverage: raw.leverage,
    }
}

/// Render a quantity with exactly eight digits after the decimal point.
///
/// This matches what Delta accepts for every contract seen so far; it does
/// NOT consult per-symbol tick/lot metadata, so a product with a coarser
/// step size relies on exchange-side rounding or rejection.
pub fn format_quantity(quantity: Decimal) -> String {
    let rounded = quantity.round_dp(8);
    let s = rounded.to_string();
    match s.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{:0<8}", int_part, frac_part),
        None => format!("{}.00000000", s),
    }
}

/// Random token attached to order placements as `client_order_id`, so a
/// retried submission after an ambiguous timeout cannot double-fill.
pub fn new_client_order_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn closing_side_is_buy_iff_short() {
        assert_eq!(closing_side(PositionSide::Short), OrderSide::Buy);
        assert_eq!(closing_side(PositionSide::Long), OrderSide::Sell);
    }

    #[test]
    fn format_quantity_always_eight_decimals() {
        assert_eq!(format_quantity(dec!(0.000001)), "0.00000100");
        assert_eq!(format_quantity(dec!(100000)), "100000.00000000");
        assert_eq!(format_quantity(dec!(0.1)), "0.10000000");
        assert_eq!(format_quantity(dec!(1)), "1.00000000");
        assert_eq!(format_quantity(dec!(12345.6789)), "12345.67890000");
        assert_eq!(format_quantity(dec!(0)), "0.00000000");
    }

    #[test]
    fn format_quantity_rounds_excess_precision() {
        assert_eq!(format_quantity(dec!(0.123456789)), "0.12345679");
    }

    #[test]
    fn client_order_ids_are_unique_tokens() {
        let a = new_client_order_id();
        let b = new_client_order_id();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }
}
