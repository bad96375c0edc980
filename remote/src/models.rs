use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    #[default]
    Invalid,
    Buy,
    Sell,
    SellShort,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderSide::Invalid => "Invalid",
            OrderSide::Buy => "Buy",
            OrderSide::Sell => "Sell",
            OrderSide::SellShort => "SellShort",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[default]
    Market,
    Limit,
    Stop,
    StopLimit,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderType::Market => "Market",
            OrderType::Limit => "Limit",
            OrderType::Stop => "Stop",
            OrderType::StopLimit => "StopLimit",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    None,
    Submitted,
    Executed,
    Cancelled,
    Pending,
    Partial,
    Replaced,
    Rejected,
    ReplaceRejected,
    CancelRejected,
    Expired,
    CancelPending,
    ReplacePending,
    Suspended,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderStatus::None => "None",
            OrderStatus::Submitted => "Submitted",
            OrderStatus::Executed => "Executed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Pending => "Pending",
            OrderStatus::Partial => "Partial",
            OrderStatus::Replaced => "Replaced",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::ReplaceRejected => "ReplaceRejected",
            OrderStatus::CancelRejected => "CancelRejected",
            OrderStatus::Expired => "Expired",
            OrderStatus::CancelPending => "CancelPending",
            OrderStatus::ReplacePending => "ReplacePending",
            OrderStatus::Suspended => "Suspended",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    #[default]
    Day,
    Gtc,
    Ioc,
    Fok,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeInForce::Day => "Day",
            TimeInForce::Gtc => "Gtc",
            TimeInForce::Ioc => "Ioc",
            TimeInForce::Fok => "Fok",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionAction {
    #[default]
    Unknown,
    ManualAdjustment,
    Bought,
    Sold,
    BoughtCover,
    SoldShort,
    Dividend,
    Split,
    Expiration,
    Exercise,
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionAction::Unknown => "Unknown",
            TransactionAction::ManualAdjustment => "ManualAdjustment",
            TransactionAction::Bought => "Bought",
            TransactionAction::Sold => "Sold",
            TransactionAction::BoughtCover => "BoughtCover",
            TransactionAction::SoldShort => "SoldShort",
            TransactionAction::Dividend => "Dividend",
            TransactionAction::Split => "Split",
            TransactionAction::Expiration => "Expiration",
            TransactionAction::Exercise => "Exercise",
        })
    }
}

/// One order as reported by the strategy process. Price fields are 0
/// when the order type does not carry them; empty strings stand for
/// absent ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub request_id: String,
    pub strategy_id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub quantity: f64,
    pub order_type: OrderType,
    pub price: f64,
    pub stop_price: f64,
    pub time_in_force: TimeInForce,
    pub status: OrderStatus,
    pub timestamp: Option<NaiveDateTime>,
    pub last_filled_quantity: f64,
    pub last_filled_price: f64,
    pub total_filled_quantity: f64,
    pub total_filled_avg_price: f64,
    pub description: String,
}

impl Order {
    fn parameters(&self) -> String {
        match self.order_type {
            OrderType::Market => "MKT".to_string(),
            OrderType::Limit => format!("LMT @{}", self.price),
            OrderType::Stop => format!("STP @{}", self.stop_price),
            OrderType::StopLimit => format!("STPLMT @{}::{}", self.stop_price, self.price),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}): {}{}x{} {}: {}",
            or_placeholder(&self.request_id, "<no-id>"),
            or_placeholder(&self.strategy_id, "<no-strat>"),
            self.side,
            self.quantity,
            or_placeholder(&self.symbol, "<no-symbol>"),
            self.parameters(),
            self.status
        )?;
        if let Some(timestamp) = self.timestamp {
            write!(f, " {}", timestamp.format(LOG_TIMESTAMP_FORMAT))?;
        }
        Ok(())
    }
}

/// One fill or cash event booked against a strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub timestamp: Option<NaiveDateTime>,
    pub strategy_id: String,
    pub order_request_id: String,
    pub symbol: String,
    pub quantity: i64,
    pub price: f64,
    pub action: TransactionAction,
    pub commission: f64,
    pub description: String,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}): {} {}x{} @{}",
            or_placeholder(&self.order_request_id, "<no-id>"),
            or_placeholder(&self.strategy_id, "<no-strat>"),
            self.action,
            self.quantity,
            or_placeholder(&self.symbol, "<no-symbol>"),
            self.price
        )?;
        if self.commission != 0.0 {
            write!(f, " comm=${}", self.commission)?;
        }
        if let Some(timestamp) = self.timestamp {
            write!(f, " {}", timestamp.format(LOG_TIMESTAMP_FORMAT))?;
        }
        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }
        Ok(())
    }
}

/// One per-symbol PnL breakdown row for a record date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedPnlEntry {
    pub record_date: NaiveDate,
    pub strategy: String,
    pub symbol: String,
    pub last_close_position: f64,
    pub last_close_price: f64,
    pub last_close_market_value: f64,
    pub transaction_count: i64,
    pub bought_amount: f64,
    pub bought_avg_price: f64,
    pub sold_amount: f64,
    pub sold_avg_price: f64,
    pub manual_adjustments: f64,
    pub other_transactions: i64,
    pub avg_price_since_open: f64,
    pub current_position: f64,
    pub current_price: f64,
    pub current_market_value: f64,
    pub realized_pnl: f64,
    pub unrealized_pnl: f64,
    pub total_pnl: f64,
}

impl fmt::Display for DetailedPnlEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RecordDate: {}, Strategy: {}, Symbol: {}, LastClosePosition: {}, \
             LastClosePrice: {}, LastCloseMarketValue: {}, TransactionCount: {}, \
             BoughtAmount: {}, BoughtAvgPrice: {}, SoldAmount: {}, SoldAvgPrice: {}, \
             ManualAdjustments: {}, OtherTransactions: {}, AvgPriceSinceOpen: {}, \
             CurrentPosition: {}, CurrentPrice: {}, CurrentMarketValue: {}, \
             RealizedPnl: {}, UnrealizedPnl: {}, TotalPnl: {}",
            self.record_date.format("%Y/%m/%d"),
            self.strategy,
            self.symbol,
            self.last_close_position,
            self.last_close_price,
            self.last_close_market_value,
            self.transaction_count,
            self.bought_amount,
            self.bought_avg_price,
            self.sold_amount,
            self.sold_avg_price,
            self.manual_adjustments,
            self.other_transactions,
            self.avg_price_since_open,
            self.current_position,
            self.current_price,
            self.current_market_value,
            self.realized_pnl,
            self.unrealized_pnl,
            self.total_pnl
        )
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}
