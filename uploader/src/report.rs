use std::io::Write;

use chrono::NaiveDateTime;
use remote::{display_symbol, DetailedPnlEntry, Order, Transaction};

use crate::errors::Result;

const REPORT_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.3f";

const ORDER_COLUMNS: [&str; 16] = [
    "RequestId",
    "StrategyId",
    "Symbol",
    "Side",
    "Quantity",
    "Type",
    "Price",
    "StopPrice",
    "TimeInForce",
    "Status",
    "Timestamp",
    "LastFilledQuantity",
    "LastFilledPrice",
    "TotalFilledQuantity",
    "TotalFilledAvgPrice",
    "Description",
];

const TRANSACTION_COLUMNS: [&str; 9] = [
    "Timestamp",
    "StrategyId",
    "OrderRequestId",
    "Symbol",
    "Quantity",
    "Price",
    "Action",
    "Commission",
    "Description",
];

const PNL_COLUMNS: [&str; 19] = [
    "Strategy",
    "Symbol",
    "LastClosePosition",
    "LastClosePrice",
    "LastCloseMarketValue",
    "TransactionCount",
    "BoughtAmount",
    "BoughtAvgPrice",
    "SoldAmount",
    "SoldAvgPrice",
    "ManualAdjustments",
    "OtherTransactions",
    "AvgPriceSinceOpen",
    "CurrentPosition",
    "CurrentPrice",
    "CurrentMarketValue",
    "RealizedPnl",
    "UnrealizedPnl",
    "TotalPnl",
];

pub fn write_orders<W: Write>(output: W, orders: &[Order]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(output);
    writer.write_record(ORDER_COLUMNS)?;
    for order in orders {
        writer.write_record(&[
            order.request_id.clone(),
            order.strategy_id.clone(),
            display_symbol(&order.symbol),
            order.side.to_string(),
            order.quantity.to_string(),
            order.order_type.to_string(),
            order.price.to_string(),
            order.stop_price.to_string(),
            order.time_in_force.to_string(),
            order.status.to_string(),
            format_timestamp(order.timestamp),
            order.last_filled_quantity.to_string(),
            order.last_filled_price.to_string(),
            order.total_filled_quantity.to_string(),
            order.total_filled_avg_price.to_string(),
            order.description.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_transactions<W: Write>(output: W, transactions: &[Transaction]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(output);
    writer.write_record(TRANSACTION_COLUMNS)?;
    for transaction in transactions {
        writer.write_record(&[
            format_timestamp(transaction.timestamp),
            transaction.strategy_id.clone(),
            transaction.order_request_id.clone(),
            display_symbol(&transaction.symbol),
            transaction.quantity.to_string(),
            transaction.price.to_string(),
            transaction.action.to_string(),
            transaction.commission.to_string(),
            transaction.description.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_pnl<W: Write>(output: W, entries: &[DetailedPnlEntry]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(output);
    writer.write_record(PNL_COLUMNS)?;
    for entry in entries {
        writer.write_record(&[
            entry.strategy.clone(),
            display_symbol(&entry.symbol),
            entry.last_close_position.to_string(),
            entry.last_close_price.to_string(),
            entry.last_close_market_value.to_string(),
            entry.transaction_count.to_string(),
            entry.bought_amount.to_string(),
            entry.bought_avg_price.to_string(),
            entry.sold_amount.to_string(),
            entry.sold_avg_price.to_string(),
            entry.manual_adjustments.to_string(),
            entry.other_transactions.to_string(),
            entry.avg_price_since_open.to_string(),
            entry.current_position.to_string(),
            entry.current_price.to_string(),
            entry.current_market_value.to_string(),
            entry.realized_pnl.to_string(),
            entry.unrealized_pnl.to_string(),
            entry.total_pnl.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn format_timestamp(timestamp: Option<NaiveDateTime>) -> String {
    timestamp
        .map(|t| t.format(REPORT_TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use remote::{OrderSide, OrderStatus, OrderType, TimeInForce, TransactionAction};

    fn render<F: FnOnce(&mut Vec<u8>)>(write: F) -> String {
        let mut buffer = Vec::new();
        write(&mut buffer);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_order_report_row() {
        let order = Order {
            request_id: "ORD-1".to_string(),
            strategy_id: "alpha".to_string(),
            symbol: "BRK-B".to_string(),
            side: OrderSide::Buy,
            quantity: 100.0,
            order_type: OrderType::Limit,
            price: 42.5,
            stop_price: 0.0,
            time_in_force: TimeInForce::Day,
            status: OrderStatus::Submitted,
            timestamp: NaiveDate::from_ymd_opt(2023, 1, 15)
                .unwrap()
                .and_hms_opt(9, 30, 0),
            ..Order::default()
        };
        let text = render(|buffer| write_orders(buffer, &[order]).unwrap());
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), ORDER_COLUMNS.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "ORD-1,alpha,BRK/B,Buy,100,Limit,42.5,0,Day,Submitted,\
             2023/01/15 09:30:00.000,0,0,0,0,"
        );
    }

    #[test]
    fn test_transaction_report_row() {
        let transaction = Transaction {
            timestamp: NaiveDate::from_ymd_opt(2023, 1, 15)
                .unwrap()
                .and_hms_opt(9, 30, 0),
            strategy_id: "alpha".to_string(),
            order_request_id: "ORD-1".to_string(),
            symbol: "AAPL".to_string(),
            quantity: 100,
            price: 42.5,
            action: TransactionAction::Bought,
            commission: 1.5,
            description: "fill".to_string(),
        };
        let text = render(|buffer| write_transactions(buffer, &[transaction]).unwrap());
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), TRANSACTION_COLUMNS.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "2023/01/15 09:30:00.000,alpha,ORD-1,AAPL,100,42.5,Bought,1.5,fill"
        );
    }

    #[test]
    fn test_pnl_report_row() {
        let entry = DetailedPnlEntry {
            record_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            strategy: "alpha".to_string(),
            symbol: "BRK-B".to_string(),
            last_close_position: 100.0,
            last_close_price: 42.0,
            last_close_market_value: 4200.0,
            transaction_count: 2,
            bought_amount: 50.0,
            bought_avg_price: 41.5,
            sold_amount: 0.0,
            sold_avg_price: 0.0,
            manual_adjustments: 0.0,
            other_transactions: 0,
            avg_price_since_open: 41.5,
            current_position: 150.0,
            current_price: 43.0,
            current_market_value: 6450.0,
            realized_pnl: 0.0,
            unrealized_pnl: 175.0,
            total_pnl: 175.0,
        };
        let text = render(|buffer| write_pnl(buffer, &[entry]).unwrap());
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), PNL_COLUMNS.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "alpha,BRK/B,100,42,4200,2,50,41.5,0,0,0,0,41.5,150,43,6450,0,175,175"
        );
    }

    #[test]
    fn test_empty_report_is_header_only() {
        let text = render(|buffer| write_orders(buffer, &[]).unwrap());
        assert_eq!(text, format!("{}\n", ORDER_COLUMNS.join(",")));
    }
}
