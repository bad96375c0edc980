use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{GoalError, Result};

/// Desired and current position state for one instrument under one
/// strategy.
///
/// `target` is signed: positive means long, negative means short, zero
/// means no active target. Prices of 0 mean "not set". The
/// `current_*` bracket fields carry the bracket actually active at the
/// strategy, which lags the base bracket while a replacement recorded in
/// `next_bracket_effective_date` is pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    instrument: String,
    pub target: i64,
    pub take_profit_price: f64,
    pub stop_loss_price: f64,
    pub open_timestamp: Option<NaiveDate>,
    pub current_position: i64,
    pub avg_price: f64,
    pub realized_pnl: f64,
    pub next_bracket_effective_date: Option<NaiveDate>,
    pub current_take_profit_price: f64,
    pub current_stop_loss_price: f64,
}

impl Goal {
    pub fn new(instrument: impl Into<String>, target: i64) -> Result<Self> {
        let instrument = instrument.into();
        if instrument.is_empty() {
            return Err(GoalError::invalid_argument("instrument must not be empty"));
        }
        Ok(Goal {
            instrument,
            target,
            take_profit_price: 0.0,
            stop_loss_price: 0.0,
            open_timestamp: None,
            current_position: 0,
            avg_price: 0.0,
            realized_pnl: 0.0,
            next_bracket_effective_date: None,
            current_take_profit_price: 0.0,
            current_stop_loss_price: 0.0,
        })
    }

    /// Instrument symbol; the identity key within a goal set.
    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    /// Sets both the base and the currently active bracket.
    pub fn with_brackets(mut self, take_profit: f64, stop_loss: f64) -> Self {
        self.take_profit_price = take_profit;
        self.stop_loss_price = stop_loss;
        self.current_take_profit_price = take_profit;
        self.current_stop_loss_price = stop_loss;
        self
    }

    pub fn with_open_timestamp(mut self, date: NaiveDate) -> Self {
        self.open_timestamp = Some(date);
        self
    }

    pub fn with_position(
        mut self,
        current_position: i64,
        avg_price: f64,
        realized_pnl: f64,
    ) -> Self {
        self.current_position = current_position;
        self.avg_price = avg_price;
        self.realized_pnl = realized_pnl;
        self
    }

    /// Records a pending bracket replacement: the base bracket already
    /// holds the new prices, the given ones stay active until `effective`.
    pub fn with_pending_bracket(
        mut self,
        effective: NaiveDate,
        active_take_profit: f64,
        active_stop_loss: f64,
    ) -> Self {
        self.next_bracket_effective_date = Some(effective);
        self.current_take_profit_price = active_take_profit;
        self.current_stop_loss_price = active_stop_loss;
        self
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn price(value: f64) -> String {
            if value != 0.0 {
                format!("${:.2}", value)
            } else {
                "n/a".to_string()
            }
        }

        write!(
            f,
            "{:<5}x{:>6} limit={:>8} stop={:>8}",
            self.instrument,
            self.target,
            price(self.take_profit_price),
            price(self.stop_loss_price)
        )?;
        if let Some(opened) = self.open_timestamp {
            write!(f, " opened={}", opened.format("%m/%d/%Y"))?;
        }
        if self.current_position != 0 {
            write!(f, " curPos={}", self.current_position)?;
        }
        if self.avg_price != 0.0 {
            write!(f, " avgPrice=${}", self.avg_price)?;
        }
        Ok(())
    }
}

/// The full goal collection for one strategy, tagged with its name.
///
/// Treated as immutable once built; clone to get an independent copy. An
/// empty `strategy_name` means the name was not captured (empty parse
/// input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSet {
    pub strategy_name: String,
    pub goals: Vec<Goal>,
}

impl GoalSet {
    pub fn new(strategy_name: impl Into<String>, goals: Vec<Goal>) -> Self {
        GoalSet {
            strategy_name: strategy_name.into(),
            goals,
        }
    }
}
