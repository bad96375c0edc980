use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use goals::GoalSet;

use crate::errors::Result;
use crate::models::{DetailedPnlEntry, Order, Transaction};

/// Remote contract exposed by a running goal-driven strategy process.
/// One method per remote operation; implementations are transport
/// proxies.
#[async_trait]
pub trait GoalsStrategy: Send + Sync {
    /// Replaces the strategy's position goals with the given set.
    async fn set_goals(&self, goals: &GoalSet) -> Result<()>;

    /// Resets the targets of the given wire-form instruments to zero and
    /// closes the positions immediately. `None` closes all targets.
    async fn close(&self, instruments: Option<&[String]>) -> Result<()>;

    /// Retrieves the goals the strategy is currently working towards.
    async fn get_current_goals(&self) -> Result<GoalSet>;

    /// Order history since `start`; unbounded when `None`.
    async fn get_order_history(&self, start: Option<NaiveDate>) -> Result<Vec<Order>>;

    /// Transaction history since `start`; unbounded when `None`.
    async fn get_transaction_history(&self, start: Option<NaiveDate>) -> Result<Vec<Transaction>>;

    /// Per-symbol PnL breakdown since `start`; unbounded when `None`.
    async fn get_pnl(&self, start: Option<NaiveDate>) -> Result<Vec<DetailedPnlEntry>>;

    /// End-of-day PnL snapshots since `start`; unbounded when `None`.
    async fn get_eod_pnl(&self, start: Option<NaiveDate>) -> Result<Vec<DetailedPnlEntry>>;
}

/// Supplies channels to named strategy endpoints. Implemented by the
/// transport layer outside this crate; each call is expected to yield a
/// fresh channel scoped to one strategy.
#[async_trait]
pub trait ChannelFactory: Send + Sync {
    async fn connect(&self, strategy: &str) -> Result<Arc<dyn GoalsStrategy>>;
}
