use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use goals::{Goal, GoalSet};
use log::debug;
use tokio::sync::RwLock;

use crate::errors::{RemoteError, Result};
use crate::models::{DetailedPnlEntry, Order, Transaction};
use crate::service::{ChannelFactory, GoalsStrategy};

/// In-memory stand-in for a running strategy process. Holds one
/// strategy's goal set; history and PnL queries come back empty because
/// a paper process never trades.
pub struct PaperStrategy {
    strategy_name: String,
    goals: RwLock<Vec<Goal>>,
}

impl PaperStrategy {
    pub fn new(strategy_name: impl Into<String>) -> Self {
        PaperStrategy {
            strategy_name: strategy_name.into(),
            goals: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GoalsStrategy for PaperStrategy {
    async fn set_goals(&self, goals: &GoalSet) -> Result<()> {
        if goals.strategy_name != self.strategy_name {
            return Err(RemoteError::fault(format!(
                "goal set for strategy '{}' sent to strategy '{}'",
                goals.strategy_name, self.strategy_name
            )));
        }
        debug!(
            "paper strategy {} accepting {} goals",
            self.strategy_name,
            goals.goals.len()
        );
        *self.goals.write().await = goals.goals.clone();
        Ok(())
    }

    async fn close(&self, instruments: Option<&[String]>) -> Result<()> {
        let mut goals = self.goals.write().await;
        match instruments {
            None => {
                for goal in goals.iter_mut() {
                    close_goal(goal);
                }
            }
            Some(instruments) => {
                for instrument in instruments {
                    let goal = goals
                        .iter_mut()
                        .find(|goal| goal.instrument() == instrument.as_str())
                        .ok_or_else(|| {
                            RemoteError::fault(format!("no goal for instrument '{}'", instrument))
                        })?;
                    close_goal(goal);
                }
            }
        }
        Ok(())
    }

    async fn get_current_goals(&self) -> Result<GoalSet> {
        Ok(GoalSet::new(
            self.strategy_name.clone(),
            self.goals.read().await.clone(),
        ))
    }

    async fn get_order_history(&self, _start: Option<NaiveDate>) -> Result<Vec<Order>> {
        Ok(Vec::new())
    }

    async fn get_transaction_history(
        &self,
        _start: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>> {
        Ok(Vec::new())
    }

    async fn get_pnl(&self, _start: Option<NaiveDate>) -> Result<Vec<DetailedPnlEntry>> {
        Ok(Vec::new())
    }

    async fn get_eod_pnl(&self, _start: Option<NaiveDate>) -> Result<Vec<DetailedPnlEntry>> {
        Ok(Vec::new())
    }
}

// The target is withdrawn and the pending bracket with it; bookkeeping
// fields stay, the strategy process owns their lifecycle.
fn close_goal(goal: &mut Goal) {
    goal.target = 0;
    goal.take_profit_price = 0.0;
    goal.stop_loss_price = 0.0;
    goal.current_take_profit_price = 0.0;
    goal.current_stop_loss_price = 0.0;
    goal.next_bracket_effective_date = None;
}

/// Hands out channels to in-process paper strategies, creating each one
/// on first connect. Serves the tests and the demo transport; real
/// transports implement [`ChannelFactory`] out of tree.
pub struct PaperChannelFactory {
    strategies: RwLock<HashMap<String, Arc<PaperStrategy>>>,
}

impl PaperChannelFactory {
    pub fn new() -> Self {
        PaperChannelFactory {
            strategies: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for PaperChannelFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelFactory for PaperChannelFactory {
    async fn connect(&self, strategy: &str) -> Result<Arc<dyn GoalsStrategy>> {
        let mut strategies = self.strategies.write().await;
        let channel = strategies
            .entry(strategy.to_string())
            .or_insert_with(|| Arc::new(PaperStrategy::new(strategy)))
            .clone();
        Ok(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set(strategy_name: &str) -> GoalSet {
        let goals = vec![
            Goal::new("AAPL", 50).unwrap().with_brackets(110.0, 95.0),
            Goal::new("BRK-B", -25).unwrap(),
        ];
        GoalSet::new(strategy_name, goals)
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let strategy = PaperStrategy::new("alpha");
        let set = sample_set("alpha");
        strategy.set_goals(&set).await.unwrap();
        assert_eq!(strategy.get_current_goals().await.unwrap(), set);
    }

    #[tokio::test]
    async fn test_set_with_mismatched_name_faults() {
        let strategy = PaperStrategy::new("alpha");
        let error = strategy.set_goals(&sample_set("beta")).await.unwrap_err();
        assert!(matches!(error, RemoteError::Fault { .. }));
    }

    #[tokio::test]
    async fn test_close_all_zeroes_targets() {
        let strategy = PaperStrategy::new("alpha");
        strategy.set_goals(&sample_set("alpha")).await.unwrap();
        strategy.close(None).await.unwrap();
        let set = strategy.get_current_goals().await.unwrap();
        assert!(set.goals.iter().all(|goal| goal.target == 0));
        assert!(set.goals.iter().all(|goal| goal.take_profit_price == 0.0));
    }

    #[tokio::test]
    async fn test_close_named_instrument_only() {
        let strategy = PaperStrategy::new("alpha");
        strategy.set_goals(&sample_set("alpha")).await.unwrap();
        strategy
            .close(Some(&["BRK-B".to_string()]))
            .await
            .unwrap();
        let set = strategy.get_current_goals().await.unwrap();
        assert_eq!(set.goals[0].target, 50);
        assert_eq!(set.goals[1].target, 0);
    }

    #[tokio::test]
    async fn test_close_unknown_instrument_faults() {
        let strategy = PaperStrategy::new("alpha");
        strategy.set_goals(&sample_set("alpha")).await.unwrap();
        let error = strategy
            .close(Some(&["TSLA".to_string()]))
            .await
            .unwrap_err();
        assert!(matches!(error, RemoteError::Fault { .. }));
    }

    #[tokio::test]
    async fn test_factory_reuses_strategy_state() {
        let factory = PaperChannelFactory::new();
        let first = factory.connect("alpha").await.unwrap();
        first.set_goals(&sample_set("alpha")).await.unwrap();
        let second = factory.connect("alpha").await.unwrap();
        let set = second.get_current_goals().await.unwrap();
        assert_eq!(set.goals.len(), 2);
    }

    #[tokio::test]
    async fn test_history_queries_are_empty() {
        let strategy = PaperStrategy::new("alpha");
        assert!(strategy.get_order_history(None).await.unwrap().is_empty());
        assert!(
            strategy
                .get_transaction_history(None)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(strategy.get_pnl(None).await.unwrap().is_empty());
        assert!(strategy.get_eod_pnl(None).await.unwrap().is_empty());
    }
}
