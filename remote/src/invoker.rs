use std::future::Future;
use std::sync::Arc;

use log::warn;

use crate::errors::Result;
use crate::naming::check_identifier;
use crate::service::{ChannelFactory, GoalsStrategy};

/// Total attempts for one logical call, including the first.
pub const MAX_ATTEMPTS: u32 = 3;

/// Executes single logical operations against named strategy endpoints,
/// retrying transient transport faults. Operation-agnostic: every remote
/// operation goes through the same dispatch.
pub struct RemoteInvoker<F> {
    factory: F,
    max_attempts: u32,
}

impl<F: ChannelFactory> RemoteInvoker<F> {
    pub fn new(factory: F) -> Self {
        RemoteInvoker {
            factory,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Runs `operation` over a channel scoped to `strategy`.
    ///
    /// Each attempt acquires a fresh channel from the factory and
    /// releases it when the attempt finishes, on success and failure
    /// alike. Transport faults, whether raised while connecting or by
    /// the operation itself, retry without delay up to the attempt
    /// bound; the last one is propagated. Every other error propagates
    /// immediately.
    pub async fn invoke<T, Op, Fut>(&self, strategy: &str, operation: Op) -> Result<T>
    where
        Op: Fn(Arc<dyn GoalsStrategy>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        check_identifier(strategy, "strategy")?;

        let mut attempt = 1;
        loop {
            let result = match self.factory.connect(strategy).await {
                Ok(channel) => operation(channel).await,
                Err(error) => Err(error),
            };
            match result {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transport() && attempt < self.max_attempts => {
                    warn!(
                        "transport fault calling strategy {} (attempt {} of {}): {}; retrying",
                        strategy, attempt, self.max_attempts, error
                    );
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
