// opflow/src/core/delay.rs

//! The delay operation, the crate's only timing primitive.

use crate::core::operation::Operation;
use async_trait::async_trait;
use std::time::Duration;

/// Operation that waits for a fixed amount of time, then completes.
///
/// A delay does nothing by itself, but is useful inside an
/// [`OperationSequence`](crate::OperationSequence) to push the operations
/// behind it back in time, and it is what an
/// [`OperationRepeater`](crate::OperationRepeater) inserts between iterations
/// when constructed with an interval. The delay is additive, never a deadline.
pub struct DelayOperation {
  delay: Duration,
}

impl DelayOperation {
  pub fn new(delay: Duration) -> Self {
    Self { delay }
  }
}

#[async_trait]
impl Operation for DelayOperation {
  async fn perform(&self) {
    tokio::time::sleep(self.delay).await;
  }
}
