// opflow/src/collection/sequence.rs

//! Contains `OperationSequence`, the strictly serial collection.

use crate::collection::OperationCollection;
use crate::core::operation::{Operation, SharedOperation};
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{event, Level};

/// Collection that performs its member operations one after another.
///
/// Once performed, the sequence runs its members in the order they were added,
/// each one starting only after the previous one's completion. The sequence
/// itself completes after the last member has resolved, or immediately when it
/// holds no members.
///
/// The member list is snapshotted when a run begins, so mutating the sequence
/// while it is performing never affects the run in progress; the addition is
/// picked up by the next run. Repeated or overlapping runs of the same
/// sequence do not interfere with each other's progress.
#[derive(Default)]
pub struct OperationSequence {
  operations: Mutex<Vec<SharedOperation>>,
}

impl OperationSequence {
  pub fn new(operations: Vec<SharedOperation>) -> Self {
    Self {
      operations: Mutex::new(operations),
    }
  }

  /// The number of member operations currently held.
  pub fn len(&self) -> usize {
    self.operations.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.operations.lock().is_empty()
  }
}

impl OperationCollection for OperationSequence {
  fn add(&self, operation: SharedOperation) {
    self.operations.lock().push(operation);
  }
}

#[async_trait]
impl Operation for OperationSequence {
  async fn perform(&self) {
    // Snapshot under the lock, run outside it. The serial loop is the
    // trampoline: stack depth stays constant no matter how many members
    // complete synchronously.
    let snapshot: Vec<SharedOperation> = self.operations.lock().clone();
    event!(Level::DEBUG, members = snapshot.len(), "Sequence starting.");

    for (index, operation) in snapshot.iter().enumerate() {
      event!(Level::TRACE, index, "Sequence performing member.");
      operation.perform().await;
    }

    event!(Level::DEBUG, "Sequence completed.");
  }
}
