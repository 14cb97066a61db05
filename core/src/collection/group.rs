// opflow/src/collection/group.rs

//! Contains `OperationGroup`, the concurrent fan-out/fan-in collection.

use crate::collection::OperationCollection;
use crate::core::operation::{Operation, SharedOperation};
use async_trait::async_trait;
use futures_util::future::join_all;
use parking_lot::Mutex;
use tracing::{event, Level};

/// Collection that performs all of its member operations at once.
///
/// Once performed, the group starts every member in the order it was added
/// (with no ordering guarantee on completion) and resolves exactly once, after
/// the last member has completed. All members completing synchronously during
/// the starting pass is tolerated; an empty group completes immediately.
///
/// The members are polled cooperatively on the caller's task, so the group
/// introduces no extra threads and completion handling stays on the driving
/// context.
///
/// The member list is snapshotted when a run begins, so mutating the group
/// while it is performing never affects the run in progress.
#[derive(Default)]
pub struct OperationGroup {
  operations: Mutex<Vec<SharedOperation>>,
}

impl OperationGroup {
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

impl OperationCollection for OperationGroup {
  fn add(&self, operation: SharedOperation) {
    self.operations.lock().push(operation);
  }
}

#[async_trait]
impl Operation for OperationGroup {
  async fn perform(&self) {
    let snapshot: Vec<SharedOperation> = self.operations.lock().clone();
    if snapshot.is_empty() {
      event!(Level::DEBUG, "Group is empty, completing immediately.");
      return;
    }

    event!(Level::DEBUG, members = snapshot.len(), "Group starting all members.");

    // join_all polls the members in list order on the first pass and resolves
    // once every member has, which is the fan-in barrier.
    join_all(snapshot.iter().map(|operation| operation.perform())).await;

    event!(Level::DEBUG, "Group completed.");
  }
}
