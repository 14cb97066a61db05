// opflow/src/collection/mod.rs

//! Collection types that manage multiple operations' lifecycles: sequence,
//! group, queue and repeater.

pub mod group;
pub mod queue;
pub mod repeater;
pub mod sequence;

use crate::core::operation::SharedOperation;

/// Contract shared by every collection of operations.
///
/// Receivers are `&self`: collections use interior mutability so that they can
/// be mutated while a run borrows them. Whether a mutation is visible to a run
/// already in progress is up to the collection; the sequence and group
/// snapshot their members when a run begins, so mutations only affect
/// subsequent runs, while the queue picks up additions immediately.
pub trait OperationCollection {
  /// Add an operation to the collection.
  fn add(&self, operation: SharedOperation);

  /// Add a series of operations to the collection.
  fn add_all(&self, operations: impl IntoIterator<Item = SharedOperation>)
  where
    Self: Sized,
  {
    for operation in operations {
      self.add(operation);
    }
  }
}

pub use group::OperationGroup;
pub use queue::{OperationQueue, QueueObserver};
pub use repeater::OperationRepeater;
pub use sequence::OperationSequence;
