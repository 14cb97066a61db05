// opflow/src/collection/repeater.rs

//! Contains `OperationRepeater`, the re-arming iteration driver.

use crate::collection::sequence::OperationSequence;
use crate::core::delay::DelayOperation;
use crate::core::operation::SharedOperation;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{event, Level};

/// Driver that repeats an operation until stopped.
///
/// A repeater takes an operation (or a list of operations, which it wraps in
/// an [`OperationSequence`]) and keeps performing it, each iteration starting
/// when the previous one has completed. Useful for repeating animations or
/// work that should happen on a regular basis.
///
/// Only one iteration is ever in flight. [`stop`](OperationRepeater::stop)
/// never interrupts the iteration in progress; it only prevents the next one
/// from starting.
pub struct OperationRepeater {
  operation: SharedOperation,
  stopped: Arc<AtomicBool>,
  running: Arc<AtomicBool>,
}

impl OperationRepeater {
  /// Create a repeater that re-performs `operation` back to back.
  pub fn new(operation: SharedOperation) -> Self {
    Self::with_interval(operation, Duration::ZERO)
  }

  /// Create a repeater that waits `interval` between iterations (a zero
  /// interval means none).
  ///
  /// The interval is realised by wrapping the operation in a sequence ending
  /// in a [`DelayOperation`], so it is measured from the *end* of each
  /// iteration rather than on a fixed wall-clock cadence: under slow
  /// operations the effective period is iteration time plus interval, and
  /// drift accumulates. This is a documented characteristic of the repeater,
  /// not a defect.
  pub fn with_interval(operation: SharedOperation, interval: Duration) -> Self {
    let operation = if interval > Duration::ZERO {
      let delay: SharedOperation = Arc::new(DelayOperation::new(interval));
      Arc::new(OperationSequence::new(vec![operation, delay])) as SharedOperation
    } else {
      operation
    };

    Self {
      operation,
      stopped: Arc::new(AtomicBool::new(true)),
      running: Arc::new(AtomicBool::new(false)),
    }
  }

  /// Create a repeater over a list of operations, performed in sequence each
  /// iteration, with the interval (if any) appended at the end of the
  /// sequence.
  pub fn from_operations(operations: Vec<SharedOperation>, interval: Duration) -> Self {
    Self::with_interval(Arc::new(OperationSequence::new(operations)), interval)
  }

  /// Start repeating on the current tokio runtime.
  ///
  /// A no-op when the repeater is already running. That includes the window
  /// where a stopped repeater's final iteration is still in flight; once that
  /// iteration has finished, `start` arms the repeater again.
  pub fn start(&self) {
    self.start_on(&Handle::current());
  }

  /// Start repeating on an explicit runtime handle.
  pub fn start_on(&self, runtime: &Handle) {
    if self
      .running
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .is_err()
    {
      return;
    }

    self.stopped.store(false, Ordering::Release);

    let operation = Arc::clone(&self.operation);
    let stopped = Arc::clone(&self.stopped);
    let running = Arc::clone(&self.running);

    runtime.spawn(async move {
      // The stopped flag is checked immediately before each iteration; a stop
      // request lets the iteration in flight run to completion.
      while !stopped.load(Ordering::Acquire) {
        event!(Level::TRACE, "Repeater performing iteration.");
        operation.perform().await;
      }
      running.store(false, Ordering::Release);
      event!(Level::DEBUG, "Repeater stopped.");
    });
  }

  /// Stop repeating. The current iteration, if any, runs to completion.
  pub fn stop(&self) {
    self.stopped.store(true, Ordering::Release);
  }

  /// Whether the repeater is currently stopped. A freshly created repeater
  /// starts out stopped.
  pub fn is_stopped(&self) -> bool {
    self.stopped.load(Ordering::Acquire)
  }
}
