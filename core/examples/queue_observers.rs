// opflow/examples/queue_observers.rs

use opflow::{ClosureOperation, OperationQueue, QueueObserver, SharedOperation};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

struct LoggingObserver;

impl QueueObserver for LoggingObserver {
  fn operation_will_start(&self, queue: &OperationQueue, _operation: &SharedOperation) {
    info!(pending = queue.pending_count(), "queue is starting an operation");
  }

  fn queue_did_become_empty(&self, _queue: &OperationQueue) {
    info!("queue drained to empty");
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Queue Observers Example ---");

  let queue = OperationQueue::new();

  // Observers are held weakly; keep the Arc alive for as long as the
  // notifications matter.
  let observer = Arc::new(LoggingObserver);
  queue.add_observer(&observer);

  for task in 1..=3u32 {
    queue.add(Arc::new(ClosureOperation::new(move || {
      info!("performing task {task}");
    })));
  }

  // A paused queue holds on to its pending work.
  queue.set_paused(true);
  queue.add(Arc::new(ClosureOperation::new(|| info!("performing the deferred task"))));
  info!(pending = queue.pending_count(), "queue paused");

  tokio::time::sleep(Duration::from_millis(50)).await;
  queue.set_paused(false);

  // Wait for the final operation to complete before exiting.
  queue
    .add_with_completion(Arc::new(ClosureOperation::new(|| info!("last task"))))
    .await;
}
