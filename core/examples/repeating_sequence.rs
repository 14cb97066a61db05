// opflow/examples/repeating_sequence.rs

use opflow::{ClosureOperation, OperationRepeater};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Repeating Sequence Example ---");

  let ticks = Arc::new(AtomicUsize::new(0));
  let ticks_clone = Arc::clone(&ticks);

  let tick = Arc::new(ClosureOperation::new(move || {
    let n = ticks_clone.fetch_add(1, Ordering::SeqCst) + 1;
    info!("tick {n}");
  }));

  // The interval is inserted after each iteration, so the effective period is
  // iteration time plus interval.
  let repeater = OperationRepeater::with_interval(tick, Duration::from_millis(100));
  repeater.start();

  tokio::time::sleep(Duration::from_millis(350)).await;
  repeater.stop();
  info!(total = ticks.load(Ordering::SeqCst), "stopped repeating");

  // The iteration in flight (if any) finishes on its own; give it a moment.
  tokio::time::sleep(Duration::from_millis(150)).await;
}
