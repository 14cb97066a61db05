// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use opflow::{ClosureOperation, Operation, OperationQueue, QueueObserver, SharedOperation};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tokio::sync::oneshot;
use tracing::Level;

// --- Manually-completed operation ---

/// Operation that blocks until `complete()` is called, recording every start.
///
/// The async counterpart of a hand-rolled mock: `perform` parks on a oneshot
/// channel, and each `complete()` call releases the oldest outstanding
/// invocation. Calling `complete()` with no invocation outstanding is a
/// programming error in the test and panics.
pub struct ManualOperation {
  start_count: AtomicUsize,
  waiting: Mutex<VecDeque<oneshot::Sender<()>>>,
}

impl ManualOperation {
  pub fn new() -> Arc<Self> {
    Arc::new(Self {
      start_count: AtomicUsize::new(0),
      waiting: Mutex::new(VecDeque::new()),
    })
  }

  pub fn started(&self) -> bool {
    self.start_count() > 0
  }

  pub fn start_count(&self) -> usize {
    self.start_count.load(Ordering::SeqCst)
  }

  /// Release the oldest in-flight invocation.
  pub fn complete(&self) {
    let sender = self
      .waiting
      .lock()
      .pop_front()
      .expect("completed an operation that was never started");
    let _ = sender.send(());
  }
}

#[async_trait]
impl Operation for ManualOperation {
  async fn perform(&self) {
    let (sender, receiver) = oneshot::channel();
    self.waiting.lock().push_back(sender);
    self.start_count.fetch_add(1, Ordering::SeqCst);
    let _ = receiver.await;
  }
}

// --- Shared execution log ---

pub type Log = Arc<Mutex<Vec<u32>>>;

pub fn new_log() -> Log {
  Arc::new(Mutex::new(Vec::new()))
}

/// Synchronous operation appending `value` to the shared log when performed.
pub fn recording_op(log: &Log, value: u32) -> SharedOperation {
  let log = Arc::clone(log);
  Arc::new(ClosureOperation::new(move || log.lock().push(value)))
}

/// Synchronous operation incrementing a shared counter when performed.
pub fn counting_op(counter: &Arc<AtomicUsize>) -> SharedOperation {
  let counter = Arc::clone(counter);
  Arc::new(ClosureOperation::new(move || {
    counter.fetch_add(1, Ordering::SeqCst);
  }))
}

// --- Queue observer mock ---

#[derive(Default)]
pub struct RecordingObserver {
  operations_started: AtomicUsize,
  times_became_empty: AtomicUsize,
}

impl RecordingObserver {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn operations_started(&self) -> usize {
    self.operations_started.load(Ordering::SeqCst)
  }

  pub fn times_became_empty(&self) -> usize {
    self.times_became_empty.load(Ordering::SeqCst)
  }
}

impl QueueObserver for RecordingObserver {
  fn operation_will_start(&self, _queue: &OperationQueue, _operation: &SharedOperation) {
    self.operations_started.fetch_add(1, Ordering::SeqCst);
  }

  fn queue_did_become_empty(&self, _queue: &OperationQueue) {
    self.times_became_empty.fetch_add(1, Ordering::SeqCst);
  }
}

// --- Scheduling helper ---

/// Yield to the runtime until spawned drain/iteration tasks have had a chance
/// to run. Enough generations for chains of spawn-on-completion handoffs.
pub async fn settle() {
  for _ in 0..16 {
    tokio::task::yield_now().await;
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
