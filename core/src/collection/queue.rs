// opflow/src/collection/queue.rs

//! Contains `OperationQueue`, the self-draining FIFO collection, and its
//! observer contract.

use crate::collection::OperationCollection;
use crate::core::operation::{Operation, SharedOperation};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{event, Level};

/// Observation contract for [`OperationQueue`].
///
/// Both methods have default empty implementations, so an observer only needs
/// to provide the ones it cares about. Notifications are delivered
/// synchronously, inline with the triggering operation's lifecycle, and may
/// re-enter the queue (an observer is free to add more operations from within
/// a callback).
pub trait QueueObserver: Send + Sync {
  /// Sent when the queue is about to start performing an operation.
  fn operation_will_start(&self, queue: &OperationQueue, operation: &SharedOperation) {
    let _ = (queue, operation);
  }

  /// Sent when the queue drained to empty.
  fn queue_did_become_empty(&self, queue: &OperationQueue) {
    let _ = queue;
  }
}

struct QueueState {
  pending: VecDeque<SharedOperation>,
  performing: bool,
  paused: bool,
  // Keyed by observer identity (the Arc's data pointer). Weak so the queue
  // never keeps an observer alive; dead entries are pruned lazily on the next
  // notification pass.
  observers: HashMap<usize, Weak<dyn QueueObserver>>,
}

struct QueueInner {
  runtime: Handle,
  state: Mutex<QueueState>,
}

/// Collection that enqueues operations and performs them once idle.
///
/// A queue cannot be performed; instead it auto-drains, performing pending
/// operations one at a time in FIFO order. Whenever the operation in flight
/// completes (or an operation is added while the queue is idle), the next
/// pending operation starts, unless the queue is paused. At most one operation
/// is in flight at any time.
///
/// Observers registered via [`add_observer`](OperationQueue::add_observer) are
/// told when an operation is about to start and when the queue drains to
/// empty; see [`QueueObserver`].
///
/// `OperationQueue` is a cheap-clone handle: clones share the same pending
/// list, flags and observers. Operations are spawned onto the
/// [`Handle`](tokio::runtime::Handle) the queue was constructed with.
pub struct OperationQueue {
  inner: Arc<QueueInner>,
}

impl Clone for OperationQueue {
  fn clone(&self) -> Self {
    Self {
      inner: Arc::clone(&self.inner),
    }
  }
}

impl Default for OperationQueue {
  fn default() -> Self {
    Self::new()
  }
}

impl OperationQueue {
  /// Create an empty, unpaused queue driven by the current tokio runtime.
  ///
  /// Panics when called outside a runtime, like
  /// [`Handle::current`](tokio::runtime::Handle::current).
  pub fn new() -> Self {
    Self::with_operations(Vec::new())
  }

  /// Create an unpaused queue pre-loaded with operations. Draining begins
  /// immediately.
  pub fn with_operations(operations: Vec<SharedOperation>) -> Self {
    Self::with_operations_paused(operations, false)
  }

  /// Create a pre-loaded queue, optionally starting out paused.
  pub fn with_operations_paused(operations: Vec<SharedOperation>, paused: bool) -> Self {
    Self::with_runtime(operations, paused, Handle::current())
  }

  /// Create a queue driven by an explicit runtime handle.
  pub fn with_runtime(operations: Vec<SharedOperation>, paused: bool, runtime: Handle) -> Self {
    let nonempty = !operations.is_empty();
    let queue = Self {
      inner: Arc::new(QueueInner {
        runtime,
        state: Mutex::new(QueueState {
          pending: operations.into(),
          performing: false,
          paused,
          observers: HashMap::new(),
        }),
      }),
    };

    if nonempty {
      queue.perform_next();
    }

    queue
  }

  /// Add an operation to the queue. It is performed once every operation ahead
  /// of it has completed, or immediately if the queue is idle and unpaused.
  pub fn add(&self, operation: SharedOperation) {
    self.inner.state.lock().pending.push_back(operation);
    self.perform_next();
  }

  /// Add an operation and obtain a future that resolves once that particular
  /// operation has completed.
  pub fn add_with_completion(&self, operation: SharedOperation) -> impl Future<Output = ()> + Send + 'static {
    let (sender, receiver) = oneshot::channel();
    self.add(Arc::new(TrackedOperation {
      inner: operation,
      completion: Mutex::new(Some(sender)),
    }));

    async move {
      if receiver.await.is_err() {
        // The queue went away before the operation ran. The operation never
        // completed, so its completion must never be signalled either.
        std::future::pending::<()>().await;
      }
    }
  }

  /// Whether the queue is currently paused.
  pub fn is_paused(&self) -> bool {
    self.inner.state.lock().paused
  }

  /// Pause or resume the queue.
  ///
  /// While paused, no new operation is started, even if one is enqueued or the
  /// operation in flight finishes. Unpausing resumes draining, but only on the
  /// actual paused-to-unpaused transition and only when the queue is idle and
  /// non-empty; in particular, unpausing an empty queue does not notify
  /// observers of anything.
  pub fn set_paused(&self, paused: bool) {
    let resume = {
      let mut state = self.inner.state.lock();
      let was_paused = std::mem::replace(&mut state.paused, paused);
      was_paused && !paused && !state.performing && !state.pending.is_empty()
    };

    if resume {
      event!(Level::DEBUG, "Queue unpaused, resuming drain.");
      self.perform_next();
    }
  }

  /// The number of operations waiting to be performed. Does not count the
  /// operation currently in flight.
  pub fn pending_count(&self) -> usize {
    self.inner.state.lock().pending.len()
  }

  /// Register an observer. Observers are held weakly and identified by the
  /// `Arc`'s pointer: adding the same observer twice is a no-op, and a dropped
  /// observer is pruned automatically.
  pub fn add_observer<O: QueueObserver + 'static>(&self, observer: &Arc<O>) {
    let identity = Arc::as_ptr(observer) as usize;
    let weak = Arc::downgrade(observer);
    let weak: Weak<dyn QueueObserver> = weak;
    self.inner.state.lock().observers.entry(identity).or_insert(weak);
  }

  /// Deregister an observer. Removing an observer that was never added is a
  /// no-op.
  pub fn remove_observer<O: QueueObserver + 'static>(&self, observer: &Arc<O>) {
    let identity = Arc::as_ptr(observer) as usize;
    self.inner.state.lock().observers.remove(&identity);
  }

  // Upgrades every registered observer, pruning the ones whose owners have
  // been dropped. Called with the state lock released by the caller.
  fn live_observers(&self) -> Vec<Arc<dyn QueueObserver>> {
    let mut state = self.inner.state.lock();
    let mut live = Vec::with_capacity(state.observers.len());
    state.observers.retain(|_, weak| match weak.upgrade() {
      Some(observer) => {
        live.push(observer);
        true
      }
      None => false,
    });
    live
  }

  // The drain routine. No-op while an operation is in flight or the queue is
  // paused; notifies observers when the queue has drained to empty; otherwise
  // starts the head of the pending list.
  fn perform_next(&self) {
    let operation = {
      let mut state = self.inner.state.lock();

      if state.performing {
        return;
      }

      if state.pending.is_empty() {
        drop(state);
        event!(Level::DEBUG, "Queue became empty, notifying observers.");
        for observer in self.live_observers() {
          observer.queue_did_become_empty(self);
        }
        return;
      }

      if state.paused {
        return;
      }

      state.performing = true;
      state.pending.pop_front().unwrap() // non-empty checked above
    };

    // Observers are notified outside the lock; they may re-enter the queue.
    event!(Level::DEBUG, "Queue starting operation.");
    for observer in self.live_observers() {
      observer.operation_will_start(self, &operation);
    }

    let queue = self.clone();
    self.inner.runtime.spawn(async move {
      operation.perform().await;
      queue.inner.state.lock().performing = false;
      queue.perform_next();
    });
  }
}

impl OperationCollection for OperationQueue {
  fn add(&self, operation: SharedOperation) {
    OperationQueue::add(self, operation);
  }
}

// Wrapper pairing an operation with a one-shot completion signal, used by
// `add_with_completion`.
struct TrackedOperation {
  inner: SharedOperation,
  completion: Mutex<Option<oneshot::Sender<()>>>,
}

#[async_trait]
impl Operation for TrackedOperation {
  async fn perform(&self) {
    self.inner.perform().await;
    if let Some(sender) = self.completion.lock().take() {
      let _ = sender.send(());
    }
  }
}
