// opflow/src/core/closure.rs

//! Closure-backed operations: the synchronous `ClosureOperation` and its
//! asynchronous counterpart `AsyncClosureOperation`.

use crate::core::operation::Operation;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

/// Operation that executes a synchronous closure.
///
/// Once the closure has finished executing, the operation is considered
/// complete. See [`AsyncClosureOperation`] for the asynchronous counterpart.
pub struct ClosureOperation {
  closure: Box<dyn Fn() + Send + Sync>,
}

impl ClosureOperation {
  pub fn new(closure: impl Fn() + Send + Sync + 'static) -> Self {
    Self {
      closure: Box::new(closure),
    }
  }
}

#[async_trait]
impl Operation for ClosureOperation {
  async fn perform(&self) {
    (self.closure)();
  }
}

/// Operation that executes a closure producing a future, and completes when
/// that future resolves.
///
/// Note that it is up to the closure whether any work actually happens
/// asynchronously; the operation itself makes no such guarantee. See
/// [`ClosureOperation`] for the synchronous counterpart.
pub struct AsyncClosureOperation {
  closure: Box<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>,
}

impl AsyncClosureOperation {
  pub fn new<F, Fut>(closure: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
  {
    Self {
      closure: Box::new(move || Box::pin(closure())),
    }
  }
}

#[async_trait]
impl Operation for AsyncClosureOperation {
  async fn perform(&self) {
    (self.closure)().await;
  }
}
