// opflow/src/chain/link.rs

//! Contains `Chain<I, O>`: a strongly-typed, compile-time composed pipeline
//! of typed operations.

use crate::chain::stage::{ClosureStage, TypedOperation};
use crate::core::operation::Operation;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// The composed run function of a chain: feeds an `I` through every stage
/// appended so far and resolves to the tail stage's output.
type ChainFn<I, O> = Arc<dyn Fn(I) -> Pin<Box<dyn Future<Output = O> + Send>> + Send + Sync>;

/// A typed pipeline of operations.
///
/// A chain threads one value through a series of heterogeneous stages: the
/// root stage receives the caller's input, every later stage receives the
/// previous stage's output, and the chain resolves to the tail stage's output.
/// Stages always execute in append order; a stage is never started before its
/// predecessor has resolved.
///
/// `Chain::new(root)` creates a one-stage chain. [`append`](Chain::append)
/// consumes the chain and returns the handle for the new tail; a stage whose
/// input type does not equal the current tail's output type is rejected by the
/// compiler, so no value is ever carried through an untyped channel and no
/// runtime cast exists anywhere in the chain.
///
/// Chains are cheap to clone, may be performed any number of times, and each
/// invocation is independent: no per-run state outlives the call.
pub struct Chain<I, O> {
  run: ChainFn<I, O>,
  length: usize,
}

impl<I, O> Clone for Chain<I, O> {
  fn clone(&self) -> Self {
    Self {
      run: Arc::clone(&self.run),
      length: self.length,
    }
  }
}

impl<I, O> Chain<I, O>
where
  I: Send + 'static,
  O: Send + 'static,
{
  /// Create a chain consisting of a single root stage.
  pub fn new<Op>(root: Op) -> Self
  where
    Op: TypedOperation<Input = I, Output = O> + 'static,
  {
    let root = Arc::new(root);
    Self {
      run: Arc::new(move |input| {
        let root = Arc::clone(&root);
        Box::pin(async move { root.perform_with_input(input).await })
      }),
      length: 1,
    }
  }

  /// Append a stage to the chain.
  ///
  /// The stage must accept an input of the same type as the current tail's
  /// output; anything else fails to compile. Returns the chain handle
  /// representing the new tail, through which further appends or performs are
  /// issued.
  pub fn append<Op>(self, operation: Op) -> Chain<I, Op::Output>
  where
    Op: TypedOperation<Input = O> + 'static,
  {
    let prev = self.run;
    let operation = Arc::new(operation);
    Chain {
      run: Arc::new(move |input| {
        let prev = Arc::clone(&prev);
        let operation = Arc::clone(&operation);
        Box::pin(async move {
          let intermediate = prev(input).await;
          operation.perform_with_input(intermediate).await
        })
      }),
      length: self.length + 1,
    }
  }

  /// Append a synchronous closure as a stage.
  pub fn append_closure<F, T>(self, closure: F) -> Chain<I, T>
  where
    F: Fn(O) -> T + Send + Sync + 'static,
    T: Send + 'static,
  {
    self.append(ClosureStage::new(closure))
  }

  /// Perform every stage of the chain in order, feeding `input` to the root
  /// stage and resolving to the tail stage's output.
  #[instrument(
    name = "Chain::perform_with_input",
    skip_all,
    fields(
      input_type = %std::any::type_name::<I>(),
      output_type = %std::any::type_name::<O>(),
      stages = self.length,
    )
  )]
  pub async fn perform_with_input(&self, input: I) -> O {
    event!(Level::DEBUG, "Chain execution starting.");
    let output = (self.run)(input).await;
    event!(Level::DEBUG, "Chain execution completed.");
    output
  }

  /// The number of stages appended so far.
  pub fn len(&self) -> usize {
    self.length
  }

  pub fn is_empty(&self) -> bool {
    // A chain always has at least its root stage.
    false
  }
}

impl<I, T> Chain<I, Option<T>>
where
  I: Send + 'static,
  T: Send + 'static,
{
  /// Append a stage behind an optional-producing tail.
  ///
  /// When the current tail resolves to `Some(value)`, the stage receives
  /// `value` and its output is re-wrapped in `Some`. When the tail resolves to
  /// `None`, the stage is bypassed entirely and `None` propagates to the rest
  /// of the chain.
  pub fn append_optional<Op>(self, operation: Op) -> Chain<I, Option<Op::Output>>
  where
    Op: TypedOperation<Input = T> + 'static,
  {
    let prev = self.run;
    let operation = Arc::new(operation);
    Chain {
      run: Arc::new(move |input| {
        let prev = Arc::clone(&prev);
        let operation = Arc::clone(&operation);
        Box::pin(async move {
          match prev(input).await {
            Some(value) => Some(operation.perform_with_input(value).await),
            None => {
              event!(Level::TRACE, "Optional stage short-circuited on absent value.");
              None
            }
          }
        })
      }),
      length: self.length + 1,
    }
  }
}

// A chain is itself a typed operation, so chains nest as stages of other
// chains.
#[async_trait]
impl<I, O> TypedOperation for Chain<I, O>
where
  I: Send + 'static,
  O: Send + 'static,
{
  type Input = I;
  type Output = O;

  async fn perform_with_input(&self, input: I) -> O {
    Chain::perform_with_input(self, input).await
  }
}

// A unit chain carries no payload at its boundaries and therefore satisfies
// the untyped contract, letting it be stored in sequences, groups and queues.
#[async_trait]
impl Operation for Chain<(), ()> {
  async fn perform(&self) {
    Chain::perform_with_input(self, ()).await;
  }
}
