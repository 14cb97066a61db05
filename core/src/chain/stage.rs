// opflow/src/chain/stage.rs

//! Defines the `TypedOperation` trait for value-producing stages, plus the
//! closure adapters used to build chain stages without a dedicated type.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

/// An operation additionally parameterized by an input and an output type.
///
/// Typed operations are the stages of a [`Chain`](crate::Chain): the chain
/// feeds each stage's output into the next stage's input, with compatibility
/// between adjacent stages checked at compile time. Like
/// [`Operation`](crate::Operation), completion is signalled by resolution of
/// the returned future, which carries the produced output.
#[async_trait]
pub trait TypedOperation: Send + Sync {
  /// The type of input the operation accepts. May be an `Option`.
  type Input: Send + 'static;
  /// The type of output the operation produces. May be an `Option`.
  type Output: Send + 'static;

  /// Perform the operation with the given input, resolving to its output.
  async fn perform_with_input(&self, input: Self::Input) -> Self::Output;
}

/// Typed operation that performs a synchronous closure over its input.
pub struct ClosureStage<I, O> {
  closure: Box<dyn Fn(I) -> O + Send + Sync>,
}

impl<I, O> ClosureStage<I, O> {
  pub fn new(closure: impl Fn(I) -> O + Send + Sync + 'static) -> Self {
    Self {
      closure: Box::new(closure),
    }
  }
}

#[async_trait]
impl<I, O> TypedOperation for ClosureStage<I, O>
where
  I: Send + 'static,
  O: Send + 'static,
{
  type Input = I;
  type Output = O;

  async fn perform_with_input(&self, input: I) -> O {
    (self.closure)(input)
  }
}

/// Typed operation backed by a closure that produces a future.
///
/// The stage completes, and hands its output to the next stage, when the
/// produced future resolves.
pub struct AsyncClosureStage<I, O> {
  closure: Box<dyn Fn(I) -> Pin<Box<dyn Future<Output = O> + Send>> + Send + Sync>,
}

impl<I, O> AsyncClosureStage<I, O> {
  pub fn new<F, Fut>(closure: F) -> Self
  where
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
  {
    Self {
      closure: Box::new(move |input| Box::pin(closure(input))),
    }
  }
}

#[async_trait]
impl<I, O> TypedOperation for AsyncClosureStage<I, O>
where
  I: Send + 'static,
  O: Send + 'static,
{
  type Input = I;
  type Output = O;

  async fn perform_with_input(&self, input: I) -> O {
    (self.closure)(input).await
  }
}
