// opflow/src/core/operation.rs

//! Defines the `Operation` trait, the single integration surface every other
//! part of the crate builds on.

use async_trait::async_trait;
use std::sync::Arc;

/// A unit of work that can be told to perform and that signals completion by
/// resolving.
///
/// There are no constraints on how an operation does its work. It can be
/// synchronous or asynchronous, and be set up with any dependencies it needs.
/// The contract is small but strict:
///
/// 1. Returning from `perform` *is* the completion signal. A future that never
///    resolves permanently stalls whatever sequence, group, queue slot or
///    repeater contains the operation. The engine does not detect or time out
///    stalled operations.
/// 2. `perform` may be invoked any number of times; each invocation is
///    independent.
/// 3. Work done off the driving runtime (worker threads, blocking pools) must
///    be awaited back into the returned future before it resolves.
#[async_trait]
pub trait Operation: Send + Sync {
  /// Perform the operation. Resolution of the returned future is the
  /// completion notification.
  async fn perform(&self);
}

/// The storage and composition form of an operation.
///
/// Collections hold their members as `SharedOperation` so the same operation
/// instance can appear in several collections, be re-performed by a repeater,
/// or be handed to queue observers without copying.
pub type SharedOperation = Arc<dyn Operation>;
