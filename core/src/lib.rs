// src/lib.rs

//! Opflow: composable unit-of-work operations for async Rust.
//!
//! Opflow models a task as an *operation*: anything that can be told to
//! perform and that signals completion by resolving. Operations compose:
//!  - `Chain<I, O>`: a typed pipeline threading one value through
//!    heterogeneous stages, input/output compatibility checked at compile time.
//!  - `OperationSequence`: members performed strictly one after another.
//!  - `OperationGroup`: members performed concurrently, one fan-in completion.
//!  - `OperationQueue`: self-draining FIFO with pause/resume and weakly-held
//!    observers.
//!  - `OperationRepeater`: re-performs an operation until stopped, with an
//!    optional fixed delay between iterations.

// Declare modules according to the planned structure
pub mod chain;
pub mod collection;
pub mod core;

// --- Re-exports for the Public API ---

// The operation contract and the primitive operation kinds
pub use crate::core::closure::{AsyncClosureOperation, ClosureOperation};
pub use crate::core::delay::DelayOperation;
pub use crate::core::operation::{Operation, SharedOperation};

// The typed chain and its stage adapters
pub use crate::chain::link::Chain;
pub use crate::chain::stage::{AsyncClosureStage, ClosureStage, TypedOperation};

// The collection types managing multiple operations' lifecycles
pub use crate::collection::group::OperationGroup;
pub use crate::collection::queue::{OperationQueue, QueueObserver};
pub use crate::collection::repeater::OperationRepeater;
pub use crate::collection::sequence::OperationSequence;
pub use crate::collection::OperationCollection;

/*
    Core Workflow:
    1. Implement `Operation` for your task, or wrap a closure in
       `ClosureOperation` / `AsyncClosureOperation`.
    2. Compose: put operations into an `OperationSequence`, `OperationGroup`,
       `OperationQueue` or `OperationRepeater`; all of them accept any
       `SharedOperation` (an `Arc<dyn Operation>`).
    3. For value-producing pipelines, implement `TypedOperation` (or use
       `ClosureStage`) and build a `Chain` with `Chain::new(root).append(...)`,
       then call `chain.perform_with_input(input).await`.
    4. Completion is future resolution: `op.perform().await` returns once the
       operation (and everything it contains) has finished.
*/
