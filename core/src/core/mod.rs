pub mod closure;
pub mod delay;
pub mod operation;

// Re-export key types for easier access from other opflow modules (and lib.rs)
pub use closure::{AsyncClosureOperation, ClosureOperation};
pub use delay::DelayOperation;
pub use operation::{Operation, SharedOperation};
