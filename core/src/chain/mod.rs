pub mod link;
pub mod stage;

pub use link::Chain;
pub use stage::{AsyncClosureStage, ClosureStage, TypedOperation};
