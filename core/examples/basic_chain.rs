// opflow/examples/basic_chain.rs

use opflow::{AsyncClosureStage, Chain, ClosureStage};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Chain Example ---");

  // A chain threads one typed value through heterogeneous stages. The input
  // type of each stage must equal the output type of the previous one; a
  // mismatch is a compile error, not a runtime failure.
  let chain = Chain::new(ClosureStage::new(|name: &'static str| format!("hello, {name}")))
    .append(AsyncClosureStage::new(|greeting: String| async move {
      // A stage is free to suspend; the next stage waits for its output.
      tokio::time::sleep(Duration::from_millis(50)).await;
      greeting.to_uppercase()
    }))
    .append_closure(|shouted: String| shouted.len());

  let length = chain.perform_with_input("opflow").await;
  info!("Final stage produced: {length}");

  // Chains are reusable; every invocation is independent.
  let again = chain.perform_with_input("world").await;
  info!("Second run produced: {again}");
}
