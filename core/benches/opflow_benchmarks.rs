use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use opflow::{
  Chain,
  ClosureOperation,
  ClosureStage,
  Operation,
  OperationGroup,
  OperationSequence,
  SharedOperation,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

// --- Helper: build a chain of `depth` increment stages ---
fn build_increment_chain(depth: usize) -> Chain<u64, u64> {
  let mut chain = Chain::new(ClosureStage::new(|input: u64| input + 1));
  for _ in 1..depth {
    chain = chain.append(ClosureStage::new(|value: u64| value + 1));
  }
  chain
}

// --- Helper: a synchronous counting operation ---
fn counting_operation(counter: &Arc<AtomicU64>) -> SharedOperation {
  let counter = Arc::clone(counter);
  Arc::new(ClosureOperation::new(move || {
    counter.fetch_add(1, Ordering::Relaxed);
  }))
}

fn bench_chain_depth(c: &mut Criterion) {
  let mut group = c.benchmark_group("ChainDepth");
  let rt = Runtime::new().unwrap();

  for depth in [1usize, 5, 10, 50].iter() {
    group.throughput(Throughput::Elements(*depth as u64));
    let chain = build_increment_chain(*depth);

    group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &depth| {
      b.to_async(&rt).iter(|| {
        let chain = chain.clone();
        async move {
          let output = chain.perform_with_input(0).await;
          assert_eq!(output, depth as u64);
        }
      });
    });
  }
  group.finish();
}

fn bench_sequence_length(c: &mut Criterion) {
  let mut group = c.benchmark_group("SequenceLength");
  let rt = Runtime::new().unwrap();

  for members in [1usize, 10, 100].iter() {
    group.throughput(Throughput::Elements(*members as u64));
    let counter = Arc::new(AtomicU64::new(0));
    let sequence = Arc::new(OperationSequence::new(
      (0..*members).map(|_| counting_operation(&counter)).collect(),
    ));

    group.bench_with_input(BenchmarkId::from_parameter(members), members, |b, _| {
      b.to_async(&rt).iter(|| {
        let sequence = Arc::clone(&sequence);
        async move { sequence.perform().await }
      });
    });
  }
  group.finish();
}

fn bench_group_fanout(c: &mut Criterion) {
  let mut group = c.benchmark_group("GroupFanout");
  let rt = Runtime::new().unwrap();

  for members in [1usize, 10, 100].iter() {
    group.throughput(Throughput::Elements(*members as u64));
    let counter = Arc::new(AtomicU64::new(0));
    let operation_group = Arc::new(OperationGroup::new(
      (0..*members).map(|_| counting_operation(&counter)).collect(),
    ));

    group.bench_with_input(BenchmarkId::from_parameter(members), members, |b, _| {
      b.to_async(&rt).iter(|| {
        let operation_group = Arc::clone(&operation_group);
        async move { operation_group.perform().await }
      });
    });
  }
  group.finish();
}

criterion_group!(benches, bench_chain_depth, bench_sequence_length, bench_group_fanout);
criterion_main!(benches);
