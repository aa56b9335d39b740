use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use yamlite::Node;

fn make_tree(n: usize) -> Node {
    let mut root = Node::null();
    for i in 0..n {
        let mut svc = Node::null();
        svc.insert("port", Node::from(8000 + i as i64))
            .insert("host", Node::from(format!("10.0.0.{}", i % 255)))
            .insert("note", Node::from("needs # quoting"));
        let mut tags = Node::null();
        tags.push_scalar("web").push_scalar(format!("tier {}", i % 3));
        svc.insert("tags", tags);
        root.insert(format!("svc{i}"), svc);
    }
    root
}

pub fn encode_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for n in [10usize, 1000] {
        let tree = make_tree(n);
        let bytes = yamlite::to_string(&tree).map(|s| s.len()).unwrap_or(0);
        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_function(format!("services_{n}"), |b| {
            b.iter(|| black_box(yamlite::to_string(&tree).ok()))
        });
        group.bench_function(format!("clone_{n}"), |b| {
            b.iter_batched(|| (), |_| black_box(tree.clone()), BatchSize::SmallInput)
        });
    }
    group.finish();
}

criterion_group!(benches, encode_benchmarks);
criterion_main!(benches);
