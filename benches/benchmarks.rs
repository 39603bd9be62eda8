//! Performance benchmarks for sizewalk

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sizewalk::test_utils::{MemoryFileSystem, TestTree};
use sizewalk::{SizeIndex, SizeWalker, WalkerConfig, format_size};
use std::path::Path;

fn config(workers: usize) -> WalkerConfig {
    WalkerConfig {
        protected_path: None,
        parallel_workers: workers,
    }
}

fn memory_tree(dirs: usize, depth: usize, files: usize) -> MemoryFileSystem {
    let mut fs = MemoryFileSystem::new().dir("/R");
    for d in 0..dirs {
        let mut path = format!("/R/d{d}");
        for level in 0..depth {
            for f in 0..files {
                fs = fs.file(format!("{path}/f{f}"), (f * 100 + level) as u64);
            }
            path = format!("{path}/n{level}");
        }
    }
    fs
}

fn bench_disk_walk(c: &mut Criterion) {
    let tree = TestTree::new();
    tree.populate(50, 20);

    let mut group = c.benchmark_group("disk_walk");
    group.bench_function("sequential", |b| {
        let walker = SizeWalker::new(config(1));
        b.iter(|| walker.walk(black_box(tree.path())).unwrap())
    });
    group.bench_function("parallel_auto", |b| {
        let walker = SizeWalker::new(config(0));
        b.iter(|| walker.walk(black_box(tree.path())).unwrap())
    });
    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let walker = SizeWalker::with_source(config(1), memory_tree(100, 6, 10));

    c.bench_function("memory_walk_100x6", |b| {
        b.iter(|| {
            let mut index = SizeIndex::new();
            walker
                .compute_size(black_box(Path::new("/R")), &mut index)
                .unwrap();
            index
        })
    });
}

fn bench_format_size(c: &mut Criterion) {
    let sizes: Vec<u64> = (0..64).map(|shift| 1u64 << shift).collect();

    c.bench_function("format_size", |b| {
        b.iter(|| {
            for &size in &sizes {
                black_box(format_size(black_box(size), 2));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_disk_walk,
    bench_classification,
    bench_format_size
);
criterion_main!(benches);
