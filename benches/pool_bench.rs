use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use workpool::ThreadPool;

fn busy_work(n: u64) -> u64 {
    (0..n).fold(0u64, |acc, x| acc.wrapping_mul(31).wrapping_add(x))
}

fn submit_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_get");
    let mut rng = thread_rng();
    let sizes: Vec<u64> = (0..100).map(|_| rng.gen_range(100..10_000)).collect();

    for threads in [1, 2, 4, num_cpus::get()] {
        let pool = ThreadPool::new(threads).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(threads), &sizes, |b, sizes| {
            b.iter(|| {
                let handles: Vec<_> = sizes
                    .iter()
                    .map(|&n| pool.submit(move || busy_work(n)).unwrap())
                    .collect();
                for handle in handles {
                    handle.get().unwrap();
                }
            });
        });
    }

    group.finish();
}

fn spawn_bench(c: &mut Criterion) {
    c.bench_function("spawn_and_drain", |b| {
        b.iter(|| {
            let pool = ThreadPool::new(4).unwrap();
            for n in 0..1000 {
                pool.spawn(move || {
                    busy_work(n);
                })
                .unwrap();
            }
        });
    });
}

criterion_group!(benches, submit_bench, spawn_bench);
criterion_main!(benches);
