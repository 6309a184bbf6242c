//! Criterion micro-benchmarks comparing heap and bucketed array pools.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use tarn_bench::fill_list;
use tarn_pool::{ArrayPool, BucketPool, HeapPool, PoolConfig};

/// Benchmark: Rent and release a 4K array from the heap pool.
fn bench_heap_rent_release_4k(c: &mut Criterion) {
    let pool = HeapPool;
    c.bench_function("heap_rent_release_4k", |b| {
        b.iter(|| {
            let array: Box<[u64]> = pool.rent(4_096).unwrap();
            black_box(array.len());
            pool.release(array, false);
        });
    });
}

/// Benchmark: Rent and release a 4K array from a warm bucket pool.
fn bench_bucket_rent_release_4k(c: &mut Criterion) {
    let pool = BucketPool::<u64>::new(PoolConfig::default()).unwrap();
    pool.release(pool.rent(4_096).unwrap(), false);
    c.bench_function("bucket_rent_release_4k", |b| {
        b.iter(|| {
            let array = pool.rent(4_096).unwrap();
            black_box(array.len());
            pool.release(array, false);
        });
    });
}

/// Benchmark: Same as above, but the pool clears the array on release.
fn bench_bucket_rent_release_clear_4k(c: &mut Criterion) {
    let pool = BucketPool::<u64>::new(PoolConfig::default()).unwrap();
    c.bench_function("bucket_rent_release_clear_4k", |b| {
        b.iter(|| {
            let array = pool.rent(4_096).unwrap();
            black_box(array.len());
            pool.release(array, true);
        });
    });
}

/// Benchmark: Grow a 10K list from empty on the heap pool.
fn bench_list_growth_heap(c: &mut Criterion) {
    c.bench_function("list_growth_heap_10k", |b| {
        b.iter(|| {
            let list = fill_list(HeapPool, 10_000).unwrap();
            black_box(list.capacity());
        });
    });
}

/// Benchmark: Grow a 10K list from empty on a shared bucket pool.
///
/// Every intermediate array is recycled by the next iteration.
fn bench_list_growth_bucket(c: &mut Criterion) {
    let pool = Arc::new(BucketPool::<u64>::new(PoolConfig::default()).unwrap());
    c.bench_function("list_growth_bucket_10k", |b| {
        b.iter(|| {
            let list = fill_list(pool.clone(), 10_000).unwrap();
            black_box(list.capacity());
        });
    });
}

criterion_group!(
    benches,
    bench_heap_rent_release_4k,
    bench_bucket_rent_release_4k,
    bench_bucket_rent_release_clear_4k,
    bench_list_growth_heap,
    bench_list_growth_bucket
);
criterion_main!(benches);
