mod util;
use series_sieve::prelude::*;
use util::*;

fn assert_parallel_shape(out: &[i64], n: i64, size: usize) {
    assert_eq!(out[0], 0);
    assert!(out.len() < size + 1, "len = {}", out.len());
    assert!(out.len() > size - 10, "len = {}", out.len());
    assert_sieve_shape(out, 0, n - 1);
}

#[test]
fn partition_and_merge_one_million() {
    let n = 1_000_000i64;
    let size = 99;
    let items: Vec<i64> = (0..n).collect();
    let collector = SieveCollector::of(Identity, size, 1).unwrap();
    for partitions in [2, 8, 16, 61] {
        let out = collector.collect_chunked(&items, partitions).unwrap().finish();
        assert_parallel_shape(&out, n, size);
    }
}

#[test]
fn explicit_threads_then_merge_tree() {
    let n = 400_000i64;
    let size = 64;
    let items: Vec<i64> = (0..n).collect();
    let collector = SieveCollector::of(Identity, size, 1).unwrap();
    let parts: Vec<SieveReducer<i64, Identity>> = std::thread::scope(|scope| {
        let handles: Vec<_> = items
            .chunks(50_000)
            .map(|chunk| {
                let collector = &collector;
                scope.spawn(move || collector.collect(chunk.iter().copied()))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked").expect("sorted chunk"))
            .collect()
    });
    let merged = merge_tree(parts).unwrap().expect("eight partitions");
    let out = merged.finish();
    assert_sieve_shape(&out, 0, n - 1);
    assert!(out.len() <= size + 1, "len = {}", out.len());
}

#[test]
fn uneven_tick_partitions_keep_endpoints() {
    let ticks = random_ticks(200_000, 0, 30, 11);
    let collector = SieveCollector::of(tick_time, 150, 5).unwrap();
    let merged = collector.collect_chunked(&ticks, 13).unwrap();
    let out = merged.finish();
    assert_eq!(out.first(), ticks.first());
    assert_eq!(out.last(), ticks.last());
    assert!(out.windows(2).all(|w| w[0].time < w[1].time));
}

#[cfg(feature = "rayon")]
#[test]
fn rayon_fold_one_million() {
    let n = 1_000_000usize;
    let size = 99;
    let collector = SieveCollector::of(Identity, size, 1)
        .unwrap()
        .with_min_partition_len(10_000);
    let out: Vec<usize> = collector.par_collect(0..n).unwrap().finish();
    let out: Vec<i64> = out.into_iter().map(|d| d as i64).collect();
    assert_parallel_shape(&out, n as i64, size);
}

#[cfg(feature = "rayon")]
#[test]
fn rayon_fold_reports_out_of_order_input() {
    let mut items: Vec<i64> = (0..100_000).collect();
    items.swap(10, 20);
    let collector = SieveCollector::of(Identity, 10, 1)
        .unwrap()
        .with_min_partition_len(1_000);
    let err = collector.par_collect(items).unwrap_err();
    assert!(matches!(err, SieveError::OutOfOrderInput { .. }));
}
