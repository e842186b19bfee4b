//! Policy comparison under a skewed access pattern.
//!
//! Run with: `cargo bench --bench workloads`
//!
//! Drives every policy through the same hotset trace (80% of accesses hit
//! 20% of the key universe) and reports throughput. Hit rates for the same
//! trace are printed once at startup so the policies can be compared on
//! retention as well as speed.
//!
//! For micro-op latency, see: `cargo bench --bench ops`

use cachex::{Cache, Policy};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const CAPACITY: usize = 1024;
const UNIVERSE: u64 = 8_192;
const OPS: usize = 100_000;
const SEED: u64 = 42;

struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// 80/20 hotset trace: most accesses land on a small hot prefix of the
/// key universe.
fn hotset_trace() -> Vec<u64> {
    let hot_keys = UNIVERSE / 5;
    let mut rng = XorShift64::new(SEED);
    (0..OPS)
        .map(|_| {
            if rng.next_u64() % 100 < 80 {
                rng.next_u64() % hot_keys
            } else {
                hot_keys + rng.next_u64() % (UNIVERSE - hot_keys)
            }
        })
        .collect()
}

fn run_trace(policy: Policy, trace: &[u64]) -> Cache<u64, u64> {
    let mut cache = Cache::new(CAPACITY, policy).unwrap();
    for &key in trace {
        if cache.get(&key).is_none() {
            cache.put(key, key);
        }
    }
    cache
}

fn bench_hotset(c: &mut Criterion) {
    let trace = hotset_trace();

    for policy in [Policy::Lru, Policy::Mru, Policy::Lfu] {
        let stats = run_trace(policy, &trace).stats();
        println!(
            "{policy}: hit_rate {:.3} ({} hits / {} lookups, {} evictions)",
            stats.hit_rate(),
            stats.hits,
            stats.lookups(),
            stats.evictions
        );
    }

    let mut group = c.benchmark_group("hotset_80_20");
    group.throughput(Throughput::Elements(OPS as u64));
    for policy in [Policy::Lru, Policy::Mru, Policy::Lfu] {
        group.bench_with_input(
            BenchmarkId::from_parameter(policy),
            &trace,
            |b, trace| b.iter(|| std::hint::black_box(run_trace(policy, trace.as_slice()))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_hotset);
criterion_main!(benches);
