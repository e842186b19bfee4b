#![no_main]

use cachex::{Cache, Policy};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences against the whole cache engine
//
// The first byte selects the policy, the second the capacity; the rest is
// decoded as (op, key) pairs. Full invariant validation after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let policy = match data[0] % 3 {
        0 => Policy::Lru,
        1 => Policy::Mru,
        _ => Policy::Lfu,
    };
    let capacity = usize::from(data[1] % 16) + 1;
    let mut cache: Cache<u8, u64> = match Cache::new(capacity, policy) {
        Ok(cache) => cache,
        Err(_) => return,
    };

    let mut step = 0u64;
    let mut idx = 2;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let key = data[idx + 1];

        match op {
            0 => {
                cache.put(key, step);
            }
            1 => {
                let _ = cache.get(&key);
            }
            2 => {
                let _ = cache.peek(&key);
            }
            3 => {
                let _ = cache.remove(&key);
            }
            4 => {
                let _ = cache.contains(&key);
            }
            5 => {
                let _ = cache.peek_victim();
            }
            6 => {
                let _ = cache.frequency(&key);
            }
            7 => {
                cache.clear();
            }
            _ => unreachable!(),
        }

        cache.check_invariants().unwrap();
        assert!(cache.len() <= cache.capacity());
        if cache.is_empty() {
            assert!(cache.peek_victim().is_none());
        } else {
            assert!(cache.peek_victim().is_some());
        }
        assert_eq!(
            cache.stats().lookups(),
            cache.hit_count() + cache.miss_count()
        );

        step += 1;
        idx += 2;
    }
});
