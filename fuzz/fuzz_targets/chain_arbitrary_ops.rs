#![no_main]

use cachex::ds::{Chain, SlotId};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on Chain
//
// Random sequences of push, pop, remove, and move operations over a set
// of live handles, validating link invariants after every step.
fuzz_target!(|data: &[u8]| {
    let mut chain: Chain<u32> = Chain::new();
    let mut live: Vec<SlotId> = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let arg = data[idx + 1];

        match op {
            0 => {
                live.push(chain.push_back(u32::from(arg)));
            }
            1 => {
                live.push(chain.push_front(u32::from(arg)));
            }
            2 => {
                if let Some(id) = chain.front_id() {
                    chain.pop_front();
                    live.retain(|&l| l != id);
                }
            }
            3 => {
                if let Some(id) = chain.back_id() {
                    chain.pop_back();
                    live.retain(|&l| l != id);
                }
            }
            4 => {
                if !live.is_empty() {
                    let id = live[usize::from(arg) % live.len()];
                    assert!(chain.remove(id).is_some());
                    live.retain(|&l| l != id);
                }
            }
            5 => {
                if !live.is_empty() {
                    let id = live[usize::from(arg) % live.len()];
                    assert!(chain.move_to_back(id));
                    assert_eq!(chain.back_id(), Some(id));
                }
            }
            6 => {
                if !live.is_empty() {
                    let id = live[usize::from(arg) % live.len()];
                    assert!(chain.move_to_front(id));
                    assert_eq!(chain.front_id(), Some(id));
                }
            }
            7 => {
                chain.clear();
                live.clear();
            }
            _ => unreachable!(),
        }

        chain.debug_validate_invariants();
        assert_eq!(chain.len(), live.len());
        assert_eq!(chain.is_empty(), live.is_empty());
        for &id in &live {
            assert!(chain.contains(id));
        }

        idx += 2;
    }
});
