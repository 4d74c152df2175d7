// Property tests for the catalog generators and the cursor

use std::time::Duration;

use proptest::prelude::*;
use stepscope::accessor::{get_ints, get_number};
use stepscope::catalog::binary_search::{BinarySearch, BinarySearchInput};
use stepscope::catalog::bubble_sort::{BubbleSort, SortInput};
use stepscope::catalog::permutations::{Permutations, PermutationsInput};
use stepscope::catalog::two_sum::{TwoSum, TwoSumInput};
use stepscope::catalog::unique_paths::{GridInput, UniquePaths};
use stepscope::catalog::Algorithm;
use stepscope::playback::{ManualClock, PlaybackConfig, PlaybackController};
use stepscope::step::Step;
use stepscope::trace::contract::verify;
use stepscope::trace::{Trace, TraceGenerator};

fn check_trace<G: TraceGenerator>(generator: &G, input: &G::Input) -> Trace {
    let trace = match verify(generator, input) {
        Ok(trace) => trace,
        Err(err) => panic!("{} broke the contract: {}", generator.name(), err),
    };
    for (index, step) in trace.iter().enumerate() {
        assert_eq!(step.id(), index as u64);
        assert_eq!(get_number(step, "nonexistent"), None);
    }
    trace
}

#[derive(Debug, Clone)]
enum Op {
    Forward,
    Backward,
    Seek(usize),
    Play,
    Pause,
    Reset,
    Advance(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Forward),
        Just(Op::Backward),
        (0usize..40).prop_map(Op::Seek),
        Just(Op::Play),
        Just(Op::Pause),
        Just(Op::Reset),
        (0u64..500).prop_map(Op::Advance),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn two_sum_honours_contract(
        nums in prop::collection::vec(-20i64..20, 0..16),
        target in -40i64..40,
    ) {
        let trace = check_trace(&TwoSum, &TwoSumInput { nums, target });
        prop_assert!(!trace.is_empty());
    }

    #[test]
    fn bubble_sort_ends_sorted(values in prop::collection::vec(-50i64..50, 1..16)) {
        let trace = check_trace(&BubbleSort, &SortInput { values: values.clone() });
        let mut sorted = values;
        sorted.sort_unstable();
        prop_assert_eq!(get_ints(trace.last(), "result"), Some(&sorted[..]));
    }

    #[test]
    fn binary_search_honours_contract(
        values in prop::collection::vec(-50i64..50, 0..24),
        target in -60i64..60,
    ) {
        check_trace(&BinarySearch, &BinarySearchInput { values, target });
    }

    #[test]
    fn unique_paths_honours_contract(rows in -2i64..20, cols in -2i64..20) {
        check_trace(&UniquePaths, &GridInput { rows, cols });
    }

    #[test]
    fn permutations_honour_contract(items in prop::collection::vec(0i64..9, 0..7)) {
        check_trace(&Permutations, &PermutationsInput { items });
    }

    #[test]
    fn cursor_stays_in_bounds(len in 1usize..20, ops in prop::collection::vec(op(), 0..64)) {
        let clock = ManualClock::new();
        let mut player = PlaybackController::with_clock(PlaybackConfig::default(), clock.clone());
        let steps: Vec<Step> = (0..len)
            .map(|i| Step::new(i as u64, format!("step {}", i), &(i as i64)))
            .collect();
        player.load_trace(steps).unwrap();

        for op in ops {
            match op {
                Op::Forward => { player.step_forward(); }
                Op::Backward => { player.step_backward(); }
                Op::Seek(index) => { player.seek(index); }
                Op::Play => { player.play(Duration::from_millis(50)); }
                Op::Pause => { player.pause(); }
                Op::Reset => player.reset(),
                Op::Advance(ms) => {
                    clock.advance(Duration::from_millis(ms));
                    player.poll();
                }
            }
            let index = player.current_index().unwrap();
            prop_assert!(index < len);
            let step = player.current_step().unwrap();
            prop_assert_eq!(step.id(), index as u64);
        }
    }
}

#[test]
fn every_sample_input_produces_a_valid_trace() {
    for algorithm in Algorithm::ALL {
        let input = algorithm.parse_input(algorithm.sample_input()).unwrap();
        let trace = check_trace(&algorithm, &input);
        assert!(trace.len() >= 3, "{} sample is too short", algorithm);
    }
}
