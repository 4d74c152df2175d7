// Step shape, serialization and snapshot isolation

use insta::{assert_json_snapshot, assert_snapshot};
use stepscope::accessor::{get_int, get_ints};
use stepscope::catalog::permutations::{Permutations, PermutationsInput};
use stepscope::catalog::two_sum::{TwoSum, TwoSumInput};
use stepscope::catalog::unique_paths::{GridInput, UniquePaths};
use stepscope::catalog::{Algorithm, CatalogInput};
use stepscope::step::value::Value;
use stepscope::step::{Step, Variables};
use stepscope::trace::{generate, Trace, TraceLimits, TraceRecorder};

#[test]
fn two_sum_step_shape() {
    let input = TwoSumInput {
        nums: vec![3, 3],
        target: 6,
    };
    let trace = Trace::new(generate(&TwoSum, &input)).unwrap();
    let lines = [trace.first(), trace.last()]
        .iter()
        .map(|step| serde_json::to_string(step).unwrap())
        .collect::<Vec<_>>()
        .join("\n");

    assert_snapshot!(lines, @r###"
    {"id":0,"description":"Looking for two numbers in [3, 3] that sum to 6","data":{"ints":[3,3]},"variables":{"target":{"int":6}}}
    {"id":5,"description":"Answer: indices [0, 1] (3 + 3 = 6)","data":{"ints":[3,3]},"variables":{"result":{"ints":[0,1]},"target":{"int":6}},"highlight":{"indices":[0,1]}}
    "###);
}

#[test]
fn unique_paths_result_shape() {
    let trace = Trace::new(generate(&UniquePaths, &GridInput { rows: 2, cols: 2 })).unwrap();
    assert_json_snapshot!(trace.last().variables(), @r###"
    {
      "result": {
        "int": 2
      }
    }
    "###);
}

#[test]
fn dumped_steps_read_back_unchanged() {
    let input = Algorithm::BubbleSort
        .parse_input(r#"{"values": [4, -1, 3]}"#)
        .unwrap();
    let trace = Trace::new(generate(&Algorithm::BubbleSort, &input)).unwrap();

    let json = serde_json::to_string(&trace).unwrap();
    let steps: Vec<Step> = serde_json::from_str(&json).unwrap();
    assert_eq!(steps.as_slice(), trace.steps());
    assert!(Trace::new(steps).is_ok());
}

#[test]
fn scratch_buffer_changes_do_not_reach_recorded_steps() {
    let mut rec = TraceRecorder::new(TraceLimits::default());
    let mut scratch: Vec<i64> = vec![1, 2, 3];
    rec.emit("before", &scratch, Variables::new().with("buf", &scratch));
    scratch[0] = 99;
    scratch.push(4);
    rec.emit("after", &scratch, Variables::new());

    let trace = Trace::new(rec.finish()).unwrap();
    assert_eq!(trace[0].data(), &Value::Ints(vec![1, 2, 3]));
    assert_eq!(get_ints(&trace[0], "buf"), Some(&[1, 2, 3][..]));
    assert_eq!(trace[1].data(), &Value::Ints(vec![99, 2, 3, 4]));
}

#[test]
fn mutating_a_copy_leaves_the_trace_alone() {
    let trace = Trace::new(generate(&TwoSum, &TwoSumInput {
        nums: vec![1, 5, 9],
        target: 14,
    }))
    .unwrap();
    let shared = trace.clone();
    assert!(trace.ptr_eq(&shared));

    let mut copy = trace[1].data().clone();
    if let Value::Ints(values) = &mut copy {
        values.clear();
    }
    assert_ne!(&copy, trace[1].data());
    for step in &shared {
        assert_eq!(step.data(), &Value::Ints(vec![1, 5, 9]));
    }
}

#[test]
fn backtracking_paths_are_frozen_per_step() {
    let steps = generate(&Permutations, &PermutationsInput { items: vec![1, 2, 3] });
    let found: Vec<&[i64]> = steps
        .iter()
        .filter_map(|step| get_ints(step, "permutation"))
        .collect();

    assert_eq!(
        found,
        vec![
            &[1, 2, 3][..],
            &[1, 3, 2][..],
            &[2, 1, 3][..],
            &[2, 3, 1][..],
            &[3, 1, 2][..],
            &[3, 2, 1][..],
        ]
    );
}

#[test]
fn truncated_catalog_trace_stays_valid() {
    let input = CatalogInput::UniquePaths(GridInput { rows: 12, cols: 12 });
    let mut rec = TraceRecorder::new(TraceLimits::new(10, usize::MAX));
    stepscope::trace::TraceGenerator::record(&Algorithm::UniquePaths, &input, &mut rec);
    assert!(rec.is_truncated());

    let trace = Trace::new(rec.finish()).unwrap();
    assert_eq!(trace.len(), 10);
    assert!(trace.last().description().starts_with("Trace truncated"));
    assert_eq!(get_int(trace.last(), "result"), None);
}
