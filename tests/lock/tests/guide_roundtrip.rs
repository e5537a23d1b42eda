//! Trace files written by a check replay to the same path, from memory and
//! from disk.

use lock_tests::graphs::{check, check_with, BRANCH, DIAMOND, LOOP};
use porsearch_harness::error::HarnessError;
use porsearch_harness::runner::{replay, replay_file};
use porsearch_search::chooser::{GuidedTransitionChooser, TransitionChooser};
use porsearch_search::error::ReplayError;
use porsearch_search::guide::Guide;
use porsearch_search::policy::SearchPolicy;

#[test]
fn reduced_loop_trace_replays_through_complement() {
    let graph = LOOP.build(&["t4"]);
    let report = check(&graph, &[4]);
    assert_eq!(report.path, vec![0, 1, 4]);
    assert_eq!(report.guide.choice_indices(), vec![Some(0), Some(1), None]);

    let execution = replay(&graph, report.guide.clone()).unwrap();
    assert_eq!(execution.states, vec![0, 1, 4]);
    let labels: Vec<&str> = execution.transitions.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["t0", "t2"]);
}

#[test]
fn trace_file_on_disk_replays() {
    let graph = DIAMOND.build(&[]);
    let report = check(&graph, &[3]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diamond.trace");
    std::fs::write(&path, &report.trace).unwrap();

    let execution = replay_file(&graph, &path).unwrap();
    assert_eq!(execution.states, report.path);
}

#[test]
fn guide_without_preamble_replays() {
    let graph = BRANCH.build(&[]);
    let text = "== Begin Trace ==\nLENGTH = 3\n1:0\n1:1\n1:-1\n";
    let guide: Guide = text.parse().unwrap();
    let execution = replay(&graph, guide).unwrap();
    assert_eq!(execution.states, vec![0, 1, 3]);
}

#[test]
fn diverged_model_is_a_guidance_mismatch() {
    let graph = BRANCH.build(&[]);
    let report = check(&graph, &[3]);

    let pruned = lock_tests::graphs::Topology {
        num_states: 4,
        edges: &[("t0", 0, 1), ("t1", 1, 2)],
    }
    .build(&[]);
    let err = replay(&pruned, report.guide.clone()).unwrap_err();
    assert!(
        matches!(
            err,
            HarnessError::Replay(ReplayError::GuidanceMismatch { step: 1, index: 1, .. })
        ),
        "got {err:?}"
    );
}

#[test]
fn identical_runs_share_digests() {
    let graph = LOOP.build(&["t4"]);
    let first = check(&graph, &[4]);
    let second = check(&graph, &[4]);
    assert_eq!(first.guide_hash, second.guide_hash);
    assert_eq!(first.trace_hash, second.trace_hash);
    assert_eq!(first.trace, second.trace);
}

#[test]
fn policy_is_part_of_the_trace_digest() {
    let graph = LOOP.build(&["t4"]);
    let plain = check(&graph, &[4]);
    let named = check_with(
        &graph,
        &[4],
        SearchPolicy {
            name: Some("named".into()),
            ..SearchPolicy::default()
        },
    );
    assert_eq!(plain.guide_hash, named.guide_hash, "same path, same guide");
    assert_ne!(plain.trace_hash, named.trace_hash, "preamble records the policy");
}

#[test]
fn chooser_stops_when_guide_is_exhausted() {
    let graph = BRANCH.build(&[]);
    let guide = Guide::from_choice_indices([Some(0)]);
    let mut chooser = GuidedTransitionChooser::new(&graph, guide);
    assert!(chooser.choose_enabled_transition(&0).unwrap().is_some());
    assert!(chooser.is_exhausted());
    assert!(chooser.choose_enabled_transition(&1).unwrap().is_none());
}
