//! Back edges onto the stack are reported as cycles only when asked for.

use lock_tests::graphs::{check_with, DIAMOND, LOOP};
use porsearch_harness::runner::{replay, CheckVerdict};
use porsearch_kernel::model::predicate::Never;
use porsearch_search::policy::SearchPolicy;
use porsearch_search::search::DfsSearcher;

fn reporting_cycles() -> SearchPolicy {
    SearchPolicy {
        report_cycle_as_violation: true,
        ..SearchPolicy::default()
    }
}

#[test]
fn loop_is_reported_when_cycles_are_violations() {
    let graph = LOOP.build(&["t4"]);
    let mut dfs = DfsSearcher::new(&graph, &graph, &Never, reporting_cycles()).unwrap();

    assert!(dfs.search_from(0));
    assert!(dfs.cycle_found());
    assert_eq!(dfs.path(), vec![&0, &1, &2, &3]);
    let top = dfs.stack().last().unwrap();
    assert_eq!(
        top.peek().map(|t| t.target),
        Some(1),
        "top frame points at the back edge"
    );
}

#[test]
fn loop_is_not_a_violation_by_default() {
    let graph = LOOP.build(&["t4"]);
    let mut dfs = DfsSearcher::new(&graph, &graph, &Never, SearchPolicy::default()).unwrap();

    assert!(!dfs.search_from(0));
    assert!(!dfs.cycle_found());
}

#[test]
fn rejoining_paths_are_not_cycles() {
    let graph = DIAMOND.build(&[]);
    let report = check_with(&graph, &[], reporting_cycles());
    assert_eq!(
        report.verdict,
        CheckVerdict::Exhausted,
        "state 3 is seen twice but never while on the stack"
    );
    assert_eq!(report.states_matched, 1);
}

#[test]
fn resuming_after_a_cycle_consumes_the_back_edge() {
    let graph = LOOP.build(&[]);
    let mut dfs = DfsSearcher::new(&graph, &graph, &Never, reporting_cycles()).unwrap();

    assert!(dfs.search_from(0));
    let matched_at_cycle = dfs.num_states_matched();

    assert!(!dfs.search(), "no further cycle after the back edge is consumed");
    assert!(!dfs.cycle_found());
    assert_eq!(dfs.num_states_matched(), matched_at_cycle + 1);
    assert_eq!(dfs.num_search_nodes_saved(), 5);
}

#[test]
fn self_loop_is_a_cycle() {
    let graph = porsearch_harness::worlds::matrix_graph::MatrixGraph::from_edges(
        2,
        [("spin", 1, 1), ("go", 0, 1)],
    )
    .unwrap();
    let report = check_with(&graph, &[], reporting_cycles());
    assert_eq!(report.verdict, CheckVerdict::CycleFound);
    assert_eq!(report.path, vec![0, 1]);
}

#[test]
fn cycle_guide_replays_to_the_closing_state() {
    let graph = LOOP.build(&["t4"]);
    let report = check_with(&graph, &[], reporting_cycles());
    assert_eq!(report.verdict, CheckVerdict::CycleFound);

    let execution = replay(&graph, report.guide.clone()).unwrap();
    assert_eq!(execution.states, report.path);
}
