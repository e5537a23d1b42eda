//! Depth bounds cap the stack; minimization re-admits states found along
//! strictly shorter paths.

use porsearch_harness::runner::enumerate_findings;
use porsearch_harness::worlds::matrix_graph::{MatrixGraph, StateSetPredicate};
use porsearch_kernel::model::predicate::Never;
use porsearch_search::policy::SearchPolicy;
use porsearch_search::search::DfsSearcher;

/// `0 → 1 → 2 → 3` explored first, then the shortcut `0 → 3`, then the
/// detour `0 → 4 → 3`.
fn shortcut() -> MatrixGraph {
    MatrixGraph::from_edges(
        5,
        [
            ("a", 0, 1),
            ("b", 1, 2),
            ("c", 2, 3),
            ("short", 0, 3),
            ("d", 0, 4),
            ("e", 4, 3),
        ],
    )
    .unwrap()
}

fn line(len: usize) -> MatrixGraph {
    MatrixGraph::from_edges(len, (1..len).map(|i| ("next", i - 1, i))).unwrap()
}

#[test]
fn bound_stops_descent() {
    let graph = line(10);
    let mut dfs = DfsSearcher::new(&graph, &graph, &Never, SearchPolicy::default()).unwrap();
    dfs.bound_depth(4);
    assert!(dfs.is_depth_bounded());

    assert!(!dfs.search_from(0));
    assert_eq!(dfs.num_search_nodes_saved(), 4, "states 0..=3 fit in 4 frames");
}

#[test]
fn bounded_stack_never_exceeds_bound() {
    let graph = shortcut();
    let every_state = |_: &usize| true;
    let mut dfs = DfsSearcher::new(&graph, &graph, &every_state, SearchPolicy::default()).unwrap();
    dfs.bound_depth(2);

    let mut found = dfs.search_from(0);
    while found {
        assert!(dfs.stack().len() <= 2, "stack grew to {}", dfs.stack().len());
        found = dfs.search();
    }
}

#[test]
fn unbound_restores_full_exploration() {
    let graph = line(6);
    let mut dfs = DfsSearcher::new(&graph, &graph, &Never, SearchPolicy::default()).unwrap();
    dfs.bound_depth(2);
    dfs.unbound_depth();
    assert!(dfs.depth_bound().is_none());
    assert!(!dfs.search_from(0));
    assert_eq!(dfs.num_search_nodes_saved(), 6);
}

#[test]
fn bound_from_policy_json() {
    let policy = SearchPolicy::from_json_bytes(br#"{"depth_bound":3}"#).unwrap();
    let graph = line(10);
    let mut dfs = DfsSearcher::new(&graph, &graph, &Never, policy).unwrap();
    assert!(!dfs.search_from(0));
    assert_eq!(dfs.num_search_nodes_saved(), 3);
}

#[test]
fn minimization_readmits_along_shorter_path() {
    let graph = shortcut();
    let policy = SearchPolicy {
        minimize: true,
        ..SearchPolicy::default()
    };
    let findings = enumerate_findings(&graph, &StateSetPredicate::new([3]), policy, 10).unwrap();
    assert_eq!(findings, vec![vec![0, 1, 2, 3], vec![0, 3]]);
}

#[test]
fn without_minimization_first_path_wins() {
    let graph = shortcut();
    let findings =
        enumerate_findings(&graph, &StateSetPredicate::new([3]), SearchPolicy::default(), 10)
            .unwrap();
    assert_eq!(findings, vec![vec![0, 1, 2, 3]]);
}

#[test]
fn minimization_keeps_the_shortest_depth() {
    let graph = shortcut();
    let mut dfs = DfsSearcher::new(&graph, &graph, &Never, SearchPolicy::default()).unwrap();
    dfs.set_minimize(true);
    assert!(!dfs.search_from(0));

    let three = dfs.registry().find(&3).unwrap();
    assert_eq!(
        dfs.node(three).unwrap().depth(),
        Some(1),
        "the detour through 4 must not replace the shortcut depth"
    );
    assert_eq!(dfs.num_states_seen(), 6, "state 3 is pushed twice");
}
