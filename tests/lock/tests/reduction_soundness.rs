//! Reduced and unreduced searches agree on whether a violation exists.
//!
//! Each case names a topology, the transitions marked ample, the violating
//! states, and whether a violation is expected. The reduced graph, the same
//! graph with markers removed, and a random walk are all checked.

use lock_tests::graphs::{check, Topology, BRANCH, CHAIN, DIAMOND, LOOP, SIMPLE, SINGLE};
use porsearch_harness::runner::simulate;
use porsearch_kernel::model::predicate::Never;

struct Case {
    name: &'static str,
    topology: Topology,
    ample: &'static [&'static str],
    violations: &'static [usize],
    expect_violation: bool,
}

const CASES: &[Case] = &[
    Case {
        name: "single_no_violation",
        topology: SINGLE,
        ample: &[],
        violations: &[],
        expect_violation: false,
    },
    Case {
        name: "simple_no_ample_no_violation",
        topology: SIMPLE,
        ample: &[],
        violations: &[],
        expect_violation: false,
    },
    Case {
        name: "simple_ample_no_violation",
        topology: SIMPLE,
        ample: &["t0"],
        violations: &[],
        expect_violation: false,
    },
    Case {
        name: "simple_no_ample_violation",
        topology: SIMPLE,
        ample: &[],
        violations: &[1],
        expect_violation: true,
    },
    Case {
        name: "simple_ample_violation",
        topology: SIMPLE,
        ample: &["t0"],
        violations: &[1],
        expect_violation: true,
    },
    Case {
        name: "chain_ample_no_violation",
        topology: CHAIN,
        ample: &["t0"],
        violations: &[],
        expect_violation: false,
    },
    Case {
        name: "chain_ample_violation_midway",
        topology: CHAIN,
        ample: &["t0"],
        violations: &[1],
        expect_violation: true,
    },
    Case {
        name: "branch_no_ample_no_violation",
        topology: BRANCH,
        ample: &[],
        violations: &[],
        expect_violation: false,
    },
    Case {
        name: "branch_ample_no_violation",
        topology: BRANCH,
        ample: &["t1"],
        violations: &[],
        expect_violation: false,
    },
    Case {
        name: "branch_no_ample_violation_on_root",
        topology: BRANCH,
        ample: &[],
        violations: &[0],
        expect_violation: true,
    },
    Case {
        name: "branch_no_ample_violation_on_trunk",
        topology: BRANCH,
        ample: &[],
        violations: &[1],
        expect_violation: true,
    },
    Case {
        name: "branch_no_ample_violation_on_branch",
        topology: BRANCH,
        ample: &[],
        violations: &[2, 3],
        expect_violation: true,
    },
    Case {
        name: "branch_ample_violation_on_root",
        topology: BRANCH,
        ample: &["t0", "t1"],
        violations: &[0],
        expect_violation: true,
    },
    Case {
        name: "branch_ample_violation_on_trunk",
        topology: BRANCH,
        ample: &["t0", "t1"],
        violations: &[1],
        expect_violation: true,
    },
    Case {
        name: "branch_ample_violation_on_branch",
        topology: BRANCH,
        ample: &["t0", "t1"],
        violations: &[2, 3],
        expect_violation: true,
    },
    Case {
        name: "diamond_violation_on_join",
        topology: DIAMOND,
        ample: &[],
        violations: &[3],
        expect_violation: true,
    },
    Case {
        name: "loop_no_ample_no_violation",
        topology: LOOP,
        ample: &[],
        violations: &[],
        expect_violation: false,
    },
    Case {
        name: "loop_ample_on_root_no_violation",
        topology: LOOP,
        ample: &["t0"],
        violations: &[],
        expect_violation: false,
    },
    Case {
        name: "loop_ample_on_intersection_no_violation",
        topology: LOOP,
        ample: &["t1", "t2"],
        violations: &[],
        expect_violation: false,
    },
    Case {
        name: "loop_ample_on_loop_no_violation",
        topology: LOOP,
        ample: &["t4"],
        violations: &[],
        expect_violation: false,
    },
    Case {
        name: "loop_ample_on_loop_violation_on_exit",
        topology: LOOP,
        ample: &["t4"],
        violations: &[4],
        expect_violation: true,
    },
];

#[test]
fn reduced_and_unreduced_agree() {
    for case in CASES {
        let reduced = case.topology.build(case.ample);
        let unreduced = reduced.unreduced();

        let reduced_found = check(&reduced, case.violations).found();
        let unreduced_found = check(&unreduced, case.violations).found();

        assert_eq!(
            reduced_found, case.expect_violation,
            "{}: reduced search returned {reduced_found}",
            case.name
        );
        assert_eq!(
            unreduced_found, case.expect_violation,
            "{}: unreduced search returned {unreduced_found}",
            case.name
        );
    }
}

#[test]
fn random_walk_ends_in_deadlock() {
    for case in CASES {
        let graph = case.topology.build(case.ample);
        let sim = simulate(&graph, &Never, 17, 10_000).unwrap();
        let last = *sim.execution.last_state().unwrap();
        assert!(
            graph.existing_transitions(last).is_empty(),
            "{}: random walk stopped at {last}, which still has enabled transitions",
            case.name
        );
    }
}

#[test]
fn reduction_never_saves_more_states() {
    for case in CASES {
        let reduced = case.topology.build(case.ample);
        let unreduced = reduced.unreduced();
        let reduced_nodes = check(&reduced, &[]).nodes_saved;
        let unreduced_nodes = check(&unreduced, &[]).nodes_saved;
        assert!(
            reduced_nodes <= unreduced_nodes,
            "{}: reduced search registered {reduced_nodes} states, unreduced {unreduced_nodes}",
            case.name
        );
    }
}
