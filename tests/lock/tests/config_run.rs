//! Check runs described by a JSON configuration file next to the world file.

use lock_tests::graphs::LOOP;
use porsearch_harness::config::CheckConfig;
use porsearch_harness::runner::{replay_file, run_config, CheckVerdict};

fn write_loop_config(dir: &std::path::Path, config: &str) -> CheckConfig {
    let graph = LOOP.build(&["t4"]);
    std::fs::write(dir.join("loop.json"), graph.to_json_bytes().unwrap()).unwrap();
    let path = dir.join("check.json");
    std::fs::write(&path, config).unwrap();
    CheckConfig::load(&path).unwrap()
}

#[test]
fn config_drives_check_and_simulation() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_loop_config(
        dir.path(),
        r#"{"world":"loop.json","violation_states":[4],"seed":7}"#,
    );

    let run = run_config(&config).unwrap();
    assert_eq!(run.check.verdict, CheckVerdict::Violation);
    assert_eq!(run.check.path, vec![0, 1, 4]);
    assert!(run.simulation.predicate_held, "every walk leaves the loop eventually");
    assert_eq!(run.simulation.execution.last_state(), Some(&4));
}

#[test]
fn configured_cycle_policy_reaches_the_check() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_loop_config(
        dir.path(),
        r#"{"world":"loop.json","policy":{"report_cycle_as_violation":true}}"#,
    );

    let run = run_config(&config).unwrap();
    assert_eq!(run.check.verdict, CheckVerdict::CycleFound);
    assert_eq!(run.check.path, vec![0, 1, 2, 3]);
    assert!(!run.simulation.predicate_held);
}

#[test]
fn same_seed_gives_the_same_walk() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_loop_config(
        dir.path(),
        r#"{"world":"loop.json","seed":42,"max_simulation_steps":30}"#,
    );

    let first = run_config(&config).unwrap();
    let second = run_config(&config).unwrap();
    assert_eq!(first.simulation, second.simulation);
    assert!(first.simulation.execution.transitions.len() <= 30);
}

#[test]
fn configured_trace_replays_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_loop_config(
        dir.path(),
        r#"{"world":"loop.json","violation_states":[4]}"#,
    );
    let run = run_config(&config).unwrap();

    let trace_path = dir.path().join("check.trace");
    std::fs::write(&trace_path, &run.check.trace).unwrap();
    let execution = replay_file(&config.load_world().unwrap(), &trace_path).unwrap();
    assert_eq!(execution.states, run.check.path);
}
