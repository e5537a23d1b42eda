//! Cross-process determinism for check traces.
//!
//! Spawns the `trace_fixture` binary under 5 environment variants and
//! asserts all produce identical stdout.

use std::path::Path;
use std::process::Command;

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("trace_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command.current_dir(work_dir);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "trace_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_five_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    for expected in [
        "violation_verdict=Violation",
        "violation_path=[0, 1, 4]",
        "violation_guide_digest=sha256:",
        "violation_trace_digest=sha256:",
        "states_seen=5",
        "transitions=5",
        "states_matched=1",
        "replayed_path=[0, 1, 4]",
        "cycle_verdict=CycleFound",
        "cycle_path=[0, 1, 2, 3]",
        "preamble_world=\"matrix_graph\"",
        "preamble_parameters={\"initial\":0,\"num_states\":5}",
        "LENGTH = 3",
    ] {
        assert!(
            baseline.contains(expected),
            "baseline output missing {expected}:\n{baseline}"
        );
    }

    // Variant 2: different cwd.
    let alt_cwd = if cfg!(target_os = "windows") {
        "C:\\"
    } else {
        "/tmp"
    };
    let variant_cwd = run_variant(alt_cwd, &[]);
    assert_eq!(
        baseline, variant_cwd,
        "output differs when cwd changes from {root} to {alt_cwd}"
    );

    // Variant 3: different locale env.
    let variant_locale = run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(baseline, variant_locale, "output differs when LC_ALL=C LANG=C");

    // Variant 4: spurious env vars.
    let variant_noise = run_variant(
        &root,
        &[
            ("PORSEARCH_NOISE", "should_not_matter"),
            ("TZ", "America/New_York"),
            ("HOME", "/nonexistent"),
        ],
    );
    assert_eq!(baseline, variant_noise, "output differs with spurious env vars");

    // Variant 5: verbose logging goes to stderr only.
    let variant_logging = run_variant(&root, &[("RUST_LOG", "trace")]);
    assert_eq!(baseline, variant_logging, "output differs with RUST_LOG=trace");
}
