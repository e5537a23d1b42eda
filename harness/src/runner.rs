//! Harness runner: drives `porsearch_search` over a [`ModelWorld`].
//!
//! The runner uses ONLY search crate APIs: `DfsSearcher`,
//! `GuidedTransitionChooser`, `RandomTransitionChooser` and the trace file
//! codec. It does not implement any search logic itself.
//!
//! # Runs
//!
//! ```text
//! run_check()   search_from(initial) → verdict → write_trace_file() → hash
//! replay()      guide → [choose → next_state] × (length − 1)
//! simulate()    seed  → [choose → next_state] until predicate / deadlock / cap
//! run_config()  CheckConfig → load world → run_check() + simulate()
//! ```

use std::fmt::Debug;
use std::hash::Hash;
use std::path::Path;

use porsearch_kernel::model::predicate::StatePredicate;
use porsearch_kernel::proof::hash::ContentHash;
use porsearch_search::chooser::{
    GuidedTransitionChooser, RandomTransitionChooser, TransitionChooser,
};
use porsearch_search::guide::Guide;
use porsearch_search::policy::SearchPolicy;
use porsearch_search::search::DfsSearcher;
use porsearch_search::trace_writer::{trace_file_hash, TraceFile};
use tracing::info;

use crate::config::CheckConfig;
use crate::contract::ModelWorld;
use crate::error::HarnessError;
use crate::worlds::matrix_graph::Transition;

/// How a check ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckVerdict {
    /// The predicate holds at a reachable state.
    Violation,
    /// A cycle was reached while cycles are reported.
    CycleFound,
    /// Every reachable state was explored without a finding.
    Exhausted,
}

/// Result of [`run_check`].
#[derive(Debug, Clone)]
pub struct CheckReport<S> {
    pub verdict: CheckVerdict,
    /// States along the stack when the search stopped. Empty when exhausted.
    pub path: Vec<S>,
    pub guide: Guide,
    pub guide_hash: ContentHash,
    /// Complete trace file: JSON preamble plus guide.
    pub trace: Vec<u8>,
    pub trace_hash: ContentHash,
    pub states_seen: usize,
    pub transitions: usize,
    pub states_matched: usize,
    pub nodes_saved: usize,
}

impl<S> CheckReport<S> {
    #[must_use]
    pub fn found(&self) -> bool {
        self.verdict != CheckVerdict::Exhausted
    }
}

/// Search `world` from its initial state for a state where `predicate`
/// holds.
///
/// # Errors
///
/// Returns [`HarnessError::Search`] if `policy` is invalid or the trace file
/// cannot be written.
pub fn run_check<S, T, W>(
    world: &W,
    predicate: &dyn StatePredicate<S>,
    policy: SearchPolicy,
) -> Result<CheckReport<S>, HarnessError>
where
    S: Clone + Eq + Hash + Debug,
    T: Clone + PartialEq + Debug,
    W: ModelWorld<S, T>,
{
    let mut dfs: DfsSearcher<'_, S, T> = DfsSearcher::new(world, world, predicate, policy)?;
    let found = dfs.search_from(world.initial_state());
    let verdict = match (found, dfs.cycle_found()) {
        (false, _) => CheckVerdict::Exhausted,
        (true, true) => CheckVerdict::CycleFound,
        (true, false) => CheckVerdict::Violation,
    };

    let mut trace = Vec::new();
    dfs.write_trace_file(&mut trace, application_data(world))?;
    let guide = dfs.guide();

    let report = CheckReport {
        verdict,
        path: dfs.path().into_iter().cloned().collect(),
        guide_hash: guide.content_hash(),
        guide,
        trace_hash: trace_file_hash(&trace),
        trace,
        states_seen: dfs.num_states_seen(),
        transitions: dfs.num_transitions(),
        states_matched: dfs.num_states_matched(),
        nodes_saved: dfs.num_search_nodes_saved(),
    };
    info!(
        world = world.world_id(),
        verdict = ?report.verdict,
        depth = report.path.len(),
        states_seen = report.states_seen,
        transitions = report.transitions,
        states_matched = report.states_matched,
        "check finished"
    );
    Ok(report)
}

/// Collect the path of every finding, resuming the search after each one.
///
/// Stops after `limit` findings.
///
/// # Errors
///
/// Returns [`HarnessError::Search`] if `policy` is invalid.
pub fn enumerate_findings<S, T, W>(
    world: &W,
    predicate: &dyn StatePredicate<S>,
    policy: SearchPolicy,
    limit: usize,
) -> Result<Vec<Vec<S>>, HarnessError>
where
    S: Clone + Eq + Hash + Debug,
    T: Clone + PartialEq + Debug,
    W: ModelWorld<S, T>,
{
    let mut dfs: DfsSearcher<'_, S, T> = DfsSearcher::new(world, world, predicate, policy)?;
    let mut findings = Vec::new();
    let mut found = dfs.search_from(world.initial_state());
    while found && findings.len() < limit {
        findings.push(dfs.path().into_iter().cloned().collect());
        found = dfs.search();
    }
    info!(
        world = world.world_id(),
        findings = findings.len(),
        states_seen = dfs.num_states_seen(),
        "enumeration finished"
    );
    Ok(findings)
}

/// States and transitions along an executed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution<S, T> {
    /// Visited states, starting with the initial state.
    pub states: Vec<S>,
    /// `transitions[i]` leads from `states[i]` to `states[i + 1]`.
    pub transitions: Vec<T>,
}

impl<S, T> Execution<S, T> {
    fn starting_at(initial: S) -> Self {
        Self {
            states: vec![initial],
            transitions: Vec::new(),
        }
    }

    /// The last state reached.
    #[must_use]
    pub fn last_state(&self) -> Option<&S> {
        self.states.last()
    }

    fn push_step<W: ModelWorld<S, T> + ?Sized>(&mut self, world: &W, transition: T) {
        let Some(source) = self.states.last() else {
            return;
        };
        let step = world.next_state(source, &transition);
        world.on_trace_step(source, &transition, &step);
        self.states.push(step.final_state);
        self.transitions.push(transition);
    }
}

/// Reproduce the path recorded in `guide`.
///
/// The top frame of a recorded stack names no executed transition, so at
/// most `guide.length() - 1` transitions are replayed.
///
/// # Errors
///
/// Returns [`HarnessError::Replay`] if the guide diverges from `world`.
pub fn replay<S, T, W>(world: &W, guide: Guide) -> Result<Execution<S, T>, HarnessError>
where
    S: Clone + Debug,
    T: Clone + PartialEq,
    W: ModelWorld<S, T>,
{
    let steps = guide.length().saturating_sub(1);
    let mut chooser: GuidedTransitionChooser<'_, S, T> =
        GuidedTransitionChooser::new(world, guide);
    let mut execution = Execution::starting_at(world.initial_state());

    while execution.transitions.len() < steps {
        let Some(state) = execution.last_state() else {
            break;
        };
        let Some(transition) = chooser.choose_enabled_transition(state)? else {
            break;
        };
        execution.push_step(world, transition);
    }
    info!(
        world = world.world_id(),
        steps = execution.transitions.len(),
        declared = steps,
        "replay finished"
    );
    Ok(execution)
}

/// Replay a trace file written by [`run_check`].
///
/// # Errors
///
/// Returns [`HarnessError::TraceParse`] if the file is malformed,
/// [`HarnessError::InvalidWorld`] if its preamble names another world, and
/// any error of [`replay`].
pub fn replay_file<S, T, W>(world: &W, path: &Path) -> Result<Execution<S, T>, HarnessError>
where
    S: Clone + Debug,
    T: Clone + PartialEq,
    W: ModelWorld<S, T>,
{
    let file = TraceFile::read(path)?;
    if let Some(preamble) = &file.preamble {
        let expected = application_data(world);
        if preamble.application != expected {
            return Err(HarnessError::InvalidWorld {
                detail: format!(
                    "trace recorded for {}, replaying against {expected}",
                    preamble.application
                ),
            });
        }
    }
    replay(world, file.guide)
}

/// Result of [`simulate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation<S, T> {
    pub execution: Execution<S, T>,
    /// Whether the walk stopped because the predicate holds.
    pub predicate_held: bool,
}

/// Random walk from the initial state, reproducible for a given `seed`.
///
/// Stops when the predicate holds, when no transition is enabled, or after
/// `max_steps` transitions.
///
/// # Errors
///
/// Returns [`HarnessError::Replay`] if the chooser fails.
pub fn simulate<S, T, W>(
    world: &W,
    predicate: &dyn StatePredicate<S>,
    seed: u64,
    max_steps: usize,
) -> Result<Simulation<S, T>, HarnessError>
where
    W: ModelWorld<S, T>,
{
    let mut chooser: RandomTransitionChooser<'_, S, T> =
        RandomTransitionChooser::new(world, seed);
    let mut execution = Execution::starting_at(world.initial_state());
    let mut predicate_held = false;

    while let Some(state) = execution.last_state() {
        if predicate.holds_at(state) {
            predicate_held = true;
            break;
        }
        if execution.transitions.len() >= max_steps {
            break;
        }
        let Some(transition) = chooser.choose_enabled_transition(state)? else {
            break;
        };
        execution.push_step(world, transition);
    }
    info!(
        world = world.world_id(),
        seed,
        steps = execution.transitions.len(),
        predicate_held,
        "simulation finished"
    );
    Ok(Simulation {
        execution,
        predicate_held,
    })
}

/// Result of [`run_config`].
#[derive(Debug, Clone)]
pub struct ConfiguredRun {
    pub check: CheckReport<usize>,
    pub simulation: Simulation<usize, Transition>,
}

/// Load the world named by `config`, check it for the configured violation
/// states, then take one seeded random walk towards them.
///
/// # Errors
///
/// Returns any error of [`CheckConfig::load_world`], [`run_check`], or
/// [`simulate`].
pub fn run_config(config: &CheckConfig) -> Result<ConfiguredRun, HarnessError> {
    let world = config.load_world()?;
    let check = run_check(&world, &config.violation_states, config.policy.clone())?;
    let simulation = simulate(
        &world,
        &config.violation_states,
        config.seed,
        config.max_simulation_steps,
    )?;
    info!(
        world = %config.world.display(),
        verdict = ?check.verdict,
        simulated_steps = simulation.execution.transitions.len(),
        "configured run finished"
    );
    Ok(ConfiguredRun { check, simulation })
}

fn application_data<S, T, W: ModelWorld<S, T> + ?Sized>(world: &W) -> serde_json::Value {
    serde_json::json!({
        "world": world.world_id(),
        "parameters": world.parameters(),
    })
}
