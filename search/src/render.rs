//! Human-readable rendering of the search stack and counters.
//!
//! Output is diagnostic only. The trace format that replay consumes lives in
//! [`crate::guide`].

use std::fmt::Debug;
use std::hash::Hash;
use std::io::Write;

use crate::search::DfsSearcher;

impl<S, T> DfsSearcher<'_, S, T>
where
    S: Clone + Eq + Hash + Debug,
    T: Clone + PartialEq + Debug,
{
    /// Print the stack, one `Step n:` line per frame.
    ///
    /// Each step shows its state and the transition taken from it, closed by
    /// ` -> ` and the state that transition reached:
    ///
    /// ```text
    /// Step 1: s0 --t0 -> s1
    /// Step 2: s1 --t1 -> s2
    /// Step 3: s2
    /// ```
    ///
    /// With `long_format` the long rendering of each reached state is
    /// printed, framed by blank lines, before the step that leaves it. With
    /// `summarize` only step 1 and the top `summary_cutoff - 1` steps are
    /// listed; three `.` lines stand in for the rest.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `out`.
    pub fn print_stack<W: Write + ?Sized>(
        &self,
        out: &mut W,
        long_format: bool,
        summarize: bool,
    ) -> std::io::Result<()> {
        let size = self.stack.len();
        if size == 0 {
            writeln!(out, "  <EMPTY>")?;
            return out.flush();
        }

        let cutoff = self.policy.summary_cutoff;
        let step_shown = |i: usize| !summarize || i == 0 || size - i < cutoff;

        for (i, entry) in self.stack.iter().enumerate() {
            let state = self.registry.get(entry.node()).state();

            if i == 0 || step_shown(i - 1) {
                if i > 0 {
                    writeln!(out, " -> {}", self.manager.state_short(state))?;
                }
                if long_format {
                    writeln!(out)?;
                    writeln!(out, "{}", self.manager.state_long(state))?;
                    writeln!(out)?;
                }
            }
            if summarize && i > 1 && size - i + 1 == cutoff {
                for _ in 0..3 {
                    writeln!(out, "     .")?;
                }
            }
            if step_shown(i) {
                write!(out, "Step {}: {}", i + 1, self.manager.state_short(state))?;
                if let Some(transition) = entry.peek() {
                    write!(out, " --{}", self.manager.transition_short(transition))?;
                }
            }
        }
        writeln!(out)?;
        out.flush()
    }

    /// Print a trace summary followed by the full trace details.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `out`.
    pub fn print_trace<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        let prefix = self.name().map(|n| format!("{n} ")).unwrap_or_default();
        writeln!(out, "{prefix}Trace summary:")?;
        writeln!(out)?;
        self.print_stack(out, false, false)?;
        writeln!(out)?;
        writeln!(out, "{prefix}Trace details:")?;
        self.print_stack(out, true, false)
    }

    /// Print the search counters.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `out`.
    pub fn print_summary<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Number of states seen:    {}", self.num_states_seen())?;
        writeln!(out, "Number of transitions:    {}", self.num_transitions())?;
        writeln!(out, "Number of states matched: {}", self.num_states_matched())?;
        writeln!(out, "Number of states saved:   {}", self.num_search_nodes_saved())?;
        out.flush()
    }
}
