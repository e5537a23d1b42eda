//! Transition choosers: pick one enabled transition per visited state.
//!
//! [`GuidedTransitionChooser`] replays a recorded [`Guide`] with the same
//! candidate ordering the searcher used: ample set first, then the
//! complement of the ample set in the full set. It performs no reduction and
//! no deduplication of its own.

use std::fmt::Debug;
use std::path::Path;

use porsearch_kernel::model::enabler::{ample_complement, Enabler};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::error::{ReplayError, TraceParseError};
use crate::guide::Guide;

/// Chooses the transition to execute from a state.
pub trait TransitionChooser<S, T> {
    /// Returns `Ok(None)` when no transition should be executed from `state`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] if the chooser cannot honor its own record for
    /// `state`.
    fn choose_enabled_transition(&mut self, state: &S) -> Result<Option<T>, ReplayError>;
}

/// Replays the choices recorded in a [`Guide`].
pub struct GuidedTransitionChooser<'a, S, T> {
    enabler: &'a dyn Enabler<S, T>,
    guide: Guide,
    step: usize,
}

impl<'a, S, T> GuidedTransitionChooser<'a, S, T> {
    #[must_use]
    pub fn new(enabler: &'a dyn Enabler<S, T>, guide: Guide) -> Self {
        Self {
            enabler,
            guide,
            step: 0,
        }
    }

    /// Build a chooser from a trace file on disk.
    ///
    /// # Errors
    ///
    /// Returns any [`TraceParseError`] from reading the file.
    pub fn from_file(enabler: &'a dyn Enabler<S, T>, path: &Path) -> Result<Self, TraceParseError> {
        Ok(Self::new(enabler, Guide::read_file(path)?))
    }

    /// Declared number of steps in the recorded path.
    #[must_use]
    pub fn length(&self) -> usize {
        self.guide.length()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.guide.is_exhausted()
    }

    /// Number of recorded steps consumed so far.
    #[must_use]
    pub fn steps_taken(&self) -> usize {
        self.step
    }
}

impl<S, T> TransitionChooser<S, T> for GuidedTransitionChooser<'_, S, T>
where
    S: Debug,
    T: Clone + PartialEq,
{
    fn choose_enabled_transition(&mut self, state: &S) -> Result<Option<T>, ReplayError> {
        let Some(choice) = self.guide.take_choice() else {
            return Ok(None);
        };
        let step = self.step;
        self.step += 1;
        let Some(index) = choice else {
            trace!(step, "guide terminator");
            return Ok(None);
        };

        let ample = self.enabler.ample_set(state);
        let mismatch = |available: usize| ReplayError::GuidanceMismatch {
            step,
            index,
            available,
            state: format!("{state:?}"),
        };

        if let Some(transition) = ample.get(index) {
            trace!(step, index, "chose from ample set");
            return Ok(Some(transition.clone()));
        }
        let ample_len = ample.len();
        let mut complement = ample_complement(self.enabler.full_set(state), &ample);
        let available = ample_len + complement.len();
        if index - ample_len < complement.len() {
            trace!(step, index, "chose from ample complement");
            Ok(Some(complement.swap_remove(index - ample_len)))
        } else {
            Err(mismatch(available))
        }
    }
}

/// Chooses uniformly among the full set, reproducibly for a given seed.
pub struct RandomTransitionChooser<'a, S, T> {
    enabler: &'a dyn Enabler<S, T>,
    rng: StdRng,
}

impl<'a, S, T> RandomTransitionChooser<'a, S, T> {
    #[must_use]
    pub fn new(enabler: &'a dyn Enabler<S, T>, seed: u64) -> Self {
        Self {
            enabler,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<S, T> TransitionChooser<S, T> for RandomTransitionChooser<'_, S, T> {
    fn choose_enabled_transition(&mut self, state: &S) -> Result<Option<T>, ReplayError> {
        let mut full = self.enabler.full_set(state);
        if full.is_empty() {
            return Ok(None);
        }
        let index = self.rng.gen_range(0..full.len());
        Ok(Some(full.swap_remove(index)))
    }
}
