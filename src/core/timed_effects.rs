//! # Timed Effects
//!
//! A frame-driven replacement for timer callbacks. Effects are stored as
//! `(remaining, effect)` pairs and counted down explicitly by the owner every tick, so
//! nothing fires outside of the simulation step.

use web_time::Duration;

/// A list of effects waiting for their delay to elapse.
///
/// Effects scheduled with the same delay fire in the order they were scheduled.
#[derive(Debug)]
pub struct TimedEffects<E> {
    pending: Vec<(Duration, E)>,
}

impl<E> TimedEffects<E> {
    /// Creates an empty effect list.
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Queues `effect` to fire once `delay` of simulation time has passed.
    pub fn schedule(&mut self, delay: Duration, effect: E) {
        self.pending.push((delay, effect));
    }

    /// Advances every pending effect by `elapsed` and returns the ones that became due.
    ///
    /// A zero-delay effect fires on the very next tick, even when `elapsed` is zero.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<E> {
        let mut fired = Vec::new();
        let mut remaining = Vec::with_capacity(self.pending.len());

        for (delay, effect) in self.pending.drain(..) {
            if delay <= elapsed {
                fired.push(effect);
            } else {
                remaining.push((delay - elapsed, effect));
            }
        }

        self.pending = remaining;
        fired
    }

    /// Number of effects that have not fired yet.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E> Default for TimedEffects<E> {
    fn default() -> Self {
        Self::new()
    }
}
