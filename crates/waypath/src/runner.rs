//! Driving a solver from a background thread.
//!
//! The worker ticks the solver in small steps while holding its lock, and
//! releases the lock between steps. Observers call [`Runner::snapshot`],
//! which takes the same lock, so they only ever see the solver between
//! ticks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::SolveResult;
use crate::policy::SearchPolicy;
use crate::solver::{Snapshot, SolveState, Solver};
use crate::stop::StopToken;
use crate::traverser::{GraphNode, Traverser};

/// Pacing of a [`Runner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Ticks run per lock acquisition.
    pub ticks_per_step: u64,
    /// Sleep between steps. Zero only yields.
    pub pause: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            ticks_per_step: 64,
            pause: Duration::ZERO,
        }
    }
}

impl RunnerConfig {
    #[must_use]
    pub fn ticks_per_step(mut self, ticks: u64) -> Self {
        self.ticks_per_step = ticks.max(1);
        self
    }

    #[must_use]
    pub fn pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }
}

type Shared<N, T, P> = Arc<Mutex<Solver<N, T, P>>>;

fn lock<N, T, P>(shared: &Shared<N, T, P>) -> MutexGuard<'_, Solver<N, T, P>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A solver running on its own thread.
///
/// Dropping a runner stops the worker and waits for it.
pub struct Runner<N, T, P> {
    solver: Shared<N, T, P>,
    halt: StopToken,
    pause_solver: StopToken,
    handle: Option<JoinHandle<SolveResult<SolveState>>>,
}

impl<N, T, P> Runner<N, T, P>
where
    N: GraphNode + Send + 'static,
    T: Traverser<N> + Send + 'static,
    P: SearchPolicy + Send + 'static,
{
    /// Move `solver` onto a new worker thread and start ticking it.
    pub fn spawn(solver: Solver<N, T, P>, config: RunnerConfig) -> Self {
        let pause_solver = solver.stop_token();
        let solver = Arc::new(Mutex::new(solver));
        let halt = StopToken::new();

        let shared = Arc::clone(&solver);
        let halted = halt.clone();
        let paused = pause_solver.clone();
        let step = config.ticks_per_step.max(1);
        let handle = thread::spawn(move || -> SolveResult<SolveState> {
            loop {
                let state = lock(&shared).start(Some(step))?;
                if state.is_terminal() || halted.is_requested() {
                    // The step may have ended on its budget before seeing
                    // the pause, which must not leak into a later start.
                    paused.take();
                    log::debug!("runner worker exiting with state {state}");
                    return Ok(state);
                }
                if config.pause.is_zero() {
                    thread::yield_now();
                } else {
                    thread::sleep(config.pause);
                }
            }
        });

        Self {
            solver,
            halt,
            pause_solver,
            handle: Some(handle),
        }
    }

    /// Copy the solver's progress. Never observes a half-finished tick.
    pub fn snapshot(&self) -> Snapshot<N> {
        lock(&self.solver).snapshot()
    }

    /// Read the solver under its lock.
    pub fn with_solver<R>(&self, f: impl FnOnce(&Solver<N, T, P>) -> R) -> R {
        f(&lock(&self.solver))
    }

    /// Ask the worker to stop after the tick in progress. The solver is
    /// left paused, not finished.
    pub fn stop(&self) {
        self.pause_solver.request();
        self.halt.request();
    }

    /// Whether the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the worker and return the state it left the solver in.
    ///
    /// Calling `join` again returns the solver's current state.
    pub fn join(&mut self) -> SolveResult<SolveState> {
        match self.handle.take() {
            Some(handle) => match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            },
            None => Ok(lock(&self.solver).state()),
        }
    }

    /// Wait for the worker and take the solver back, e.g. to resume a
    /// stopped search on the current thread. The worker's result is
    /// dropped; an aborted solve is still visible as `Failure`.
    pub fn into_solver(mut self) -> Solver<N, T, P> {
        let _ = self.join();
        // A stop requested after the worker exited was never seen.
        self.pause_solver.take();
        let shared = Arc::clone(&self.solver);
        drop(self);
        let Some(mutex) = Arc::into_inner(shared) else {
            unreachable!("runner worker still holds the solver after join");
        };
        mutex.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<N, T, P> Drop for Runner<N, T, P> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.pause_solver.request();
            self.halt.request();
            let _ = handle.join();
        }
    }
}
