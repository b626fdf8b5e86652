//! The tick-driven search engine shared by every algorithm.

use std::cell::OnceCell;
use std::fmt;

use crate::error::{Endpoint, SolveError, SolveResult, TraverseError};
use crate::metadata::{MetadataStore, NodeId, NodeMetadata, NodeStatus};
use crate::options::SolveOptions;
use crate::policy::{Frontier, SearchPolicy};
use crate::stop::StopToken;
use crate::traverser::{GraphNode, NodeTraverser, SelfTraversable, Traverser};

/// Lifecycle of a [`Solver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveState {
    /// Created or paused; `start` may be called.
    #[default]
    Waiting,
    /// Inside `start`.
    Running,
    /// The destination was reached.
    Success,
    /// The open set ran dry or the tick limit was hit.
    Failure,
}

impl SolveState {
    /// Whether the solve is over for good.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}

impl fmt::Display for SolveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Waiting => "waiting",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failure => "failure",
        })
    }
}

/// Result of a one-shot [`solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<N> {
    pub state: SolveState,
    pub path: Option<Vec<N>>,
    pub path_cost: Option<f64>,
    pub ticks: u64,
}

/// Read-only copy of a solver's progress, taken between ticks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<N> {
    pub state: SolveState,
    pub ticks: u64,
    pub open_count: usize,
    pub closed_count: usize,
    pub current: Option<N>,
    pub best_path: Vec<N>,
}

/// A single resumable search from an origin to a destination.
///
/// The solver starts out [`Waiting`](SolveState::Waiting). Each call to
/// [`start`](Self::start) runs ticks until the search ends or the tick
/// budget for that call is spent, in which case it pauses and can be
/// started again. Once it reports `Success` or `Failure` it cannot be
/// restarted.
pub struct Solver<N, T, P> {
    origin: N,
    destination: N,
    policy: P,
    traverser: T,
    options: SolveOptions,
    frontier: Frontier<N>,
    // Expansion order.
    closed: Vec<NodeId>,
    current: Option<NodeId>,
    // Expanded node with the lowest estimate to the destination so far.
    closest: NodeId,
    goal: Option<NodeId>,
    ticks: u64,
    state: SolveState,
    stop: StopToken,
    nbuf: Vec<N>,
    path: OnceCell<Vec<N>>,
    path_cost: OnceCell<f64>,
}

impl<N, P> Solver<N, NodeTraverser, P>
where
    N: SelfTraversable,
    P: SearchPolicy,
{
    /// Build a solver over a node type that provides its own costs and
    /// neighbors.
    pub fn for_nodes(origin: N, destination: N, policy: P) -> SolveResult<Self> {
        Self::new(origin, destination, policy, NodeTraverser)
    }
}

impl<N, T, P> Solver<N, T, P>
where
    N: GraphNode,
    T: Traverser<N>,
    P: SearchPolicy,
{
    /// Build a solver with default options.
    pub fn new(origin: N, destination: N, policy: P, traverser: T) -> SolveResult<Self> {
        Self::with_options(origin, destination, policy, traverser, SolveOptions::default())
    }

    /// Build a solver. The origin is queued immediately; no tick runs.
    pub fn with_options(
        origin: N,
        destination: N,
        policy: P,
        traverser: T,
        options: SolveOptions,
    ) -> SolveResult<Self> {
        if !traverser.contains(&origin) {
            return Err(SolveError::UnknownEndpoint(Endpoint::Origin));
        }
        if !traverser.contains(&destination) {
            return Err(SolveError::UnknownEndpoint(Endpoint::Destination));
        }

        let mut frontier = Frontier::new();
        let to_cost = traverser.estimated_cost(&origin, &destination);
        let origin_id = frontier.store.insert_origin(origin.clone(), to_cost);
        frontier.enqueue(&policy, origin_id);
        log::debug!(
            "{} solver created, estimate {to_cost} to destination, max ticks {:?}",
            policy.name(),
            options.max_ticks
        );

        Ok(Self {
            origin,
            destination,
            policy,
            traverser,
            options,
            frontier,
            closed: Vec::new(),
            current: None,
            closest: origin_id,
            goal: None,
            ticks: 0,
            state: SolveState::Waiting,
            stop: StopToken::new(),
            nbuf: Vec::with_capacity(8),
            path: OnceCell::new(),
            path_cost: OnceCell::new(),
        })
    }

    /// Run ticks until the search ends, `budget` ticks have run in this
    /// call, or a stop is requested.
    ///
    /// Returns the resulting state: `Waiting` when paused, otherwise
    /// `Success` or `Failure`. A traverser error aborts the solve: the
    /// state becomes `Failure` and the error is returned.
    pub fn start(&mut self, budget: Option<u64>) -> SolveResult<SolveState> {
        if self.state != SolveState::Waiting {
            return Err(SolveError::NotWaiting(self.state));
        }
        self.state = SolveState::Running;
        log::debug!(
            "{} solver running from tick {}, budget {budget:?}",
            self.policy.name(),
            self.ticks
        );

        let mut spent = 0u64;
        while self.state == SolveState::Running {
            if self.frontier.open.is_empty() {
                self.state = SolveState::Failure;
            } else if budget.is_some_and(|b| spent >= b) {
                self.state = SolveState::Waiting;
            } else if self.stop.take() {
                self.state = SolveState::Waiting;
            } else if self.options.max_ticks.is_some_and(|m| self.ticks >= m) {
                self.state = SolveState::Failure;
            } else {
                if let Err(err) = self.tick() {
                    self.state = SolveState::Failure;
                    log::warn!(
                        "{} solver aborted at tick {}: {err}",
                        self.policy.name(),
                        self.ticks
                    );
                    return Err(err.into());
                }
                spent += 1;
            }
        }

        log::debug!(
            "{} solver {} after {} tick(s), {} open, {} closed",
            self.policy.name(),
            self.state,
            self.ticks,
            self.open_count(),
            self.closed_count()
        );
        Ok(self.state)
    }

    /// Run until the search ends.
    pub fn run(&mut self) -> SolveResult<SolveState> {
        self.start(None)
    }

    /// Ask the solver to pause at the next tick boundary.
    pub fn stop(&self) {
        self.stop.request();
    }

    /// A handle that can pause this solver from another thread.
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    fn tick(&mut self) -> Result<(), TraverseError> {
        let Some(current) = self.frontier.pop_min() else {
            return Ok(());
        };
        self.frontier.store[current].status = NodeStatus::Closed;
        self.closed.push(current);
        self.current = Some(current);
        self.ticks += 1;

        let store = &self.frontier.store;
        if store[current].to_cost() < store[self.closest].to_cost() {
            self.closest = current;
        }
        log::trace!(
            "tick {}: expand {current} (g {}, h {})",
            self.ticks,
            store[current].from_cost(),
            store[current].to_cost()
        );
        if *store[current].node() == self.destination {
            self.finish(current);
            return Ok(());
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        if let Err(err) = self
            .traverser
            .traversable_nodes(self.frontier.store[current].node(), &mut nbuf)
        {
            self.nbuf = nbuf;
            return Err(err);
        }

        for node in nbuf.drain(..) {
            if node == *self.frontier.store[current].node() {
                continue;
            }
            let reached = node == self.destination;
            let id = self
                .frontier
                .store
                .get_or_create(node, current, &self.traverser, &self.destination);
            let meta = &self.frontier.store[id];
            if meta.status() == NodeStatus::Closed {
                continue;
            }
            let step = self
                .traverser
                .real_cost(self.frontier.store[current].node(), meta.node());
            if step < 0.0 {
                continue;
            }
            self.policy
                .process_neighbor(&mut self.frontier, current, id, step);
            if reached {
                self.finish(id);
                break;
            }
        }
        self.nbuf = nbuf;
        Ok(())
    }

    fn finish(&mut self, goal: NodeId) {
        self.goal = Some(goal);
        self.state = SolveState::Success;
    }

    /// Walk parent links from `id` back to the origin.
    fn trace(&self, id: NodeId) -> Vec<N> {
        let store = &self.frontier.store;
        let mut path = Vec::new();
        let mut cursor = Some(id);
        while let Some(i) = cursor {
            path.push(store[i].node().clone());
            cursor = store[i].parent();
        }
        path.reverse();
        path
    }

    #[inline]
    pub fn state(&self) -> SolveState {
        self.state
    }

    /// Number of nodes expanded so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn origin(&self) -> &N {
        &self.origin
    }

    #[inline]
    pub fn destination(&self) -> &N {
        &self.destination
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    #[inline]
    pub fn traverser(&self) -> &T {
        &self.traverser
    }

    #[inline]
    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    /// The node expanded by the latest tick.
    pub fn current(&self) -> Option<&N> {
        self.current.map(|id| self.frontier.store[id].node())
    }

    /// Nodes still queued, in the order they would be expanded.
    pub fn open(&self) -> impl Iterator<Item = &N> + '_ {
        self.frontier
            .open
            .iter()
            .map(|key| self.frontier.store[key.id].node())
    }

    /// Expanded nodes, in expansion order.
    pub fn closed(&self) -> impl Iterator<Item = &N> + '_ {
        self.closed.iter().map(|&id| self.frontier.store[id].node())
    }

    #[inline]
    pub fn open_count(&self) -> usize {
        self.frontier.open.len()
    }

    #[inline]
    pub fn closed_count(&self) -> usize {
        self.closed.len()
    }

    /// Search state of a discovered node.
    pub fn metadata(&self, node: &N) -> Option<&NodeMetadata<N>> {
        self.frontier.store.find(node)
    }

    /// All metadata of this solve.
    #[inline]
    pub fn store(&self) -> &MetadataStore<N> {
        &self.frontier.store
    }

    /// The path from origin to destination, once the search succeeded.
    ///
    /// Computed on first access and reused afterwards.
    pub fn path(&self) -> Option<&[N]> {
        let goal = self.goal?;
        Some(self.path.get_or_init(|| self.trace(goal)).as_slice())
    }

    /// Sum of real edge costs along [`path`](Self::path).
    pub fn path_cost(&self) -> Option<f64> {
        let path = self.path()?;
        let cost = *self.path_cost.get_or_init(|| {
            path.windows(2)
                .map(|w| self.traverser.real_cost(&w[0], &w[1]))
                .sum()
        });
        Some(cost)
    }

    /// The best path known right now: the full path after a success,
    /// otherwise the path to the expanded node estimated closest to the
    /// destination.
    pub fn current_best_path(&self) -> Vec<N> {
        match self.path() {
            Some(path) => path.to_vec(),
            None => self.trace(self.closest),
        }
    }

    /// Copy the observable progress of the solver.
    pub fn snapshot(&self) -> Snapshot<N> {
        Snapshot {
            state: self.state,
            ticks: self.ticks,
            open_count: self.open_count(),
            closed_count: self.closed_count(),
            current: self.current().cloned(),
            best_path: self.current_best_path(),
        }
    }

    /// Summarize the solve as an [`Outcome`].
    pub fn outcome(&self) -> Outcome<N> {
        Outcome {
            state: self.state,
            path: self.path().map(<[N]>::to_vec),
            path_cost: self.path_cost(),
            ticks: self.ticks,
        }
    }

    /// Re-key every queued node, e.g. after the policy's weighting changed.
    pub(crate) fn requeue_open(&mut self) {
        self.frontier.requeue_all(&self.policy);
    }

    pub(crate) fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }
}

impl<N, T, P> fmt::Debug for Solver<N, T, P>
where
    N: fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("origin", &self.origin)
            .field("destination", &self.destination)
            .field("policy", &self.policy)
            .field("state", &self.state)
            .field("ticks", &self.ticks)
            .field("open", &self.frontier.open.len())
            .field("closed", &self.closed.len())
            .finish_non_exhaustive()
    }
}

/// Construct, run and summarize a solve in one call.
pub fn solve<N, T, P>(
    origin: N,
    destination: N,
    policy: P,
    traverser: T,
    options: SolveOptions,
) -> SolveResult<Outcome<N>>
where
    N: GraphNode,
    T: Traverser<N>,
    P: SearchPolicy,
{
    let mut solver = Solver::with_options(origin, destination, policy, traverser, options)?;
    solver.run()?;
    Ok(solver.outcome())
}
