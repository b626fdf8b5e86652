//! Tick-driven graph search over arbitrary node types.
//!
//! A [`Solver`] searches from an origin to a destination one expansion
//! ("tick") at a time, so a search can be paused, inspected and resumed:
//!
//! - **A\*** with a tunable greed factor ([`AStar`], [`Solver::astar`])
//! - **Greedy best-first** ([`Greedy`], [`Solver::greedy`])
//! - **Breadth-first** over accumulated cost ([`BreadthFirst`], [`Solver::breadth_first`])
//!
//! The graph is never materialized. Costs and neighbors come from a
//! [`Traverser`], or from the nodes themselves through [`SelfTraversable`].
//! Per-node search state lives in a [`MetadataStore`] owned by the solver,
//! so one graph can be searched by many solvers at once.
//!
//! For fire-and-forget queries use [`solve`] or [`Algorithm::solve`];
//! [`Runner`] drives a solver from a background thread, and
//! [`solve_all`] spreads independent jobs over a rayon pool.
//!
//! # Trait hierarchy
//!
//! | Trait | Role |
//! |---|---|
//! | [`GraphNode`] | Anything `Clone + Eq + Hash` |
//! | [`Traverser`] | External cost and adjacency provider |
//! | [`SelfTraversable`] : [`GraphNode`] | Nodes that answer for themselves |
//! | [`SearchPolicy`] | Ordering and neighbor handling of an algorithm |

mod astar;
mod batch;
mod bfs;
mod error;
mod greedy;
mod metadata;
mod open_set;
mod options;
mod policy;
mod runner;
mod solver;
mod stop;
mod traverser;

pub use astar::AStar;
pub use batch::{Job, solve_all};
pub use bfs::BreadthFirst;
pub use error::{Endpoint, SolveError, SolveResult, TraverseError};
pub use greedy::Greedy;
pub use metadata::{MetadataStore, NodeId, NodeMetadata, NodeStatus};
pub use open_set::{OpenKey, OpenSet};
pub use options::{Algorithm, SolveOptions};
pub use policy::{Frontier, SearchPolicy};
pub use runner::{Runner, RunnerConfig};
pub use solver::{Outcome, Snapshot, SolveState, Solver, solve};
pub use stop::StopToken;
pub use traverser::{GraphNode, NodeTraverser, SelfTraversable, Traverser};
