//! End-to-end solves on a fixed 10x10 cost map and on random maps.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use waypath::{
    AStar, Algorithm, BreadthFirst, GraphNode, Greedy, Job, SearchPolicy, SolveOptions, SolveResult,
    SolveState, Solver, Traverser, solve_all,
};

use crate::{Adjacency, CostGrid, GridNode, GridTraverser, Point, chebyshev};

const MAP: &str = "
1219911192
1192051231
1131011591
5311011559
1219011293
9115019213
5129195211
3111123131
2125999112
5111111991
";

const ORIGIN: Point = Point::new(0, 0);
const DEST: Point = Point::new(9, 9);

fn traverser() -> GridTraverser {
    GridTraverser::new(CostGrid::parse(MAP).unwrap())
}

fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
    coords.iter().copied().map(Point::from).collect()
}

/// Cheapest cost from `from` to `to`, by plain Dijkstra over the same moves.
fn cheapest(t: &GridTraverser, from: Point, to: Point) -> Option<u32> {
    let mut dist = HashMap::from([(from, 0u32)]);
    let mut heap = BinaryHeap::from([Reverse((0u32, from))]);
    let mut buf = Vec::new();
    while let Some(Reverse((d, p))) = heap.pop() {
        if p == to {
            return Some(d);
        }
        if dist.get(&p).is_some_and(|&best| d > best) {
            continue;
        }
        buf.clear();
        Traverser::traversable_nodes(t, &p, &mut buf).unwrap();
        for &n in &buf {
            let Some(c) = t.grid().cost(n).filter(|&c| c > 0) else {
                continue;
            };
            let nd = d + c;
            if dist.get(&n).is_none_or(|&best| nd < best) {
                dist.insert(n, nd);
                heap.push(Reverse((nd, n)));
            }
        }
    }
    None
}

fn assert_walkable(t: &GridTraverser, path: &[Point], from: Point, to: Point) {
    assert_eq!(path.first(), Some(&from));
    assert_eq!(path.last(), Some(&to));
    for w in path.windows(2) {
        assert_eq!(chebyshev(w[0], w[1]), 1, "{} -> {} is not a move", w[0], w[1]);
        assert!(t.grid().is_passable(w[1]), "{} is a wall", w[1]);
    }
}

#[test]
fn astar_finds_cheapest_path() {
    let t = traverser();
    let mut s = Solver::astar(ORIGIN, DEST, 1.0, &t).unwrap();
    assert_eq!(s.run().unwrap(), SolveState::Success);
    assert_eq!(s.ticks(), 37);
    assert_eq!(s.path_cost(), Some(16.0));
    assert_eq!(cheapest(&t, ORIGIN, DEST), Some(16));
    let expected = pts(&[
        (0, 0),
        (1, 1),
        (1, 2),
        (2, 3),
        (2, 4),
        (2, 5),
        (1, 6),
        (2, 7),
        (2, 8),
        (3, 9),
        (4, 9),
        (5, 9),
        (6, 9),
        (7, 8),
        (8, 8),
        (9, 9),
    ]);
    assert_eq!(s.path(), Some(&expected[..]));
    assert_eq!(s.closed_count(), 37);
    assert_eq!(s.open_count(), 33);
    assert_eq!(s.store().len(), 75);
}

#[test]
fn greed_trades_cost_for_ticks() {
    let t = traverser();
    let run = |greed: f64| {
        let mut s = Solver::astar(ORIGIN, DEST, greed, &t).unwrap();
        s.run().unwrap();
        (s.path_cost(), s.ticks())
    };
    assert_eq!(run(0.0), (Some(16.0), 63));
    assert_eq!(run(1.0), (Some(16.0), 37));
    assert_eq!(run(2.0), (Some(18.0), 21));
    assert_eq!(run(8.0), (Some(21.0), 14));

    let mut s = Solver::astar(ORIGIN, DEST, 0.0, &t).unwrap();
    s.run().unwrap();
    assert_eq!(s.path().map(<[Point]>::len), Some(17));
    assert_eq!(s.path().and_then(|p| p.get(8)), Some(&Point::new(1, 8)));
}

#[test]
fn greedy_follows_the_diagonal() {
    let t = traverser();
    let mut s = Solver::greedy(ORIGIN, DEST, &t).unwrap();
    assert_eq!(s.run().unwrap(), SolveState::Success);
    assert_eq!(s.ticks(), 11);
    assert_eq!(s.path_cost(), Some(29.0));
    let expected = pts(&[
        (0, 0),
        (1, 1),
        (2, 2),
        (3, 3),
        (3, 4),
        (3, 5),
        (4, 6),
        (5, 5),
        (6, 6),
        (7, 7),
        (8, 8),
        (9, 9),
    ]);
    assert_eq!(s.path(), Some(&expected[..]));
}

#[test]
fn breadth_first_expands_by_cost() {
    let t = traverser();
    let mut s = Solver::breadth_first(ORIGIN, DEST, &t).unwrap();
    assert_eq!(s.run().unwrap(), SolveState::Success);
    assert_eq!(s.ticks(), 63);
    assert_eq!(s.path_cost(), Some(16.0));
    let expected = pts(&[
        (0, 0),
        (0, 1),
        (1, 2),
        (2, 3),
        (2, 4),
        (1, 5),
        (1, 6),
        (1, 7),
        (1, 8),
        (2, 9),
        (3, 9),
        (4, 9),
        (5, 9),
        (6, 9),
        (7, 8),
        (8, 8),
        (9, 9),
    ]);
    assert_eq!(s.path(), Some(&expected[..]));
}

#[test]
fn cardinal_moves_cost_more() {
    let t = GridTraverser::with_adjacency(CostGrid::parse(MAP).unwrap(), Adjacency::Cardinal);
    let mut s = Solver::astar(ORIGIN, DEST, 1.0, &t).unwrap();
    assert_eq!(s.run().unwrap(), SolveState::Success);
    assert_eq!(s.path_cost(), Some(25.0));
    assert_eq!(s.ticks(), 42);
    assert_eq!(s.path().map(<[Point]>::len), Some(19));
}

#[test]
fn walled_off_destination_fails_everywhere() {
    let mut t = traverser();
    for p in [(8, 8), (9, 8), (8, 9)] {
        t.grid_mut().set_cost(Point::from(p), 0);
    }
    let jobs = [
        Job::new(ORIGIN, DEST),
        Job::new(ORIGIN, DEST).algorithm(Algorithm::Greedy),
        Job::new(ORIGIN, DEST).algorithm(Algorithm::BreadthFirst),
    ];
    for outcome in solve_all(&jobs, &t) {
        let outcome = outcome.unwrap();
        assert_eq!(outcome.state, SolveState::Failure);
        assert_eq!(outcome.path, None);
        assert_eq!(outcome.ticks, 91);
    }
}

#[test]
fn tick_limit_fails_early() {
    let t = traverser();
    let job = Job::new(ORIGIN, DEST).options(SolveOptions::default().max_ticks(10));
    let outcome = solve_all(&[job], &t).pop().unwrap().unwrap();
    assert_eq!(outcome.state, SolveState::Failure);
    assert_eq!(outcome.ticks, 10);
}

#[test]
fn single_ticks_match_a_full_run() {
    let t = traverser();
    let mut full = Solver::new(ORIGIN, DEST, AStar::default(), &t).unwrap();
    full.run().unwrap();

    let mut stepped = Solver::new(ORIGIN, DEST, AStar::default(), &t).unwrap();
    let mut calls = 0;
    while stepped.start(Some(1)).unwrap() == SolveState::Waiting {
        calls += 1;
        assert_eq!(stepped.ticks(), calls);
        assert_eq!(stepped.closed_count() as u64, calls);
        let best = stepped.current_best_path();
        assert_eq!(best.first(), Some(&ORIGIN));
    }
    assert_eq!(stepped.state(), SolveState::Success);
    assert_eq!(stepped.ticks(), full.ticks());
    assert_eq!(stepped.path(), full.path());
    let a: Vec<_> = stepped.closed().collect();
    let b: Vec<_> = full.closed().collect();
    assert_eq!(a, b);
}

/// Run a freshly built solver to the end and report how it went.
fn summarize<N, T, P>(solver: SolveResult<Solver<N, T, P>>) -> (SolveState, u64, Option<f64>)
where
    N: GraphNode,
    T: Traverser<N>,
    P: SearchPolicy,
{
    let mut s = solver.unwrap();
    let state = s.run().unwrap();
    (state, s.ticks(), s.path_cost())
}

#[test]
fn grid_nodes_search_like_points() {
    let grid = CostGrid::parse(MAP).unwrap();
    let t = GridTraverser::new(grid.clone());
    let origin = GridNode::new(&grid, ORIGIN);
    let dest = GridNode::new(&grid, DEST);

    assert_eq!(
        summarize(Solver::for_nodes(origin, dest, Greedy)),
        summarize(Solver::greedy(ORIGIN, DEST, &t)),
    );
    assert_eq!(
        summarize(Solver::for_nodes(origin, dest, BreadthFirst)),
        summarize(Solver::breadth_first(ORIGIN, DEST, &t)),
    );

    let mut s = Solver::for_nodes(origin, dest, AStar::default()).unwrap();
    s.run().unwrap();
    let path: Vec<Point> = s.path().unwrap().iter().map(GridNode::pos).collect();
    let mut p = Solver::astar(ORIGIN, DEST, 1.0, &t).unwrap();
    p.run().unwrap();
    assert_eq!(Some(&path[..]), p.path());
}

#[test]
fn endpoints_off_the_grid_are_rejected() {
    let t = traverser();
    assert!(Solver::astar(Point::new(-1, 0), DEST, 1.0, &t).is_err());
    assert!(Solver::astar(ORIGIN, Point::new(10, 9), 1.0, &t).is_err());
}

#[test]
fn random_maps_agree_with_dijkstra() {
    const COSTS: [u32; 8] = [0, 1, 1, 1, 2, 3, 5, 9];
    let mut rng = StdRng::seed_from_u64(42);
    let (w, h) = (14, 11);
    let dest = Point::new(w - 1, h - 1);

    for _ in 0..40 {
        let mut rows = vec![vec![0u32; w as usize]; h as usize];
        for cell in rows.iter_mut().flatten() {
            *cell = COSTS[rng.random_range(0..COSTS.len())];
        }
        rows[0][0] = 1;
        rows[dest.y as usize][dest.x as usize] = 1;
        let t = GridTraverser::new(CostGrid::from_rows(&rows).unwrap());
        let best = cheapest(&t, ORIGIN, dest);

        for algorithm in [
            Algorithm::AStar { greed: 0.0 },
            Algorithm::AStar { greed: 1.0 },
            Algorithm::AStar { greed: 3.0 },
            Algorithm::Greedy,
            Algorithm::BreadthFirst,
        ] {
            let out = algorithm.solve(ORIGIN, dest, &t, SolveOptions::default()).unwrap();
            match best {
                None => assert_eq!(out.state, SolveState::Failure, "{}", algorithm.name()),
                Some(best) => {
                    assert_eq!(out.state, SolveState::Success, "{}", algorithm.name());
                    let path = out.path.unwrap();
                    assert_walkable(&t, &path, ORIGIN, dest);
                    let cost = out.path_cost.unwrap();
                    assert!(cost >= f64::from(best), "{} beat dijkstra", algorithm.name());
                    let walked: u32 = path[1..].iter().filter_map(|&p| t.grid().cost(p)).sum();
                    assert_eq!(cost, f64::from(walked));
                }
            }
        }
    }
}

#[test]
fn solves_are_deterministic() {
    let t = traverser();
    let jobs: Vec<_> = (0..16).map(|_| Job::new(ORIGIN, DEST)).collect();
    let outcomes: Vec<_> = solve_all(&jobs, &t).into_iter().map(Result::unwrap).collect();
    assert!(outcomes.windows(2).all(|w| w[0] == w[1]));
}

#[cfg(feature = "serde")]
mod serde_tests {
    use super::*;

    #[test]
    fn traverser_and_jobs_round_trip() {
        let t = traverser();
        let json = serde_json::to_string(&t).unwrap();
        let back: GridTraverser = serde_json::from_str(&json).unwrap();
        assert_eq!(back.grid(), t.grid());
        assert_eq!(back.adjacency(), Adjacency::Diagonal);

        let job: Job<Point> = serde_json::from_str(
            r#"{"origin":{"x":0,"y":0},"destination":{"x":9,"y":9},"algorithm":{"kind":"greedy"}}"#,
        )
        .unwrap();
        assert_eq!(job.algorithm, Algorithm::Greedy);
        let out = solve_all(&[job], &back).pop().unwrap().unwrap();
        assert_eq!(out.path_cost, Some(29.0));
    }
}
