//! The two search strategies over puzzle states.
//!
//! - `solve_best_first`: heuristic-guided expansion ordered by `f = g + h`,
//!   stopping at the first generated child that matches the goal board.
//! - `solve_bounded`: uniform-cost branch and bound ordered by `g`, running
//!   until the frontier is exhausted and keeping the best path found.
//!
//! Both return a `SearchOutcome`: either a `Solution` (the states from start
//! to goal) or `NoPath` when every reachable state was tried.
use crate::engine::State;
use crate::node::SearchNode;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

/// Which search to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    BestFirst,
    Bounded,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::BestFirst => "Best-first",
            Algorithm::Bounded => "Branch and bound",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Counters collected while a search runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose children were generated.
    pub expanded: usize,
    /// Children generated across all expansions.
    pub generated: usize,
    /// Size of the closed set when the search returned.
    pub closed: usize,
    /// Largest frontier size seen.
    pub max_open: usize,
}

/// A path found by a search.
#[derive(Clone, Debug)]
pub struct Solution {
    /// States from the start (first) to the goal (last), inclusive.
    pub path: Vec<State>,
    pub stats: SearchStats,
}

impl Solution {
    /// Number of moves along the path.
    pub fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Result of a search. `NoPath` means the goal is unreachable from the start.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    Found(Solution),
    NoPath(SearchStats),
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            SearchOutcome::NoPath(_) => None,
        }
    }

    /// Moves in the solution, or `None` if no path was found.
    pub fn moves(&self) -> Option<usize> {
        self.solution().map(Solution::moves)
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Found(solution) => &solution.stats,
            SearchOutcome::NoPath(stats) => stats,
        }
    }
}

/// Hooks called by both searches while they run.
pub trait SearchObserver {
    /// Called for every expansion. `closed_len` is the closed-set size at
    /// the moment of expansion.
    fn on_expand(&mut self, _state: &State, _g: u32, _closed_len: usize) {}

    /// Called whenever a path to the goal becomes the stored result.
    fn on_solution(&mut self, _path: &[State]) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Frontier entry. The heap pops the lowest `priority`; among equal
/// priorities it pops the highest `rank`.
struct OpenEntry {
    priority: u32,
    rank: u64,
    node: Rc<SearchNode>,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.rank == other.rank
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.rank.cmp(&other.rank))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// How equal-priority entries are ordered.
#[derive(Clone, Copy)]
enum TieBreak {
    /// Oldest entry first.
    InsertionOrder,
    /// Newest entry first.
    MostRecent,
}

/// Min-priority frontier with a deterministic tie-break.
struct Frontier {
    heap: BinaryHeap<OpenEntry>,
    next_seq: u64,
    tie_break: TieBreak,
}

impl Frontier {
    fn new(tie_break: TieBreak) -> Self {
        Frontier {
            heap: BinaryHeap::new(),
            next_seq: 0,
            tie_break,
        }
    }

    fn push(&mut self, priority: u32, node: Rc<SearchNode>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let rank = match self.tie_break {
            TieBreak::InsertionOrder => u64::MAX - seq,
            TieBreak::MostRecent => seq,
        };
        self.heap.push(OpenEntry {
            priority,
            rank,
            node,
        });
    }

    fn pop(&mut self) -> Option<Rc<SearchNode>> {
        self.heap.pop().map(|entry| entry.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Runs `algorithm` from `start` towards `goal`.
pub fn solve(algorithm: Algorithm, start: &State, goal: &State) -> SearchOutcome {
    match algorithm {
        Algorithm::BestFirst => solve_best_first(start, goal),
        Algorithm::Bounded => solve_bounded(start, goal),
    }
}

/// Heuristic best-first search from `start` to a state whose board matches `goal`.
///
/// See `solve_best_first_observed` for details.
///
/// # Examples
/// ```
/// use four_knights_solver::engine::Side;
/// use four_knights_solver::solver::solve_best_first;
/// use four_knights_solver::utils::state_from_rows;
///
/// let start = state_from_rows(&["B.B", "...", "W.W"], Side::White).unwrap();
/// let goal = state_from_rows(&["W.W", "...", "B.B"], Side::White).unwrap();
/// let outcome = solve_best_first(&start, &goal);
/// assert_eq!(outcome.moves(), Some(16));
/// ```
pub fn solve_best_first(start: &State, goal: &State) -> SearchOutcome {
    solve_best_first_observed(start, goal, &mut NoopObserver)
}

/// Heuristic best-first search, reporting every expansion to `observer`.
///
/// The frontier is ordered by `f = g + h` (ties: first inserted, first out).
/// Each popped node is closed and expanded; the first child whose board
/// matches the goal ends the search immediately. Other children are scored
/// with `heuristics::heuristic` and queued unless their state is already
/// open or closed with an equal or better `f`. Stale frontier entries whose
/// state was closed with an equal or better `f` are skipped when popped.
///
/// A start that already matches the goal yields a zero-move solution.
pub fn solve_best_first_observed(
    start: &State,
    goal: &State,
    observer: &mut impl SearchObserver,
) -> SearchOutcome {
    let mut stats = SearchStats::default();
    debug!("best-first search started");

    if start.board_matches(goal) {
        let path = vec![start.clone()];
        observer.on_solution(&path);
        return SearchOutcome::Found(Solution { path, stats });
    }

    let mut open = Frontier::new(TieBreak::InsertionOrder);
    let mut open_f: HashMap<State, u32> = HashMap::new();
    let mut closed: HashMap<State, u32> = HashMap::new();

    let root = Rc::new(SearchNode::root(start.clone()));
    open_f.insert(start.clone(), root.f());
    open.push(root.f(), root);
    stats.max_open = 1;

    while let Some(current) = open.pop() {
        let state = current.state();
        if open_f.get(state) == Some(&current.f()) {
            open_f.remove(state);
        }
        if closed.get(state).is_some_and(|&f| f <= current.f()) {
            continue;
        }

        observer.on_expand(state, current.g(), closed.len());
        closed.insert(state.clone(), current.f());
        stats.expanded += 1;
        trace!(
            "expanding g={} h={} f={} open={} closed={}",
            current.g(),
            current.h(),
            current.f(),
            open.len(),
            closed.len()
        );

        for child in current.expand() {
            stats.generated += 1;

            if child.state().board_matches(goal) {
                stats.closed = closed.len();
                let path = child.path();
                debug!(
                    "best-first search found {} moves after {} expansions",
                    path.len() - 1,
                    stats.expanded
                );
                observer.on_solution(&path);
                return SearchOutcome::Found(Solution { path, stats });
            }

            let child = child.with_heuristic(goal);
            let f = child.f();
            if open_f.get(child.state()).is_some_and(|&queued| queued <= f) {
                continue;
            }
            if closed.get(child.state()).is_some_and(|&done| done <= f) {
                continue;
            }

            open_f.insert(child.state().clone(), f);
            open.push(f, Rc::new(child));
        }
        stats.max_open = stats.max_open.max(open.len());
    }

    stats.closed = closed.len();
    debug!(
        "best-first search exhausted after {} expansions",
        stats.expanded
    );
    SearchOutcome::NoPath(stats)
}

/// Uniform-cost branch and bound search from `start` to a state whose board
/// matches `goal`.
///
/// See `solve_bounded_observed` for details.
pub fn solve_bounded(start: &State, goal: &State) -> SearchOutcome {
    solve_bounded_observed(start, goal, &mut NoopObserver)
}

/// Branch and bound search, reporting every expansion to `observer`.
///
/// The frontier is ordered by `g` alone (ties: most recently admitted
/// first). A popped node matching the goal becomes the stored solution if it
/// is no longer than the best so far, so a later path of equal length
/// replaces an earlier one. The goal state may be queued once per route that
/// reaches it, and each of those routes is checked even after the goal state
/// is closed. Any other node is skipped if already closed and is expanded
/// only while one more move could still tie the best length. A child is
/// admitted unless its state is closed, already open with a strictly smaller
/// `g`, or its `g` exceeds the best length. The search runs until the
/// frontier is empty.
pub fn solve_bounded_observed(
    start: &State,
    goal: &State,
    observer: &mut impl SearchObserver,
) -> SearchOutcome {
    let mut stats = SearchStats::default();
    debug!("branch and bound search started");

    let mut open = Frontier::new(TieBreak::MostRecent);
    let mut open_g: HashMap<State, u32> = HashMap::new();
    let mut closed: HashSet<State> = HashSet::new();
    let mut best_length = u32::MAX;
    let mut best_path: Option<Vec<State>> = None;

    let root = Rc::new(SearchNode::root(start.clone()));
    open_g.insert(start.clone(), root.g());
    open.push(root.g(), root);
    stats.max_open = 1;

    while let Some(current) = open.pop() {
        let state = current.state();
        open_g.remove(state);

        if state.board_matches(goal) {
            if current.g() <= best_length {
                best_length = current.g();
                let path = current.path();
                observer.on_solution(&path);
                best_path = Some(path);
                debug!("branch and bound recorded a {} move path", best_length);
            }
        } else if closed.contains(state) {
            continue;
        } else if current.g() < best_length {
            observer.on_expand(state, current.g(), closed.len());
            stats.expanded += 1;
            trace!(
                "expanding g={} bound={} open={} closed={}",
                current.g(),
                best_length,
                open.len(),
                closed.len()
            );

            for child in current.expand() {
                stats.generated += 1;
                let g = child.g();
                if open_g.get(child.state()).is_some_and(|&queued| queued < g) {
                    continue;
                }
                if closed.contains(child.state()) || g > best_length {
                    continue;
                }
                open_g.insert(child.state().clone(), g);
                open.push(g, Rc::new(child));
            }
            stats.max_open = stats.max_open.max(open.len());
        }

        closed.insert(state.clone());
    }

    stats.closed = closed.len();
    match best_path {
        Some(path) => {
            debug!(
                "branch and bound finished: {} moves, {} expansions",
                best_length, stats.expanded
            );
            SearchOutcome::Found(Solution { path, stats })
        }
        None => {
            debug!(
                "branch and bound exhausted after {} expansions",
                stats.expanded
            );
            SearchOutcome::NoPath(stats)
        }
    }
}
