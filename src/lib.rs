//! # Four Knights Solver Library
//!
//! This library searches for the shortest sequence of knight moves that turns
//! a starting arrangement of two white and two black knights into a target
//! arrangement, with the sides moving alternately. Two strategies are
//! provided so they can be compared on the same instance: a heuristic
//! best-first search and an exhaustive branch and bound search.
//!
//! It is used by two binaries:
//! - `knights_solver`: Runs one or both searches on a preset or random
//!   scenario and compares the path lengths and running times.
//! - `heuristic_evaluator`: Checks the heuristic against exact knight
//!   distances and compares both searches over random scenarios.
//!
//! ## Modules
//! - `engine`: Board representation (`State`, `Position`, `Cell`, `Side`) and
//!   the knight move generator.
//! - `heuristics`: The remaining-moves estimate and the tools that validate it.
//! - `node`: Search tree nodes sharing their ancestor chains.
//! - `solver`: `solve_best_first` and `solve_bounded`.
//! - `scenarios`: Preset and random start/goal pairs.
//! - `utils`: Parsing boards from text and rendering paths.

pub mod engine;
pub mod heuristics;
pub mod node;
pub mod scenarios;
pub mod solver;
pub mod utils;
