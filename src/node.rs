//! Search tree nodes.
//!
//! A `SearchNode` owns one `State` and points back at the node it was
//! expanded from. Parents are shared through `Rc`, so any number of children
//! can hang off one ancestor chain; nothing points forward, so the tree is
//! released as soon as the last frontier or result referencing it is dropped.
use crate::engine::{knights_moves, State};
use crate::heuristics::heuristic;
use std::rc::Rc;

#[derive(Debug)]
pub struct SearchNode {
    state: State,
    g: u32,
    h: u32,
    f: u32,
    parent: Option<Rc<SearchNode>>,
}

impl SearchNode {
    /// Creates a root node: no parent, `g = h = 0`.
    pub fn root(state: State) -> Self {
        SearchNode {
            state,
            g: 0,
            h: 0,
            f: 0,
            parent: None,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Moves made since the root.
    pub fn g(&self) -> u32 {
        self.g
    }

    /// Heuristic estimate of the moves still needed.
    pub fn h(&self) -> u32 {
        self.h
    }

    /// `g + h`.
    pub fn f(&self) -> u32 {
        self.f
    }

    pub fn parent(&self) -> Option<&Rc<SearchNode>> {
        self.parent.as_ref()
    }

    /// Scores the node against `goal`, setting `h` and `f`.
    ///
    /// Done once, right after the node is generated and before it enters
    /// any frontier.
    pub fn with_heuristic(mut self, goal: &State) -> Self {
        self.h = heuristic(&self.state, goal);
        self.f = self.g + self.h;
        self
    }

    /// Generates one child per legal jump of either knight of the side to
    /// move. Children start with `h = 0`; `f` equals their `g` until scored.
    ///
    /// Children come out knight by knight, each knight's destinations in
    /// move-generator order.
    pub fn expand(self: &Rc<Self>) -> Vec<SearchNode> {
        let (movers, destinations) = knights_moves(&self.state);
        let mut children = Vec::with_capacity(destinations.iter().map(Vec::len).sum());

        for (mover, targets) in movers.iter().zip(destinations.iter()) {
            for &dest in targets {
                let g = self.g + 1;
                children.push(SearchNode {
                    state: self.state.successor(*mover, dest),
                    g,
                    h: 0,
                    f: g,
                    parent: Some(Rc::clone(self)),
                });
            }
        }

        children
    }

    /// The states from the root down to this node, inclusive. A path of
    /// `g` moves has `g + 1` states.
    pub fn path(&self) -> Vec<State> {
        let mut states = vec![self.state.clone()];
        let mut cursor = self.parent.as_deref();
        while let Some(node) = cursor {
            states.push(node.state.clone());
            cursor = node.parent.as_deref();
        }
        states.reverse();
        states
    }
}
