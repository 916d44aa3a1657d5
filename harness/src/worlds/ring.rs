//! `Ring`: a cyclic counter space.
//!
//! States are positions `0..size` on a ring. Every position has two
//! successors, one step clockwise and one step counter-clockwise, at unit
//! cost. Tree search revisits positions endlessly here; graph search does not.

use lodestar_search::contract::{Problem, Successor};

/// Direction of one step around the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

/// Ring of `size` positions starting at 0, with an optional goal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    size: u32,
    goal: Option<u32>,
}

impl Ring {
    /// Ring without a goal: every search exhausts (graph mode) or is cut off.
    ///
    /// A `size` of 0 is treated as 1.
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self {
            size: size.max(1),
            goal: None,
        }
    }

    /// Set the goal position (taken modulo the ring size).
    #[must_use]
    pub fn with_goal(mut self, goal: u32) -> Self {
        self.goal = Some(goal % self.size);
        self
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Steps between two positions going the short way round.
    #[must_use]
    pub fn distance(&self, a: u32, b: u32) -> u32 {
        let forward = (b + self.size - a) % self.size;
        forward.min(self.size - forward)
    }
}

impl Problem for Ring {
    type State = u32;
    type Action = Turn;

    fn initial_state(&self) -> u32 {
        0
    }

    fn successors(&self, state: &u32) -> Vec<Successor<u32, Turn>> {
        if self.size == 1 {
            return Vec::new();
        }
        vec![
            Successor::unit(Turn::Clockwise, (state + 1) % self.size),
            Successor::unit(Turn::CounterClockwise, (state + self.size - 1) % self.size),
        ]
    }

    fn is_goal(&self, state: &u32) -> bool {
        self.goal == Some(*state)
    }

    fn heuristic(&self, state: &u32) -> Option<f64> {
        self.goal.map(|goal| f64::from(self.distance(*state, goal)))
    }

    fn value(&self, state: &u32) -> Option<f64> {
        self.heuristic(state).map(|h| -h)
    }
}
