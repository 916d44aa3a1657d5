//! `Queens`: the complete-state N-queens formulation for local search.
//!
//! A state places one queen in every column; `rows[c]` is the row of the
//! queen in column `c`. A move relocates one queen within its column. The
//! value of a state is the negated number of attacking pairs, so a solution
//! has value 0 and is the global maximum.

use rand::Rng;

use lodestar_search::contract::{Problem, Successor};

/// Relocate the queen in `column` to `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub column: usize,
    pub row: u8,
}

/// N-queens board with a fixed starting placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queens {
    start: Vec<u8>,
}

impl Queens {
    /// `n` queens, all starting in row 0.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds 256, since rows are stored as `u8`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        assert!(n <= 256, "board too large: {n}");
        Self {
            start: vec![0; n],
        }
    }

    /// Start from an explicit placement. Rows are taken modulo the board size.
    #[must_use]
    pub fn from_rows(rows: &[u8]) -> Self {
        let n = rows.len();
        let start = rows
            .iter()
            .map(|&r| u8::try_from(usize::from(r) % n.max(1)).unwrap_or(0))
            .collect();
        Self { start }
    }

    /// `n` queens placed in uniformly random rows drawn from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds 256.
    #[must_use]
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        assert!(n <= 256, "board too large: {n}");
        let start = (0..n)
            .map(|_| u8::try_from(rng.gen_range(0..n)).unwrap_or(0))
            .collect();
        Self { start }
    }

    /// Board size.
    #[must_use]
    pub fn size(&self) -> usize {
        self.start.len()
    }

    /// Number of queen pairs sharing a row or a diagonal.
    #[must_use]
    pub fn attacking_pairs(rows: &[u8]) -> u32 {
        let mut pairs = 0;
        for (i, &a) in rows.iter().enumerate() {
            for (offset, &b) in rows[i + 1..].iter().enumerate() {
                let column_gap = offset + 1;
                if a == b || usize::from(a.abs_diff(b)) == column_gap {
                    pairs += 1;
                }
            }
        }
        pairs
    }
}

impl Problem for Queens {
    type State = Vec<u8>;
    type Action = Move;

    fn initial_state(&self) -> Vec<u8> {
        self.start.clone()
    }

    fn successors(&self, state: &Vec<u8>) -> Vec<Successor<Vec<u8>, Move>> {
        let n = state.len();
        let mut out = Vec::with_capacity(n * n.saturating_sub(1));
        for column in 0..n {
            for row in (0..n).filter_map(|r| u8::try_from(r).ok()) {
                if row == state[column] {
                    continue;
                }
                let mut next = state.clone();
                next[column] = row;
                out.push(Successor::unit(Move { column, row }, next));
            }
        }
        out
    }

    fn is_goal(&self, state: &Vec<u8>) -> bool {
        Self::attacking_pairs(state) == 0
    }

    fn value(&self, state: &Vec<u8>) -> Option<f64> {
        Some(-f64::from(Self::attacking_pairs(state)))
    }
}
